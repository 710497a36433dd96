//! Embedded file store adapter (SQLite)
//!
//! The favorite flag is stored as 0/1 in a BOOLEAN-affinity column.

use crate::codec::{favorite_to_store_int, normalize_favorite};
use crate::db::{init_database, init_in_memory, seed_sample_data, SeedReport};
use crate::models::{Chord, SongRecord, SongWrite};
use crate::store::{like_pattern, Store};
use crate::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::path::Path;
use tracing::debug;

const SONG_COLUMNS: &str =
    "id, title, artist, chords, audio_path, is_favorite, created_at, updated_at";

const CHORD_COLUMNS: &str = "id, name, image_path, description, difficulty_level";

/// SQLite-backed [`Store`]
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Wrap an existing pool; the schema must already exist
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (or create) the database file and apply the schema
    pub async fn open(db_path: &Path, max_connections: u32) -> Result<Self> {
        let pool = init_database(db_path, max_connections).await?;
        Ok(Self { pool })
    }

    /// Private in-memory database with the schema applied
    pub async fn in_memory() -> Result<Self> {
        let pool = init_in_memory().await?;
        Ok(Self { pool })
    }

    /// Seed empty tables with the sample songs and chord diagrams
    pub async fn seed(&self) -> Result<SeedReport> {
        seed_sample_data(&self.pool).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn fetch_songs(&self, sql: &str, binds: &[&str]) -> Result<Vec<SongRecord>> {
        let mut query = sqlx::query(sql);
        for value in binds {
            query = query.bind(*value);
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(song_from_row).collect()
    }
}

fn song_from_row(row: &SqliteRow) -> Result<SongRecord> {
    Ok(SongRecord {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        artist: row.try_get("artist")?,
        chords: row.try_get("chords")?,
        audio_path: row.try_get("audio_path")?,
        is_favorite: normalize_favorite(row.try_get::<Option<i64>, _>("is_favorite")?),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn chord_from_row(row: &SqliteRow) -> Result<Chord> {
    let level: String = row.try_get("difficulty_level")?;
    Ok(Chord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        image_path: row.try_get("image_path")?,
        description: row.try_get("description")?,
        difficulty_level: level.parse()?,
    })
}

#[async_trait]
impl Store for SqliteStore {
    async fn list_songs(&self) -> Result<Vec<SongRecord>> {
        let sql = format!(
            "SELECT {} FROM songs ORDER BY created_at DESC, id DESC",
            SONG_COLUMNS
        );
        self.fetch_songs(&sql, &[]).await
    }

    async fn get_song(&self, id: i64) -> Result<Option<SongRecord>> {
        let sql = format!("SELECT {} FROM songs WHERE id = ?", SONG_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(song_from_row).transpose()
    }

    async fn list_favorite_songs(&self) -> Result<Vec<SongRecord>> {
        let sql = format!(
            "SELECT {} FROM songs WHERE is_favorite <> 0 ORDER BY title ASC",
            SONG_COLUMNS
        );
        self.fetch_songs(&sql, &[]).await
    }

    async fn insert_song(&self, song: &SongWrite) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO songs (title, artist, chords, audio_path, is_favorite)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&song.title)
        .bind(&song.artist)
        .bind(&song.chords)
        .bind(&song.audio_path)
        .bind(favorite_to_store_int(song.is_favorite))
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!("Inserted song {} ({})", id, song.title);
        Ok(id)
    }

    async fn update_song(&self, id: i64, song: &SongWrite) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE songs
             SET title = ?, artist = ?, chords = ?, audio_path = ?, is_favorite = ?,
                 updated_at = CURRENT_TIMESTAMP
             WHERE id = ?",
        )
        .bind(&song.title)
        .bind(&song.artist)
        .bind(&song.chords)
        .bind(&song.audio_path)
        .bind(favorite_to_store_int(song.is_favorite))
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_song(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM songs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn search_songs(&self, query: &str) -> Result<Vec<SongRecord>> {
        // SQLite LIKE is case-insensitive for ASCII
        let sql = format!(
            r"SELECT {} FROM songs
              WHERE title LIKE ? ESCAPE '\' OR artist LIKE ? ESCAPE '\'
              ORDER BY title ASC",
            SONG_COLUMNS
        );
        let pattern = like_pattern(query);
        self.fetch_songs(&sql, &[pattern.as_str(), pattern.as_str()]).await
    }

    async fn songs_by_artist(&self, artist: &str) -> Result<Vec<SongRecord>> {
        let sql = format!(
            "SELECT {} FROM songs WHERE artist = ? ORDER BY title ASC",
            SONG_COLUMNS
        );
        self.fetch_songs(&sql, &[artist]).await
    }

    async fn songs_matching_chord(&self, chord: &str) -> Result<Vec<SongRecord>> {
        let sql = format!(
            r"SELECT {} FROM songs WHERE chords LIKE ? ESCAPE '\' ORDER BY title ASC",
            SONG_COLUMNS
        );
        let pattern = like_pattern(chord);
        self.fetch_songs(&sql, &[pattern.as_str()]).await
    }

    async fn get_favorite(&self, id: i64) -> Result<Option<bool>> {
        let flag: Option<Option<i64>> =
            sqlx::query_scalar("SELECT is_favorite FROM songs WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(flag.map(normalize_favorite))
    }

    async fn set_favorite(&self, id: i64, favorite: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE songs SET is_favorite = ? WHERE id = ?")
            .bind(favorite_to_store_int(favorite))
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_chords(&self) -> Result<Vec<Chord>> {
        let sql = format!("SELECT {} FROM chords ORDER BY name ASC", CHORD_COLUMNS);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(chord_from_row).collect()
    }

    async fn get_chord(&self, name: &str) -> Result<Option<Chord>> {
        let sql = format!("SELECT {} FROM chords WHERE name = ?", CHORD_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(chord_from_row).transpose()
    }
}
