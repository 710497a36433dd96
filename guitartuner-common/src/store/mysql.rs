//! Networked relational store adapter (MySQL)
//!
//! The favorite flag is a native BOOLEAN. Text comparisons that must be exact
//! (artist, chord name) force a binary collation because the default MySQL
//! collations are case-insensitive.
//!
//! Tables created by earlier deployments may lack `updated_at` and allow NULL
//! in `is_favorite` and `difficulty_level`. The missing column is added at
//! connect time; NULLs read as not favorite and `Beginner`.

use crate::codec::normalize_favorite;
use crate::config::MySqlSettings;
use crate::db::seed::{SAMPLE_CHORDS, SAMPLE_SONGS};
use crate::db::SeedReport;
use crate::models::{Chord, DifficultyLevel, SongRecord, SongWrite};
use crate::store::{like_pattern, Store};
use crate::{Error, Result};
use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::Row;
use tracing::{debug, info};

const SONG_COLUMNS: &str =
    "id, title, artist, chords, audio_path, is_favorite, created_at, updated_at";

const CHORD_COLUMNS: &str = "id, name, image_path, description, difficulty_level";

/// MySQL-backed [`Store`]
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    /// Connect to the server and create tables if needed
    pub async fn connect(settings: &MySqlSettings, max_connections: u32) -> Result<Self> {
        let options = MySqlConnectOptions::new()
            .host(&settings.host)
            .port(settings.port)
            .username(&settings.user)
            .password(&settings.password)
            .database(&settings.database);

        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?;

        info!(
            "Connected to MySQL at {}:{}/{}",
            settings.host, settings.port, settings.database
        );

        let store = Self { pool };
        store.create_schema().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    async fn create_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS songs (
                id BIGINT AUTO_INCREMENT PRIMARY KEY,
                title VARCHAR(255) NOT NULL,
                artist VARCHAR(255) NOT NULL,
                chords TEXT NOT NULL,
                audio_path VARCHAR(255),
                is_favorite BOOLEAN NOT NULL DEFAULT FALSE,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                INDEX idx_songs_artist (artist),
                INDEX idx_songs_title (title),
                INDEX idx_songs_is_favorite (is_favorite)
            ) DEFAULT CHARSET = utf8mb4
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS chords (
                id BIGINT AUTO_INCREMENT PRIMARY KEY,
                name VARCHAR(50) NOT NULL UNIQUE,
                image_path VARCHAR(255) NOT NULL,
                description TEXT,
                difficulty_level VARCHAR(50) NOT NULL DEFAULT 'Beginner'
            ) DEFAULT CHARSET = utf8mb4
            "#,
        )
        .execute(&self.pool)
        .await?;

        self.ensure_updated_at_column().await?;

        Ok(())
    }

    async fn ensure_updated_at_column(&self) -> Result<()> {
        let present: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM information_schema.COLUMNS
             WHERE TABLE_SCHEMA = DATABASE() AND TABLE_NAME = 'songs'
               AND COLUMN_NAME = 'updated_at'",
        )
        .fetch_one(&self.pool)
        .await?;

        if present == 0 {
            sqlx::query(
                "ALTER TABLE songs ADD COLUMN updated_at DATETIME DEFAULT CURRENT_TIMESTAMP",
            )
            .execute(&self.pool)
            .await?;
            info!("Added updated_at column to existing songs table");
        }

        Ok(())
    }

    /// Seed empty tables with the sample songs and chord diagrams
    pub async fn seed(&self) -> Result<SeedReport> {
        let mut report = SeedReport::default();

        let song_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM songs")
            .fetch_one(&self.pool)
            .await?;

        if song_count == 0 {
            let mut tx = self.pool.begin().await?;
            for song in SAMPLE_SONGS {
                sqlx::query(
                    "INSERT INTO songs (title, artist, chords, audio_path, is_favorite)
                     VALUES (?, ?, ?, ?, ?)",
                )
                .bind(song.title)
                .bind(song.artist)
                .bind(song.chords)
                .bind(song.audio_path)
                .bind(false)
                .execute(&mut *tx)
                .await?;
            }
            tx.commit().await?;
            report.songs = SAMPLE_SONGS.len();
            info!("Inserted {} sample songs", report.songs);
        }

        let chord_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chords")
            .fetch_one(&self.pool)
            .await?;

        if chord_count == 0 {
            let mut tx = self.pool.begin().await?;
            for chord in SAMPLE_CHORDS {
                sqlx::query(
                    "INSERT INTO chords (name, image_path, description, difficulty_level)
                     VALUES (?, ?, ?, ?)",
                )
                .bind(chord.name)
                .bind(chord.image_path)
                .bind(chord.description)
                .bind(chord.difficulty_level.as_str())
                .execute(&mut *tx)
                .await?;
            }
            tx.commit().await?;
            report.chords = SAMPLE_CHORDS.len();
            info!("Inserted {} chord diagrams", report.chords);
        }

        Ok(report)
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

fn song_from_row(row: &MySqlRow) -> Result<SongRecord> {
    Ok(SongRecord {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        artist: row.try_get("artist")?,
        chords: row.try_get("chords")?,
        audio_path: row.try_get("audio_path")?,
        is_favorite: normalize_favorite(row.try_get::<Option<bool>, _>("is_favorite")?),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn chord_from_row(row: &MySqlRow) -> Result<Chord> {
    let level: Option<String> = row.try_get("difficulty_level")?;
    Ok(Chord {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        image_path: row.try_get("image_path")?,
        description: row.try_get("description")?,
        difficulty_level: match level {
            Some(level) => level.parse()?,
            None => DifficultyLevel::Beginner,
        },
    })
}

#[async_trait]
impl Store for MySqlStore {
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
            "SELECT {} FROM songs WHERE is_favorite = TRUE ORDER BY title ASC",
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
        .bind(song.is_favorite)
        .execute(&self.pool)
        .await?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|_| Error::Internal("Song id out of range".to_string()))?;
        debug!("Inserted song {} ({})", id, song.title);
        Ok(id)
    }

    async fn update_song(&self, id: i64, song: &SongWrite) -> Result<bool> {
        // CLIENT_FOUND_ROWS is not set, so an update that changes nothing
        // reports zero rows; fall back to an existence check in that case.
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
        .bind(song.is_favorite)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }
        Ok(self.get_favorite(id).await?.is_some())
    }

    async fn delete_song(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM songs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn search_songs(&self, query: &str) -> Result<Vec<SongRecord>> {
        let sql = format!(
            "SELECT {} FROM songs
             WHERE LOWER(title) LIKE LOWER(?) OR LOWER(artist) LIKE LOWER(?)
             ORDER BY title ASC",
            SONG_COLUMNS
        );
        let pattern = like_pattern(query);
        self.fetch_songs(&sql, &[pattern.as_str(), pattern.as_str()]).await
    }

    async fn songs_by_artist(&self, artist: &str) -> Result<Vec<SongRecord>> {
        let sql = format!(
            "SELECT {} FROM songs WHERE artist = ? COLLATE utf8mb4_bin ORDER BY title ASC",
            SONG_COLUMNS
        );
        self.fetch_songs(&sql, &[artist]).await
    }

    async fn songs_matching_chord(&self, chord: &str) -> Result<Vec<SongRecord>> {
        let sql = format!(
            "SELECT {} FROM songs WHERE chords LIKE ? COLLATE utf8mb4_bin ORDER BY title ASC",
            SONG_COLUMNS
        );
        let pattern = like_pattern(chord);
        self.fetch_songs(&sql, &[pattern.as_str()]).await
    }

    async fn get_favorite(&self, id: i64) -> Result<Option<bool>> {
        let flag: Option<Option<bool>> =
            sqlx::query_scalar("SELECT is_favorite FROM songs WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(flag.map(normalize_favorite))
    }

    async fn set_favorite(&self, id: i64, favorite: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE songs SET is_favorite = ? WHERE id = ?")
            .bind(favorite)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }
        Ok(self.get_favorite(id).await?.is_some())
    }

    async fn list_chords(&self) -> Result<Vec<Chord>> {
        let sql = format!("SELECT {} FROM chords ORDER BY name ASC", CHORD_COLUMNS);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(chord_from_row).collect()
    }

    async fn get_chord(&self, name: &str) -> Result<Option<Chord>> {
        let sql = format!(
            "SELECT {} FROM chords WHERE name = ? COLLATE utf8mb4_bin",
            CHORD_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(chord_from_row).transpose()
    }
}
