//! SQLite database initialization
//!
//! Opens (or creates) the embedded database file, creates the `songs` and
//! `chords` tables if they do not exist, and optionally seeds empty tables with
//! the sample data.

use crate::codec::favorite_to_store_int;
use crate::db::seed::{SAMPLE_CHORDS, SAMPLE_SONGS};
use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Rows inserted by [`seed_sample_data`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub songs: usize,
    pub chords: usize,
}

/// Open the database file and create tables if needed
///
/// The parent directory is created when missing. Connection pool size is
/// bounded by `max_connections`; requests beyond it wait for a connection.
pub async fn init_database(db_path: &Path, max_connections: u32) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    create_schema(&pool).await?;

    Ok(pool)
}

/// Open a private in-memory database with the schema applied
///
/// The pool holds exactly one connection that never expires: every new
/// in-memory connection would otherwise see its own empty database.
pub async fn init_in_memory() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Create tables and indexes (idempotent)
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    create_songs_table(pool).await?;
    create_chords_table(pool).await?;
    Ok(())
}

async fn create_songs_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS songs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            artist TEXT NOT NULL,
            chords TEXT NOT NULL DEFAULT '',
            audio_path TEXT,
            is_favorite BOOLEAN NOT NULL DEFAULT 0,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_songs_artist ON songs(artist)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_songs_title ON songs(title)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_songs_is_favorite ON songs(is_favorite)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_chords_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS chords (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            image_path TEXT NOT NULL,
            description TEXT,
            difficulty_level TEXT NOT NULL DEFAULT 'Beginner'
                CHECK (difficulty_level IN ('Beginner', 'Intermediate', 'Advanced'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Insert the sample songs and chord reference rows into empty tables
///
/// Each table is checked independently; a table that already has rows is left
/// untouched.
pub async fn seed_sample_data(pool: &SqlitePool) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    let song_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM songs")
        .fetch_one(pool)
        .await?;

    if song_count == 0 {
        let mut tx = pool.begin().await?;
        for song in SAMPLE_SONGS {
            sqlx::query(
                "INSERT INTO songs (title, artist, chords, audio_path, is_favorite)
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(song.title)
            .bind(song.artist)
            .bind(song.chords)
            .bind(song.audio_path)
            .bind(favorite_to_store_int(false))
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        report.songs = SAMPLE_SONGS.len();
        info!("Inserted {} sample songs", report.songs);
    }

    let chord_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chords")
        .fetch_one(pool)
        .await?;

    if chord_count == 0 {
        let mut tx = pool.begin().await?;
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
