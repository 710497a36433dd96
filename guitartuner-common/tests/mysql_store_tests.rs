//! Integration tests for the MySQL store adapter
//!
//! These need a live server and DROP the `songs` and `chords` tables of the
//! target database. Run with:
//!
//! ```text
//! DB_HOST=127.0.0.1 DB_NAME=guitartuner_test \
//!     cargo test -p guitartuner-common --features mysql -- --ignored
//! ```
#![cfg(feature = "mysql")]

use guitartuner_common::config::{
    MySqlSettings, DEFAULT_MYSQL_DATABASE, DEFAULT_MYSQL_PORT, DEFAULT_MYSQL_USER,
};
use guitartuner_common::models::SongWrite;
use guitartuner_common::store::MySqlStore;
use guitartuner_common::{Catalog, Store};
use sqlx::mysql::{MySqlConnectOptions, MySqlPool};
use std::sync::Arc;
use tokio::sync::Mutex;

// Tests share one database
static DB_LOCK: Mutex<()> = Mutex::const_new(());

fn settings() -> Option<MySqlSettings> {
    let host = std::env::var("DB_HOST").ok()?;
    Some(MySqlSettings {
        host,
        port: std::env::var("DB_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_MYSQL_PORT),
        user: std::env::var("DB_USER").unwrap_or_else(|_| DEFAULT_MYSQL_USER.to_string()),
        password: std::env::var("DB_PASSWORD").unwrap_or_default(),
        database: std::env::var("DB_NAME")
            .unwrap_or_else(|_| DEFAULT_MYSQL_DATABASE.to_string()),
    })
}

async fn raw_pool(settings: &MySqlSettings) -> MySqlPool {
    let options = MySqlConnectOptions::new()
        .host(&settings.host)
        .port(settings.port)
        .username(&settings.user)
        .password(&settings.password)
        .database(&settings.database);
    MySqlPool::connect_with(options).await.unwrap()
}

async fn drop_tables(pool: &MySqlPool) {
    sqlx::query("DROP TABLE IF EXISTS songs").execute(pool).await.unwrap();
    sqlx::query("DROP TABLE IF EXISTS chords").execute(pool).await.unwrap();
}

fn write(title: &str, artist: &str, chords: &str) -> SongWrite {
    SongWrite {
        title: title.to_string(),
        artist: artist.to_string(),
        chords: chords.to_string(),
        audio_path: None,
        is_favorite: false,
    }
}

#[tokio::test]
#[ignore = "requires a MySQL server (set DB_HOST)"]
async fn test_legacy_table_gains_updated_at() {
    let Some(settings) = settings() else {
        eprintln!("DB_HOST not set, skipping");
        return;
    };
    let _guard = DB_LOCK.lock().await;

    let pool = raw_pool(&settings).await;
    drop_tables(&pool).await;
    sqlx::query(
        "CREATE TABLE songs (
            id INT AUTO_INCREMENT PRIMARY KEY,
            title VARCHAR(255) NOT NULL,
            artist VARCHAR(255) NOT NULL,
            chords TEXT NOT NULL,
            audio_path VARCHAR(255),
            is_favorite TINYINT(1) DEFAULT 0,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        "INSERT INTO songs (title, artist, chords, is_favorite) VALUES ('Old', 'A', 'C', NULL)",
    )
    .execute(&pool)
    .await
    .unwrap();

    let store = MySqlStore::connect(&settings, 2).await.unwrap();

    let songs = store.list_songs().await.unwrap();
    assert_eq!(songs.len(), 1);
    assert!(!songs[0].is_favorite);

    let id = songs[0].id;
    assert!(store.update_song(id, &write("New", "A", "C,G")).await.unwrap());
    assert!(store.get_song(id).await.unwrap().unwrap().updated_at.is_some());

    // Connecting again leaves the upgraded table alone
    MySqlStore::connect(&settings, 2).await.unwrap();

    drop_tables(&pool).await;
}

#[tokio::test]
#[ignore = "requires a MySQL server (set DB_HOST)"]
async fn test_mysql_matching_and_toggle() {
    let Some(settings) = settings() else {
        eprintln!("DB_HOST not set, skipping");
        return;
    };
    let _guard = DB_LOCK.lock().await;

    let pool = raw_pool(&settings).await;
    drop_tables(&pool).await;

    let store = MySqlStore::connect(&settings, 2).await.unwrap();
    store.seed().await.unwrap();

    // Search is case-insensitive and literal
    let found = store.search_songs("CREEP").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Creep");
    assert!(store.search_songs("%").await.unwrap().is_empty());

    // Artist and chord names compare exactly, case included
    assert_eq!(store.songs_by_artist("Radiohead").await.unwrap().len(), 1);
    assert!(store.songs_by_artist("radiohead").await.unwrap().is_empty());
    assert!(store.get_chord("Am").await.unwrap().is_some());
    assert!(store.get_chord("am").await.unwrap().is_none());

    let catalog = Catalog::new(Arc::new(store));
    let input = serde_json::from_value(serde_json::json!({
        "title": "Seventh",
        "artist": "X",
        "chords": ["Em7"]
    }))
    .unwrap();
    catalog.create_song(input).await.unwrap();
    let titles: Vec<_> = catalog
        .songs_by_chord("Em7")
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.title)
        .collect();
    assert_eq!(titles, vec!["Seventh"]);
    assert!(catalog.songs_by_chord("em7").await.unwrap().is_empty());

    // Toggle alternates
    let creep = catalog.search_songs("Creep").await.unwrap().remove(0);
    assert!(catalog.toggle_favorite(creep.id).await.unwrap().is_favorite);
    assert!(!catalog.toggle_favorite(creep.id).await.unwrap().is_favorite);

    drop_tables(&pool).await;
}
