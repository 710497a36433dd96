//! Integration tests for the SQLite store adapter and bootstrap
//!
//! File-backed tests use a temporary directory so every test gets its own
//! database.

use guitartuner_common::db::{init_database, SAMPLE_CHORDS, SAMPLE_SONGS};
use guitartuner_common::models::{DifficultyLevel, SongInput, SongWrite};
use guitartuner_common::store::SqliteStore;
use guitartuner_common::{Catalog, Error, Store};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

fn write(title: &str, artist: &str, chords: &str) -> SongWrite {
    SongWrite {
        title: title.to_string(),
        artist: artist.to_string(),
        chords: chords.to_string(),
        audio_path: None,
        is_favorite: false,
    }
}

async fn seeded_store() -> SqliteStore {
    let store = SqliteStore::in_memory().await.unwrap();
    store.seed().await.unwrap();
    store
}

#[tokio::test]
async fn test_database_file_created_in_missing_directory() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("nested").join("guitartuner.db");

    let result = init_database(&db_path, 2).await;
    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_seed_runs_once_across_reopen() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("guitartuner.db");

    let first = SqliteStore::open(&db_path, 2).await.unwrap();
    let report = first.seed().await.unwrap();
    assert_eq!(report.songs, SAMPLE_SONGS.len());
    assert_eq!(report.chords, SAMPLE_CHORDS.len());
    first.pool().close().await;

    let second = SqliteStore::open(&db_path, 2).await.unwrap();
    let report = second.seed().await.unwrap();
    assert_eq!(report.songs, 0);
    assert_eq!(report.chords, 0);

    assert_eq!(second.list_songs().await.unwrap().len(), SAMPLE_SONGS.len());
    assert_eq!(second.list_chords().await.unwrap().len(), SAMPLE_CHORDS.len());
}

#[tokio::test]
async fn test_seed_skips_populated_table_only() {
    let store = SqliteStore::in_memory().await.unwrap();
    store.insert_song(&write("Mine", "Me", "C")).await.unwrap();

    let report = store.seed().await.unwrap();
    assert_eq!(report.songs, 0);
    assert_eq!(report.chords, SAMPLE_CHORDS.len());
    assert_eq!(store.list_songs().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_songs_newest_first() {
    let store = SqliteStore::in_memory().await.unwrap();
    let first = store.insert_song(&write("First", "A", "C")).await.unwrap();
    let second = store.insert_song(&write("Second", "B", "G")).await.unwrap();

    // Same-second timestamps fall back to id order
    let ids: Vec<_> = store.list_songs().await.unwrap().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![second, first]);
}

#[tokio::test]
async fn test_insert_stores_defaults() {
    let store = SqliteStore::in_memory().await.unwrap();
    let id = store.insert_song(&write("Bare", "Nobody", "")).await.unwrap();

    let record = store.get_song(id).await.unwrap().unwrap();
    assert_eq!(record.chords.as_deref(), Some(""));
    assert_eq!(record.audio_path, None);
    assert!(!record.is_favorite);
    assert!(record.created_at.is_some());
}

#[tokio::test]
async fn test_update_and_delete_report_missing_rows() {
    let store = SqliteStore::in_memory().await.unwrap();
    let id = store.insert_song(&write("Song", "Artist", "C")).await.unwrap();

    assert!(store.update_song(id, &write("Song 2", "Artist", "D")).await.unwrap());
    assert!(!store.update_song(id + 100, &write("X", "Y", "")).await.unwrap());

    assert!(store.delete_song(id).await.unwrap());
    assert!(!store.delete_song(id).await.unwrap());
    assert!(store.get_song(id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_search_is_case_insensitive_on_title_and_artist() {
    let store = seeded_store().await;

    let by_title = store.search_songs("creep").await.unwrap();
    assert_eq!(by_title.len(), 1);
    assert_eq!(by_title[0].title, "Creep");

    let by_artist = store.search_songs("PINK").await.unwrap();
    assert!(by_artist.iter().all(|s| s.artist == "Pink Floyd"));
    assert!(!by_artist.is_empty());

    assert!(store.search_songs("no such song").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_treats_wildcards_literally() {
    let store = SqliteStore::in_memory().await.unwrap();
    store.insert_song(&write("100% Pure", "A", "C")).await.unwrap();
    store.insert_song(&write("1000 Miles", "B", "G")).await.unwrap();

    let titles: Vec<_> = store
        .search_songs("100%")
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.title)
        .collect();
    assert_eq!(titles, vec!["100% Pure"]);

    assert!(store.search_songs("_").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_songs_by_artist_is_exact() {
    let store = seeded_store().await;

    let songs = store.songs_by_artist("Radiohead").await.unwrap();
    assert_eq!(songs.len(), 1);
    assert!(store.songs_by_artist("radiohead").await.unwrap().is_empty());
    assert!(store.songs_by_artist("Radio").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_songs_by_artist_sorted_by_title() {
    let store = SqliteStore::in_memory().await.unwrap();
    store.insert_song(&write("Zebra", "Band", "C")).await.unwrap();
    store.insert_song(&write("Apple", "Band", "C")).await.unwrap();

    let titles: Vec<_> = store
        .songs_by_artist("Band")
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.title)
        .collect();
    assert_eq!(titles, vec!["Apple", "Zebra"]);
}

#[tokio::test]
async fn test_chord_prefilter_and_exact_filter() {
    let store = SqliteStore::in_memory().await.unwrap();
    store.insert_song(&write("Seventh", "X", "Em7")).await.unwrap();
    store.insert_song(&write("Plain", "Y", "A,E,B")).await.unwrap();

    // The adapter returns substring candidates
    assert_eq!(store.songs_matching_chord("E").await.unwrap().len(), 2);

    // The catalog keeps exact elements only
    let catalog = Catalog::new(Arc::new(store));
    let songs = catalog.songs_by_chord("E").await.unwrap();
    assert_eq!(songs.len(), 1);
    assert_eq!(songs[0].title, "Plain");
}

#[tokio::test]
async fn test_favorite_flag_round_trip() {
    let store = SqliteStore::in_memory().await.unwrap();
    let id = store.insert_song(&write("Fav", "A", "C")).await.unwrap();

    assert_eq!(store.get_favorite(id).await.unwrap(), Some(false));
    assert!(store.set_favorite(id, true).await.unwrap());
    assert_eq!(store.get_favorite(id).await.unwrap(), Some(true));

    let favorites = store.list_favorite_songs().await.unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].id, id);

    assert_eq!(store.get_favorite(id + 1).await.unwrap(), None);
    assert!(!store.set_favorite(id + 1, true).await.unwrap());
}

#[tokio::test]
async fn test_legacy_favorite_values_normalize() {
    let store = SqliteStore::in_memory().await.unwrap();
    sqlx::query("INSERT INTO songs (title, artist, chords, is_favorite) VALUES ('Old', 'A', 'C', 2)")
        .execute(store.pool())
        .await
        .unwrap();

    let all = store.list_songs().await.unwrap();
    assert!(all[0].is_favorite);

    let favorites = store.list_favorite_songs().await.unwrap();
    assert_eq!(favorites.len(), 1);
}

#[tokio::test]
async fn test_chords_sorted_and_case_sensitive() {
    let store = seeded_store().await;

    let names: Vec<_> = store
        .list_chords()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);

    let am = store.get_chord("Am").await.unwrap().unwrap();
    assert_eq!(am.difficulty_level, DifficultyLevel::Beginner);
    assert!(store.get_chord("am").await.unwrap().is_none());
    assert!(store.get_chord("H").await.unwrap().is_none());
}

#[tokio::test]
async fn test_catalog_over_sqlite_toggle_and_create() {
    let catalog = Catalog::new(Arc::new(seeded_store().await));

    let input: SongInput = serde_json::from_value(json!({
        "title": "Test",
        "artist": "T",
        "chords": ["C", "G"],
        "audioPath": ""
    }))
    .unwrap();
    let song = catalog.create_song(input).await.unwrap();
    assert_eq!(song.chords, vec!["C", "G"]);
    assert_eq!(song.audio_path, None);

    let toggled = catalog.toggle_favorite(song.id).await.unwrap();
    assert!(toggled.is_favorite);
    let toggled = catalog.toggle_favorite(song.id).await.unwrap();
    assert!(!toggled.is_favorite);

    catalog.delete_song(song.id).await.unwrap();
    assert!(matches!(catalog.get_song(song.id).await, Err(Error::NotFound(_))));
}
