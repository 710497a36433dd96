//! Storage adapter interface
//!
//! The catalog talks to persistence only through [`Store`]. Each backend
//! supplies an adapter that issues parameterized statements and hands back
//! rows with the favorite flag already normalized to `bool`. Chord transcoding
//! and the exact chord filter stay in the catalog so every backend shares them.
//!
//! Every method maps to one statement, so each call is atomic on its own. No
//! method opens a transaction spanning calls.

use crate::models::{Chord, SongRecord, SongWrite};
use crate::Result;
use async_trait::async_trait;

pub mod sqlite;
#[cfg(feature = "mysql")]
pub mod mysql;

pub use sqlite::SqliteStore;
#[cfg(feature = "mysql")]
pub use mysql::MySqlStore;

/// Persistence backend holding the `songs` and `chords` tables
#[async_trait]
pub trait Store: Send + Sync {
    /// All songs, newest first (creation time, then id, descending)
    async fn list_songs(&self) -> Result<Vec<SongRecord>>;

    async fn get_song(&self, id: i64) -> Result<Option<SongRecord>>;

    /// Songs with the favorite flag set, by title
    async fn list_favorite_songs(&self) -> Result<Vec<SongRecord>>;

    /// Insert a song and return the id assigned by the store
    async fn insert_song(&self, song: &SongWrite) -> Result<i64>;

    /// Overwrite every field of a song; false when no row has `id`
    async fn update_song(&self, id: i64, song: &SongWrite) -> Result<bool>;

    /// Delete a song; false when no row has `id`
    async fn delete_song(&self, id: i64) -> Result<bool>;

    /// Case-insensitive substring match on title or artist, by title
    ///
    /// `query` is literal text: LIKE wildcards in it are escaped.
    async fn search_songs(&self, query: &str) -> Result<Vec<SongRecord>>;

    /// Exact artist match, by title
    async fn songs_by_artist(&self, artist: &str) -> Result<Vec<SongRecord>>;

    /// Candidate songs whose stored chord string contains `chord`, by title
    ///
    /// This is a prefilter only. Candidates may include songs that merely
    /// contain `chord` as part of a longer name.
    async fn songs_matching_chord(&self, chord: &str) -> Result<Vec<SongRecord>>;

    /// Current favorite flag, or None when no row has `id`
    async fn get_favorite(&self, id: i64) -> Result<Option<bool>>;

    /// Write the favorite flag; false when no row has `id`
    async fn set_favorite(&self, id: i64, favorite: bool) -> Result<bool>;

    /// All chord diagrams, by name
    async fn list_chords(&self) -> Result<Vec<Chord>>;

    /// Exact, case-sensitive chord name lookup
    async fn get_chord(&self, name: &str) -> Result<Option<Chord>>;
}

/// Build a `%...%` LIKE pattern matching `text` literally
///
/// Backslash is the escape character; the statement must accept it as such.
pub fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
