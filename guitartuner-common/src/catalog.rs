//! Song and chord catalog
//!
//! Store-agnostic operations behind every HTTP endpoint: input validation,
//! chord transcoding, the exact chord filter and the favorite toggle. Lookups
//! that find nothing return [`Error::NotFound`]; invalid input returns
//! [`Error::InvalidInput`]; store failures pass through unchanged.

use crate::codec::contains_chord;
use crate::models::{Chord, FavoriteStatus, Song, SongInput, SongRecord};
use crate::store::Store;
use crate::{Error, Result};
use std::sync::Arc;
use tracing::{debug, info};

fn song_not_found() -> Error {
    Error::NotFound("Song not found".to_string())
}

fn decode_all(records: Vec<SongRecord>) -> Vec<Song> {
    records.into_iter().map(Song::from).collect()
}

/// Catalog operations over an injected [`Store`]
#[derive(Clone)]
pub struct Catalog {
    store: Arc<dyn Store>,
}

impl Catalog {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// All songs, newest first
    pub async fn list_songs(&self) -> Result<Vec<Song>> {
        let songs = decode_all(self.store.list_songs().await?);
        debug!("Listed {} songs", songs.len());
        Ok(songs)
    }

    pub async fn get_song(&self, id: i64) -> Result<Song> {
        self.store
            .get_song(id)
            .await?
            .map(Song::from)
            .ok_or_else(song_not_found)
    }

    /// Favorite songs, by title
    pub async fn list_favorites(&self) -> Result<Vec<Song>> {
        Ok(decode_all(self.store.list_favorite_songs().await?))
    }

    /// Validate and insert a song, returning it as stored
    pub async fn create_song(&self, input: SongInput) -> Result<Song> {
        let write = input.validate()?;
        let id = self.store.insert_song(&write).await?;
        info!("Created song {} ({} - {})", id, write.artist, write.title);
        self.get_song(id).await
    }

    /// Overwrite every field of an existing song
    ///
    /// Fields missing from `input` are written with their defaults (empty
    /// chords, no audio path, not a favorite); there is no partial update.
    pub async fn update_song(&self, id: i64, input: SongInput) -> Result<Song> {
        let write = input.validate()?;
        if !self.store.update_song(id, &write).await? {
            return Err(song_not_found());
        }
        info!("Updated song {}", id);
        self.get_song(id).await
    }

    /// Delete a song, returning its id
    pub async fn delete_song(&self, id: i64) -> Result<i64> {
        if !self.store.delete_song(id).await? {
            return Err(song_not_found());
        }
        info!("Deleted song {}", id);
        Ok(id)
    }

    /// Case-insensitive substring search on title or artist
    ///
    /// No match is an empty list, not an error.
    pub async fn search_songs(&self, query: &str) -> Result<Vec<Song>> {
        let songs = decode_all(self.store.search_songs(query).await?);
        debug!("Search '{}' matched {} songs", query, songs.len());
        Ok(songs)
    }

    pub async fn songs_by_artist(&self, artist: &str) -> Result<Vec<Song>> {
        Ok(decode_all(self.store.songs_by_artist(artist).await?))
    }

    /// Songs whose chord sequence contains `chord` as a whole element
    pub async fn songs_by_chord(&self, chord: &str) -> Result<Vec<Song>> {
        let candidates = self.store.songs_matching_chord(chord).await?;
        Ok(candidates
            .into_iter()
            .filter(|record| contains_chord(record.chords.as_deref(), chord))
            .map(Song::from)
            .collect())
    }

    /// Flip the favorite flag and report the new value
    ///
    /// Read-modify-write across separate statements with no transaction: two
    /// concurrent toggles of the same song may both read the same value, in
    /// which case the last write wins.
    pub async fn toggle_favorite(&self, id: i64) -> Result<FavoriteStatus> {
        let current = self.store.get_favorite(id).await?.ok_or_else(song_not_found)?;

        if !self.store.set_favorite(id, !current).await? {
            return Err(song_not_found());
        }

        let song = self.get_song(id).await?;
        info!("Song {} favorite = {}", id, song.is_favorite);

        Ok(FavoriteStatus {
            id: song.id,
            title: song.title,
            is_favorite: song.is_favorite,
        })
    }

    /// All chord diagrams, by name
    pub async fn list_chords(&self) -> Result<Vec<Chord>> {
        self.store.list_chords().await
    }

    pub async fn get_chord(&self, name: &str) -> Result<Chord> {
        self.store
            .get_chord(name)
            .await?
            .ok_or_else(|| Error::NotFound("Chord not found".to_string()))
    }
}
