//! Song and chord models
//!
//! Wire types (`Song`, `Chord`, `FavoriteStatus`, `SongInput`) serialize with
//! camelCase keys. Storage types (`SongRecord`, `SongWrite`) carry the chord
//! sequence in its encoded, comma-delimited form.

use crate::codec::{decode_chords, deserialize_chords, deserialize_flag, encode_chords};
use crate::{Error, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ========================================
// Songs
// ========================================

/// A song as returned to clients, chords decoded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub chords: Vec<String>,
    pub audio_path: Option<String>,
    pub is_favorite: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
}

/// A song row as read from a store
///
/// The favorite flag is already normalized by the store adapter; `chords` is
/// still in stored form and may be NULL.
#[derive(Debug, Clone, PartialEq)]
pub struct SongRecord {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub chords: Option<String>,
    pub audio_path: Option<String>,
    pub is_favorite: bool,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl From<SongRecord> for Song {
    fn from(record: SongRecord) -> Self {
        Self {
            chords: decode_chords(record.chords.as_deref()),
            id: record.id,
            title: record.title,
            artist: record.artist,
            audio_path: record.audio_path,
            is_favorite: record.is_favorite,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Body of create and update requests
///
/// Every field is optional at the deserialization layer so that a missing
/// title surfaces as a validation error rather than a parse failure. `chords`
/// and `isFavorite` accept any JSON value and are coerced. Snake-case field
/// names are accepted as aliases.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default, deserialize_with = "deserialize_chords")]
    pub chords: Vec<String>,
    #[serde(default, alias = "audio_path")]
    pub audio_path: Option<String>,
    #[serde(default, alias = "is_favorite", deserialize_with = "deserialize_flag")]
    pub is_favorite: bool,
}

impl SongInput {
    /// Validate required fields and encode the chord sequence for storage
    ///
    /// Title and artist must be present and not blank. An empty `audioPath`
    /// is stored as NULL.
    pub fn validate(self) -> Result<SongWrite> {
        let title = self.title.filter(|t| !t.trim().is_empty());
        let artist = self.artist.filter(|a| !a.trim().is_empty());

        let (Some(title), Some(artist)) = (title, artist) else {
            return Err(Error::InvalidInput(
                "Title and artist are required".to_string(),
            ));
        };

        Ok(SongWrite {
            title,
            artist,
            chords: encode_chords(&self.chords),
            audio_path: self.audio_path.filter(|p| !p.is_empty()),
            is_favorite: self.is_favorite,
        })
    }
}

/// Validated song fields ready to be written to a store
///
/// Used for both insert and full-overwrite update.
#[derive(Debug, Clone, PartialEq)]
pub struct SongWrite {
    pub title: String,
    pub artist: String,
    pub chords: String,
    pub audio_path: Option<String>,
    pub is_favorite: bool,
}

/// Result of a favorite toggle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteStatus {
    pub id: i64,
    pub title: String,
    pub is_favorite: bool,
}

// ========================================
// Chords
// ========================================

/// Difficulty label of a chord diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DifficultyLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl DifficultyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLevel::Beginner => "Beginner",
            DifficultyLevel::Intermediate => "Intermediate",
            DifficultyLevel::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DifficultyLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Beginner" => Ok(DifficultyLevel::Beginner),
            "Intermediate" => Ok(DifficultyLevel::Intermediate),
            "Advanced" => Ok(DifficultyLevel::Advanced),
            other => Err(Error::Internal(format!(
                "Unknown difficulty level: {}",
                other
            ))),
        }
    }
}

/// Chord diagram reference row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chord {
    pub id: i64,
    pub name: String,
    pub image_path: String,
    pub description: Option<String>,
    pub difficulty_level: DifficultyLevel,
}
