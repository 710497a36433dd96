//! Chord reference endpoints

use axum::extract::State;
use guitartuner_common::models::{Chord, Song};

use super::envelope::ApiResponse;
use super::params::PathText;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// GET /chords
pub async fn list_chords(State(state): State<AppState>) -> ApiResult<ApiResponse<Vec<Chord>>> {
    let chords = state
        .catalog
        .list_chords()
        .await
        .map_err(|e| ApiError::from_common(e, "Failed to fetch chords"))?;

    Ok(ApiResponse::list(chords))
}

/// GET /chords/:name
///
/// Names are matched exactly, case included.
pub async fn get_chord(
    State(state): State<AppState>,
    PathText(name): PathText,
) -> ApiResult<ApiResponse<Chord>> {
    let chord = state
        .catalog
        .get_chord(&name)
        .await
        .map_err(|e| ApiError::from_common(e, "Failed to fetch chord"))?;

    Ok(ApiResponse::ok(chord))
}

/// GET /chords/:name/songs
pub async fn songs_by_chord(
    State(state): State<AppState>,
    PathText(name): PathText,
) -> ApiResult<ApiResponse<Vec<Song>>> {
    let songs = state
        .catalog
        .songs_by_chord(&name)
        .await
        .map_err(|e| ApiError::from_common(e, "Failed to fetch songs by chord"))?;

    Ok(ApiResponse::list(songs))
}
