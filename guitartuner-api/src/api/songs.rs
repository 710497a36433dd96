//! Song endpoints
//!
//! CRUD, search, artist listing, favorites and the favorite toggle. Song ids
//! that are not integers can never match a row and are answered with 404.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use guitartuner_common::models::{FavoriteStatus, Song, SongInput};
use serde::Serialize;

use super::envelope::ApiResponse;
use super::params::{PathText, SongId};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Deleted {
    pub deleted_id: i64,
}

/// GET /songs
pub async fn list_songs(State(state): State<AppState>) -> ApiResult<ApiResponse<Vec<Song>>> {
    let songs = state
        .catalog
        .list_songs()
        .await
        .map_err(|e| ApiError::from_common(e, "Failed to fetch songs"))?;

    Ok(ApiResponse::list(songs))
}

/// GET /songs/:id
pub async fn get_song(
    State(state): State<AppState>,
    SongId(id): SongId,
) -> ApiResult<ApiResponse<Song>> {
    let song = state
        .catalog
        .get_song(id)
        .await
        .map_err(|e| ApiError::from_common(e, "Failed to fetch song"))?;

    Ok(ApiResponse::ok(song))
}

/// GET /songs/favorites
pub async fn list_favorites(State(state): State<AppState>) -> ApiResult<ApiResponse<Vec<Song>>> {
    let songs = state
        .catalog
        .list_favorites()
        .await
        .map_err(|e| ApiError::from_common(e, "Failed to fetch favorite songs"))?;

    Ok(ApiResponse::list(songs))
}

/// POST /songs
pub async fn create_song(
    State(state): State<AppState>,
    payload: Result<Json<SongInput>, JsonRejection>,
) -> ApiResult<ApiResponse<Song>> {
    let Json(input) = payload?;

    let song = state
        .catalog
        .create_song(input)
        .await
        .map_err(|e| ApiError::from_common(e, "Failed to create song"))?;

    Ok(ApiResponse::ok(song)
        .with_status(StatusCode::CREATED)
        .with_message("Song created successfully"))
}

/// PUT /songs/:id
///
/// Overwrites every field; omitted fields take their defaults.
pub async fn update_song(
    State(state): State<AppState>,
    SongId(id): SongId,
    payload: Result<Json<SongInput>, JsonRejection>,
) -> ApiResult<ApiResponse<Song>> {
    let Json(input) = payload?;

    let song = state
        .catalog
        .update_song(id, input)
        .await
        .map_err(|e| ApiError::from_common(e, "Failed to update song"))?;

    Ok(ApiResponse::ok(song).with_message("Song updated successfully"))
}

/// DELETE /songs/:id
pub async fn delete_song(
    State(state): State<AppState>,
    SongId(id): SongId,
) -> ApiResult<ApiResponse<Deleted>> {
    let deleted_id = state
        .catalog
        .delete_song(id)
        .await
        .map_err(|e| ApiError::from_common(e, "Failed to delete song"))?;

    Ok(ApiResponse::ok(Deleted { deleted_id }).with_message("Song deleted successfully"))
}

/// GET /songs/search/:query
pub async fn search_songs(
    State(state): State<AppState>,
    PathText(query): PathText,
) -> ApiResult<ApiResponse<Vec<Song>>> {
    let songs = state
        .catalog
        .search_songs(&query)
        .await
        .map_err(|e| ApiError::from_common(e, "Failed to search songs"))?;

    Ok(ApiResponse::list(songs))
}

/// GET /artists/:artist/songs
pub async fn songs_by_artist(
    State(state): State<AppState>,
    PathText(artist): PathText,
) -> ApiResult<ApiResponse<Vec<Song>>> {
    let songs = state
        .catalog
        .songs_by_artist(&artist)
        .await
        .map_err(|e| ApiError::from_common(e, "Failed to fetch songs by artist"))?;

    Ok(ApiResponse::list(songs))
}

/// PATCH /songs/:id/favorite
pub async fn toggle_favorite(
    State(state): State<AppState>,
    SongId(id): SongId,
) -> ApiResult<ApiResponse<FavoriteStatus>> {
    let status = state
        .catalog
        .toggle_favorite(id)
        .await
        .map_err(|e| ApiError::from_common(e, "Failed to update favorite status"))?;

    Ok(ApiResponse::ok(status).with_message("Favorite status updated"))
}
