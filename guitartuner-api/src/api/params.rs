//! Path segment extractors
//!
//! Both map axum's path rejections into [`ApiError`] so malformed segments
//! (bad percent-encoding, invalid UTF-8) still answer with the JSON envelope.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use tracing::debug;

use crate::error::ApiError;

/// Song id path segment
///
/// Ids that are not integers can never match a row and are answered with 404.
#[derive(Debug, Clone, Copy)]
pub struct SongId(pub i64);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for SongId {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let not_found = || ApiError::NotFound("Song not found".to_string());

        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| not_found())?;

        raw.trim().parse().map(SongId).map_err(|_| not_found())
    }
}

/// Free-text path segment (search query, artist, chord name), percent-decoded
#[derive(Debug, Clone)]
pub struct PathText(pub String);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for PathText {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(text)) => Ok(PathText(text)),
            Err(rejection) => {
                debug!("Rejected path segment: {}", rejection.body_text());
                Err(ApiError::BadRequest("Invalid path parameter".to_string()))
            }
        }
    }
}
