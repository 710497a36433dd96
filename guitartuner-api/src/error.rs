//! Error types for guitartuner-api
//!
//! Every failure leaves the service as `{"success": false, "error": <message>}`
//! with a non-2xx status. Store failures are logged with their full cause and
//! answered with a short operation message only.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use guitartuner_common::Error as CommonError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("{0}")]
    BadRequest(String),

    /// Resource not found (404)
    #[error("{0}")]
    NotFound(String),

    /// Internal server error (500)
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Map a catalog error, using `context` as the client-facing message for
    /// store failures
    pub fn from_common(err: CommonError, context: &str) -> Self {
        match err {
            CommonError::NotFound(msg) => ApiError::NotFound(msg),
            CommonError::InvalidInput(msg) => ApiError::BadRequest(msg),
            other => {
                error!("{}: {}", context, other);
                ApiError::Internal(context.to_string())
            }
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("Rejected request body: {}", rejection.body_text());
        ApiError::BadRequest("Invalid JSON body".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_failure_hides_detail() {
        let err = ApiError::from_common(
            CommonError::Internal("disk I/O error at page 42".to_string()),
            "Failed to fetch songs",
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Failed to fetch songs");
    }

    #[test]
    fn test_domain_errors_keep_message() {
        let err = ApiError::from_common(
            CommonError::NotFound("Song not found".to_string()),
            "Failed to fetch song",
        );
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Song not found");

        let err = ApiError::from_common(
            CommonError::InvalidInput("Title and artist are required".to_string()),
            "Failed to create song",
        );
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
