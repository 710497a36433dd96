//! Service banner, health check and unmatched-route fallback

use axum::{routing::get, Json, Router};
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::AppState;

/// Health check response: status, module name and version
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
}

/// GET /
pub async fn banner() -> Json<Value> {
    Json(json!({ "message": "Guitar Tuner Backend API is running!" }))
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "guitartuner-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Fallback for requests matching no route
pub async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route not found".to_string())
}

/// Build banner and health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(banner))
        .route("/health", get(health_check))
}
