//! guitartuner-api library - HTTP service for songs and chord diagrams
//!
//! The router is built over an [`AppState`] holding the catalog, so tests can
//! inject any [`Store`] implementation.

use std::sync::Arc;

use axum::http::{header, Method};
use axum::Router;
use guitartuner_common::{Catalog, Store};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;

pub use error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            catalog: Catalog::new(store),
        }
    }
}

/// Cross-origin policy: any origin, the methods the API uses, JSON bodies
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Build application router
///
/// Literal sub-paths under `/songs` are registered ahead of `/songs/:id`.
/// Unmatched paths get the JSON error envelope with 404.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, patch};

    let songs = Router::new()
        .route("/songs", get(api::list_songs).post(api::create_song))
        .route("/songs/favorites", get(api::list_favorites))
        .route("/songs/favorites/list", get(api::list_favorites))
        .route("/songs/search/:query", get(api::search_songs))
        .route(
            "/songs/:id",
            get(api::get_song)
                .put(api::update_song)
                .delete(api::delete_song),
        )
        .route("/songs/:id/favorite", patch(api::toggle_favorite))
        .route("/artists/:artist/songs", get(api::songs_by_artist));

    let chords = Router::new()
        .route("/chords", get(api::list_chords))
        .route("/chords/:name", get(api::get_chord))
        .route("/chords/:name/songs", get(api::songs_by_chord));

    Router::new()
        .merge(api::health_routes())
        .merge(songs)
        .merge(chords)
        .fallback(api::route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer()),
        )
        .with_state(state)
}
