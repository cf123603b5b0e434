//! tutor-api library - AI Guitar Tutor HTTP backend
//!
//! Read-only song/chord catalog lookups, chord-diagram asset serving,
//! and the placeholder audio-upload endpoint.

use axum::http::{header::CONTENT_TYPE, Method};
use axum::Router;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tutor_common::Catalog;

pub mod api;
pub mod config;

/// Application state shared across HTTP handlers
///
/// The catalog is loaded once at startup and never mutated, so handlers
/// only ever take shared references through the `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Immutable song/diagram lookup tables
    pub catalog: Arc<Catalog>,
    /// Directory uploaded audio blobs are written to
    pub uploads_dir: PathBuf,
    /// Directory chord-diagram images are served from
    pub diagrams_dir: PathBuf,
}

impl AppState {
    /// Create new application state
    pub fn new(catalog: Catalog, uploads_dir: PathBuf, diagrams_dir: PathBuf) -> Self {
        Self {
            catalog: Arc::new(catalog),
            uploads_dir,
            diagrams_dir,
        }
    }
}

/// Build application router
///
/// CORS mirrors the front end's expectations: any origin, GET/POST,
/// Content-Type header.
pub fn build_router(state: AppState) -> Router {
    use axum::extract::DefaultBodyLimit;
    use axum::routing::{get, post};

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/", get(api::liveness))
        .route("/search-song/:song", get(api::search_song))
        .route("/chords/:name", get(api::get_song_or_diagram))
        .route("/upload", post(api::receive_audio))
        .merge(api::health_routes())
        // Audio files routinely exceed axum's 2 MB default body limit
        .layer(DefaultBodyLimit::max(50 * 1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
