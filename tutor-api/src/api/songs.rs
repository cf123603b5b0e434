//! Song catalog lookups and chord-diagram asset serving
//!
//! Two lookup flavors exist: substring search (`/search-song/:song`) and
//! exact-key fetch (`/chords/:name`). The `/chords` path doubles as the
//! asset root for diagram images, so the exact-key handler falls through
//! to file serving when the name carries a file extension.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::debug;
use tutor_common::catalog::SongDetail;

use crate::AppState;

/// GET /search-song/:song
///
/// Case-insensitive substring search over song keys. When several songs
/// contain the query, the lexicographically-first key wins.
pub async fn search_song(
    State(state): State<AppState>,
    Path(song): Path<String>,
) -> Result<Json<SongDetail>, LookupError> {
    debug!("Song search: {}", song);

    state
        .catalog
        .search_song(&song)
        .map(Json)
        .ok_or(LookupError::SearchMiss)
}

/// GET /chords/:name
///
/// Exact-key song lookup, with each chord annotated with its diagram
/// path. Names carrying a file extension are treated as diagram asset
/// requests and served from the diagrams folder instead.
pub async fn get_song_or_diagram(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, LookupError> {
    debug!("Received request for song: {}", name);

    if let Some(detail) = state.catalog.get_song(&name) {
        return Ok(Json(detail).into_response());
    }

    if name.contains('.') {
        return serve_diagram(&state, &name).await;
    }

    Err(LookupError::SongMiss)
}

/// Serve a diagram image from the diagrams folder.
///
/// The route parameter is a single path segment, but percent-encoded
/// separators survive decoding, so traversal characters are rejected
/// before touching the filesystem.
async fn serve_diagram(state: &AppState, name: &str) -> Result<Response, LookupError> {
    if name.contains("..") || name.contains('/') || name.contains('\\') {
        return Err(LookupError::InvalidAssetName);
    }

    let path = state.diagrams_dir.join(name);
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| LookupError::DiagramMiss)?;

    let content_type = match path.extension().and_then(|e| e.to_str()) {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    };

    Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}

/// Lookup errors
#[derive(Debug)]
pub enum LookupError {
    SearchMiss,
    SongMiss,
    DiagramMiss,
    InvalidAssetName,
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            LookupError::SearchMiss => (
                StatusCode::NOT_FOUND,
                json!({ "message": "Song not found in our database." }),
            ),
            LookupError::SongMiss => (
                StatusCode::NOT_FOUND,
                json!({ "message": "Song not found." }),
            ),
            LookupError::DiagramMiss => (
                StatusCode::NOT_FOUND,
                json!({ "message": "Diagram not found." }),
            ),
            LookupError::InvalidAssetName => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid asset name" }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
