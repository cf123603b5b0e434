//! Audio upload endpoint (placeholder analysis)
//!
//! Accepts a multipart upload, stores the bytes, and answers with fixed
//! tempo/key/chord values. The analysis result is a stub contract: it is
//! never derived from the uploaded audio, and a real implementation must
//! replace the constants with actual signal analysis.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use std::path::Path;
use tracing::{error, info};
use uuid::Uuid;

use crate::AppState;

/// Fixed analysis values returned for every upload
const STUB_TEMPO: &str = "112.35 BPM";
const STUB_KEY: &str = "C";
const STUB_CHORDS: [&str; 3] = ["B", "C", "G"];

/// Upload response: stored filename plus the stub analysis result
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub filename: String,
    pub tempo: String,
    pub key: String,
    pub chords: Vec<String>,
    pub message: String,
}

/// POST /upload
///
/// Multipart form with an `audio` file field. The payload is written to
/// the uploads folder under a random v4 UUID name (keeping the original
/// extension), so concurrent uploads cannot collide.
pub async fn receive_audio(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, UploadError> {
    let mut stored: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::Internal(e.to_string()))?
    {
        if field.name() != Some("audio") {
            continue;
        }

        let original_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| UploadError::Internal(e.to_string()))?;

        if bytes.is_empty() {
            return Err(UploadError::NoFile);
        }

        let filename = stored_filename(&original_name);
        let dest = state.uploads_dir.join(&filename);
        tokio::fs::write(&dest, &bytes).await.map_err(|e| {
            error!("Failed to store upload at {}: {}", dest.display(), e);
            UploadError::Internal(e.to_string())
        })?;

        info!(
            "✓ File uploaded: {} ({} bytes, originally {:?})",
            filename,
            bytes.len(),
            original_name
        );
        stored = Some(filename);
        break;
    }

    let filename = stored.ok_or(UploadError::NoFile)?;

    Ok(Json(UploadResponse {
        filename,
        tempo: STUB_TEMPO.to_string(),
        key: STUB_KEY.to_string(),
        chords: STUB_CHORDS.iter().map(|c| c.to_string()).collect(),
        message: "File uploaded successfully".to_string(),
    }))
}

/// Collision-free stored name: random UUID plus the original extension
fn stored_filename(original_name: &str) -> String {
    match Path::new(original_name).extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
        None => Uuid::new_v4().to_string(),
    }
}

/// Upload errors
#[derive(Debug)]
pub enum UploadError {
    NoFile,
    Internal(String),
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            UploadError::NoFile => (StatusCode::BAD_REQUEST, "No file uploaded".to_string()),
            UploadError::Internal(msg) => {
                error!("Upload processing error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server Error".to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_filename_keeps_extension() {
        let name = stored_filename("riff.mp3");
        assert!(name.ends_with(".mp3"));
        // uuid (36 chars) + ".mp3"
        assert_eq!(name.len(), 40);
    }

    #[test]
    fn stored_filename_without_extension() {
        let name = stored_filename("riff");
        assert_eq!(name.len(), 36);
    }

    #[test]
    fn stored_filenames_are_unique() {
        assert_ne!(stored_filename("a.wav"), stored_filename("a.wav"));
    }
}
