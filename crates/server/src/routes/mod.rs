//! API route handlers
//!
//! Routes are organized by functionality:
//!
//! - `health`: Health checks and metrics
//! - `text`: Word frequencies and shingles for JSON text bodies
//! - `files`: Multipart upload parsing and the file variants of `text`
//! - `plagiarism`: Plagiarism detection for text and files

pub mod files;
pub mod health;
pub mod plagiarism;
pub mod text;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// Returns server information including version and available endpoints.
///
/// # Response
///
/// ```json
/// {
///   "name": "textlens",
///   "version": "0.1.0",
///   "endpoints": ["..."]
/// }
/// ```
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "textlens",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "POST /text/analyze",
            "POST /text/shingles",
            "POST /plagiarism/detect",
            "POST /file/analyze",
            "POST /file/shingles",
            "POST /plagiarism/detect/file",
            "GET /health",
            "GET /metrics"
        ]
    })))
}

/// 404 Not Found handler
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}

/// Returns the text when it has non-whitespace content.
pub(crate) fn require_text(text: Option<String>) -> ServerResult<String> {
    match text {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(textlens::AnalysisError::EmptyText.into()),
    }
}
