use crate::error::ServerResult;
use crate::routes::require_text;
use crate::state::ServerState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use textlens::{ShingleStats, TokenStats};

/// Request body for `POST /text/analyze`
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Request body for `POST /text/shingles`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShinglesRequest {
    #[serde(default)]
    pub text: Option<String>,

    /// Shingle size; the configured default when omitted
    #[serde(default)]
    pub k: Option<i64>,

    /// Also return the ordered, non-deduplicated shingle list
    #[serde(default)]
    pub include_shingles: bool,
}

/// Shingle statistics, optionally with the raw shingle list
#[derive(Debug, Serialize, Deserialize)]
pub struct ShinglesResponse {
    #[serde(flatten)]
    pub stats: ShingleStats,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shingles: Option<Vec<String>>,
}

/// Word-frequency statistics for a JSON text body.
pub async fn analyze(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> ServerResult<Json<TokenStats>> {
    let Json(request) = payload?;
    let text = require_text(request.text)?;
    Ok(Json(textlens::analyze_text(&text, &state.tokenizer)))
}

/// `k`-shingle statistics for a JSON text body.
pub async fn shingles(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<ShinglesRequest>, JsonRejection>,
) -> ServerResult<Json<ShinglesResponse>> {
    let Json(request) = payload?;
    let text = require_text(request.text)?;
    let k = request.k.unwrap_or(state.config.analysis.default_k);

    let shingles = textlens::shingle_text(&text, k, &state.shingles)?;
    let stats = shingles.stats();
    let raw = request.include_shingles.then(|| shingles.into_vec());

    Ok(Json(ShinglesResponse {
        stats,
        shingles: raw,
    }))
}
