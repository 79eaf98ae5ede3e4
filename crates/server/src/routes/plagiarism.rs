use crate::error::ServerResult;
use crate::routes::files::{one_or_many, FileResult, UploadForm};
use crate::state::ServerState;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use axum::response::Response;
use axum::Json;
use futures::future::try_join_all;
use serde::Deserialize;
use std::sync::Arc;
use textlens::PlagiarismResult;

/// Request body for `POST /plagiarism/detect`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub shingle_size: Option<i64>,
    #[serde(default)]
    pub sample_step: Option<i64>,
}

/// Plagiarism score and potential sources for a JSON text body.
///
/// # Example
/// ```json
/// // Request
/// { "text": "The quick brown fox ...", "shingleSize": 5, "sampleStep": 5 }
/// // Response
/// { "score": 0.5, "potentialSources": [{ "url": "https://...", "matchedShingles": ["..."] }] }
/// ```
pub async fn detect(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<DetectRequest>, JsonRejection>,
) -> ServerResult<Json<PlagiarismResult>> {
    let Json(request) = payload?;
    let defaults = &state.config.analysis;
    let shingle_size = request.shingle_size.unwrap_or(defaults.default_shingle_size);
    let sample_step = request.sample_step.unwrap_or(defaults.default_sample_step);
    let text = request.text.unwrap_or_default();

    // Size and step are validated before the text.
    let result = textlens::detect_text(&text, &state.detector, shingle_size, sample_step).await?;
    Ok(Json(result))
}

/// Plagiarism detection for each uploaded file.
///
/// Files are checked concurrently; the response keeps upload order.
pub async fn detect_file(
    State(state): State<Arc<ServerState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ServerResult<Response> {
    let form = UploadForm::read(multipart).await?;
    let defaults = &state.config.analysis;
    let shingle_size = form.int_field("shingleSize", defaults.default_shingle_size)?;
    let sample_step = form.int_field("sampleStep", defaults.default_sample_step)?;
    let files = form.into_files()?;

    let results = try_join_all(files.into_iter().map(|upload| {
        let state = state.clone();
        async move {
            let (file, result) = textlens::detect_file(
                upload,
                &state.files,
                &state.detector,
                shingle_size,
                sample_step,
            )
            .await?;
            Ok::<_, textlens::PipelineError>(FileResult {
                file_name: file.file_name,
                result,
            })
        }
    }))
    .await?;

    Ok(one_or_many(results))
}
