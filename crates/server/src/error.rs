use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use textlens::{AnalysisError, DetectError, IngestError, PipelineError};
use tower::timeout::error::Elapsed;
use tower::BoxError;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Request body is too large")]
    PayloadTooLarge,

    #[error("Request timeout")]
    Timeout,

    #[error("Not found")]
    NotFound,

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Detect(#[from] DetectError),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// API error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn detect_status(err: &DetectError) -> StatusCode {
    match err {
        DetectError::InvalidConfig(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    }
}

impl ServerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_)
            | ServerError::Ingest(_)
            | ServerError::Analysis(_) => StatusCode::BAD_REQUEST,
            ServerError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Detect(err) => detect_status(err),
            ServerError::Pipeline(PipelineError::Detect(err)) => detect_status(err),
            ServerError::Pipeline(_) => StatusCode::BAD_REQUEST,
            ServerError::Internal(_) | ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => ServerError::PayloadTooLarge,
            _ => ServerError::BadRequest(rejection.body_text()),
        }
    }
}

impl From<MultipartRejection> for ServerError {
    fn from(_: MultipartRejection) -> Self {
        ServerError::BadRequest("Expected multipart/form-data".to_string())
    }
}

impl From<BoxError> for ServerError {
    fn from(err: BoxError) -> Self {
        if err.is::<Elapsed>() {
            ServerError::Timeout
        } else {
            ServerError::Internal(err.to_string())
        }
    }
}

impl From<MultipartError> for ServerError {
    fn from(err: MultipartError) -> Self {
        match err.status() {
            StatusCode::PAYLOAD_TOO_LARGE => ServerError::PayloadTooLarge,
            _ => ServerError::BadRequest(err.body_text()),
        }
    }
}
