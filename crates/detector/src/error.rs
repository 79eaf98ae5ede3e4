use analysis::AnalysisError;
use thiserror::Error;

/// Errors surfaced by [`PlagiarismDetector::detect`](crate::PlagiarismDetector::detect).
///
/// Lookup failures are deliberately absent: a failed lookup counts as "no
/// match" and never aborts detection.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DetectError {
    #[error("Shingle size must be greater than 0.")]
    InvalidShingleSize { shingle_size: i64 },

    #[error("Sample step must be greater than 0.")]
    InvalidSampleStep { sample_step: i64 },

    /// Shingle extraction rejected the text.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("invalid detector configuration: {0}")]
    InvalidConfig(String),
}

/// Failure talking to the search provider.
///
/// Recovered inside the client: logged and turned into "no match".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Transport failure (connect, timeout, TLS).
    #[error("search request failed: {0}")]
    Http(String),

    /// Provider answered with a non-success status.
    #[error("search provider returned status {0}")]
    Status(u16),

    /// Provider answered with a body we could not parse.
    #[error("could not decode search response: {0}")]
    Decode(String),
}
