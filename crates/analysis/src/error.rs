use thiserror::Error;

/// Input validation failures raised by shingle extraction.
///
/// Every variant is an invalid-argument condition: the caller sent something
/// the extractor refuses to process. Messages are user facing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Text was empty or whitespace-only.
    #[error("Text is required")]
    EmptyText,

    /// Shingle size was zero or negative.
    #[error("K must be > 0")]
    InvalidShingleSize { k: i64 },

    /// Text exceeded the configured character limit.
    #[error("Text is too large (>{max} chars)")]
    TextTooLarge { max: usize },

    #[error("invalid analysis configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_user_facing() {
        assert_eq!(AnalysisError::EmptyText.to_string(), "Text is required");
        assert_eq!(
            AnalysisError::InvalidShingleSize { k: -1 }.to_string(),
            "K must be > 0"
        );
        assert_eq!(
            AnalysisError::TextTooLarge { max: 1_000_000 }.to_string(),
            "Text is too large (>1000000 chars)"
        );
    }
}
