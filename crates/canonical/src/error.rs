use thiserror::Error;

/// Errors that can occur while configuring the tokenizer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("invalid tokenizer configuration: {0}")]
    InvalidConfig(String),
}
