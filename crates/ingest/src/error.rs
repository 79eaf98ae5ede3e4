//! Error types produced by the file content loader.
//!
//! Every variant is a validation failure that the HTTP layer reports as
//! `400 Bad Request`. Messages are written for end users.
//!
//! | Error | Description |
//! |-------|-------------|
//! | [`MissingFileName`](IngestError::MissingFileName) | File name blank |
//! | [`UnsupportedExtension`](IngestError::UnsupportedExtension) | Extension not in the allow-list |
//! | [`EmptyFile`](IngestError::EmptyFile) | Zero-byte upload |
//! | [`FileTooLarge`](IngestError::FileTooLarge) | Size limit exceeded |
//! | [`InvalidEncoding`](IngestError::InvalidEncoding) | Bytes are not valid UTF-8/UTF-16 |
//! | [`EmptyContent`](IngestError::EmptyContent) | Decoded text blank |
use thiserror::Error;

/// Errors that can occur while validating and decoding an upload.
///
/// # Examples
///
/// ```rust
/// use ingest::IngestError;
///
/// let err = IngestError::UnsupportedExtension {
///     extension: ".bin".into(),
///     allowed: ".txt, .log".into(),
/// };
/// assert_eq!(err.to_string(), "Unsupported file extension '.bin'. Allowed: .txt, .log");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IngestError {
    #[error("File name is required")]
    MissingFileName,

    /// The extension includes its leading dot, or is empty when the file
    /// name has none.
    #[error("Unsupported file extension '{extension}'. Allowed: {allowed}")]
    UnsupportedExtension { extension: String, allowed: String },

    #[error("Empty file")]
    EmptyFile,

    #[error("File is too large (max {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("File is not valid text: {0}")]
    InvalidEncoding(String),

    /// Decoded content is empty or whitespace-only.
    #[error("File content is empty")]
    EmptyContent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_messages() {
        assert_eq!(IngestError::MissingFileName.to_string(), "File name is required");
        assert_eq!(IngestError::EmptyFile.to_string(), "Empty file");
        assert_eq!(IngestError::EmptyContent.to_string(), "File content is empty");
        assert_eq!(
            IngestError::FileTooLarge { size: 11, max: 10 }.to_string(),
            "File is too large (max 10 bytes)"
        );
        assert!(IngestError::InvalidEncoding("bad byte".into())
            .to_string()
            .contains("bad byte"));
    }
}
