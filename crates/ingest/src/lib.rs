//! textlens file ingest.
//!
//! This is where uploaded files enter the analysis pipeline. We take the raw
//! bytes and the client's file name, check them against a [`FilePolicy`], and
//! hand back decoded text.
//!
//! ## What we do here
//!
//! - **Validate the name** - Blank names and disallowed extensions are rejected.
//! - **Enforce size policy** - Empty uploads and uploads over the limit fail fast,
//!   before any decoding.
//! - **Decode** - UTF-8 by default; a byte-order mark switches to UTF-8/UTF-16
//!   as appropriate.
//! - **Reject blank content** - Whitespace-only files are an error, not zero stats.
//! - **Log everything** - Structured logs via tracing for debugging production issues.
//!
//! ## Example
//!
//! ```
//! use ingest::{load_file, FilePolicy, RawUpload};
//!
//! let upload = RawUpload::new("note.txt", "a b a".as_bytes().to_vec());
//! let loaded = load_file(upload, &FilePolicy::default()).unwrap();
//! assert_eq!(loaded.text, "a b a");
//! ```
use std::time::Instant;

use tracing::{info, warn, Level};

mod config;
mod decode;
mod error;
mod types;

pub use crate::config::{ConfigError, FilePolicy, DEFAULT_MAX_FILE_BYTES};
pub use crate::decode::{decode_text, detect_encoding, TextEncoding};
pub use crate::error::IngestError;
pub use crate::types::{file_extension, LoadedFile, RawUpload};

/// Validates and decodes an upload.
///
/// Checks run in order: file name, extension, emptiness, size, encoding,
/// decoded content. The first failure is returned.
pub fn load_file(upload: RawUpload, policy: &FilePolicy) -> Result<LoadedFile, IngestError> {
    let start = Instant::now();
    let span = tracing::span!(
        Level::INFO,
        "ingest.load_file",
        file_name = %upload.file_name,
        size = upload.content.len()
    );
    let _guard = span.enter();

    match load_inner(upload, policy) {
        Ok(file) => {
            info!(
                encoding = file.encoding.as_str(),
                chars = file.text.chars().count(),
                elapsed_micros = start.elapsed().as_micros(),
                "ingest_success"
            );
            Ok(file)
        }
        Err(err) => {
            warn!(
                error = %err,
                elapsed_micros = start.elapsed().as_micros(),
                "ingest_failure"
            );
            Err(err)
        }
    }
}

fn load_inner(upload: RawUpload, policy: &FilePolicy) -> Result<LoadedFile, IngestError> {
    let RawUpload { file_name, content } = upload;

    let file_name = file_name.trim().to_string();
    if file_name.is_empty() {
        return Err(IngestError::MissingFileName);
    }

    let extension = file_extension(&file_name);
    if !policy.allows_extension(&extension) {
        return Err(IngestError::UnsupportedExtension {
            extension,
            allowed: policy.allowed_list(),
        });
    }

    if content.is_empty() {
        return Err(IngestError::EmptyFile);
    }
    if content.len() > policy.max_file_bytes {
        return Err(IngestError::FileTooLarge {
            size: content.len(),
            max: policy.max_file_bytes,
        });
    }

    let (encoding, text) = decode_text(&content)?;
    if text.trim().is_empty() {
        return Err(IngestError::EmptyContent);
    }

    Ok(LoadedFile {
        file_name,
        encoding,
        text,
    })
}
