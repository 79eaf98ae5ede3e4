//! Upload policy for the file content loader.
//!
//! [`FilePolicy`] decides which file names are accepted and how large an
//! upload may be. It is cheap to clone and deserializes from any serde format,
//! so the server can embed it in its own configuration.
//!
//! # Quick Start
//!
//! ```rust
//! use ingest::FilePolicy;
//!
//! let policy = FilePolicy::default();
//! policy.validate().expect("default policy is valid");
//! assert!(policy.allows_extension(".txt"));
//! assert!(!policy.allows_extension(".bin"));
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest accepted upload by default: 10 MiB.
pub const DEFAULT_MAX_FILE_BYTES: usize = 10 * 1024 * 1024;

/// Runtime policy for file uploads.
///
/// # Serialization
///
/// ```json
/// {
///   "allowed_extensions": [".txt", ".log"],
///   "max_file_bytes": 10485760
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePolicy {
    /// Accepted extensions, compared case-insensitively. A leading dot is
    /// optional in configuration (`"txt"` and `".txt"` are equivalent).
    ///
    /// Default: `[".txt", ".log"]`
    pub allowed_extensions: Vec<String>,

    /// Maximum raw upload size in bytes.
    ///
    /// Default: [`DEFAULT_MAX_FILE_BYTES`]
    pub max_file_bytes: usize,
}

impl Default for FilePolicy {
    fn default() -> Self {
        Self {
            allowed_extensions: vec![".txt".to_string(), ".log".to_string()],
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }
}

/// Configuration validation errors for [`FilePolicy`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// No extension would ever be accepted.
    #[error("allowed_extensions must not be empty")]
    NoAllowedExtensions,

    /// Every upload would be rejected as too large.
    #[error("max_file_bytes must be > 0")]
    ZeroMaxFileBytes,
}

impl FilePolicy {
    /// Validates the policy for internal consistency.
    ///
    /// Call once at startup; [`load_file`](crate::load_file) does not
    /// re-validate on every upload.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self
            .allowed_extensions
            .iter()
            .all(|ext| ext.trim().trim_start_matches('.').is_empty())
        {
            return Err(ConfigError::NoAllowedExtensions);
        }
        if self.max_file_bytes == 0 {
            return Err(ConfigError::ZeroMaxFileBytes);
        }
        Ok(())
    }

    /// Returns true when `ext` (with leading dot, any case) is allowed.
    pub fn allows_extension(&self, ext: &str) -> bool {
        let wanted = ext.trim_start_matches('.');
        !wanted.is_empty()
            && self
                .allowed_extensions
                .iter()
                .any(|allowed| allowed.trim().trim_start_matches('.').eq_ignore_ascii_case(wanted))
    }

    /// Allowed extensions rendered for error messages, e.g. `.txt, .log`.
    pub fn allowed_list(&self) -> String {
        self.allowed_extensions
            .iter()
            .map(|ext| {
                let ext = ext.trim().trim_start_matches('.').to_lowercase();
                format!(".{ext}")
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}
