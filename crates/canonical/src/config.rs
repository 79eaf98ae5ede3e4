//! Configuration for the tokenizer.
//!
//! [`TokenizerConfig`] controls Unicode normalization, case folding and the
//! set of punctuation characters that survive tokenization.
//!
//! # Examples
//!
//! ```rust
//! use canonical::TokenizerConfig;
//!
//! let config = TokenizerConfig::default();
//! assert!(config.normalize_unicode);
//! assert!(config.lowercase);
//! assert_eq!(config.preserved_symbols, vec!['#', '@']);
//! ```
//!
//! Keeping hyphenated words together:
//!
//! ```rust
//! use canonical::{tokenize_with, TokenizerConfig};
//!
//! let config = TokenizerConfig {
//!     preserved_symbols: vec!['#', '@', '-'],
//!     ..Default::default()
//! };
//! assert_eq!(tokenize_with("state-of-the-art", &config), vec!["state-of-the-art"]);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Punctuation characters kept inside tokens unless configured otherwise.
pub const DEFAULT_PRESERVED_SYMBOLS: [char; 2] = ['#', '@'];

/// Configuration for [`tokenize_with`](crate::tokenize_with).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Apply Unicode NFC (canonical composition) before anything else.
    ///
    /// With this on, `"Cafe\u{0301}"` and `"Caf\u{00E9}"` produce the same token.
    pub normalize_unicode: bool,

    /// Apply locale-free Unicode lowercasing.
    pub lowercase: bool,

    /// Punctuation characters that are kept in place instead of acting as
    /// separators, so tokens like `c#` or `user@host` survive.
    ///
    /// Only characters in the Unicode punctuation categories are ever
    /// stripped; symbols such as `+` or `$` are kept regardless of this list.
    pub preserved_symbols: Vec<char>,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            normalize_unicode: true,
            lowercase: true,
            preserved_symbols: DEFAULT_PRESERVED_SYMBOLS.to_vec(),
        }
    }
}

impl TokenizerConfig {
    /// Rejects configurations that cannot produce stable tokens.
    ///
    /// A whitespace character in `preserved_symbols` would never be kept, as
    /// whitespace always splits tokens.
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if let Some(ch) = self.preserved_symbols.iter().find(|c| c.is_whitespace()) {
            return Err(CanonicalError::InvalidConfig(format!(
                "preserved symbol {ch:?} is whitespace"
            )));
        }
        Ok(())
    }

    pub(crate) fn preserves(&self, ch: char) -> bool {
        self.preserved_symbols.contains(&ch)
    }
}
