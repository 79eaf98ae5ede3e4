use std::borrow::Cow;

use unicode_categories::UnicodeCategories;
use unicode_normalization::UnicodeNormalization;

use crate::config::TokenizerConfig;

/// Tokenizes `text` with the default [`TokenizerConfig`].
pub fn tokenize(text: &str) -> Vec<String> {
    tokenize_with(text, &TokenizerConfig::default())
}

/// Main entry point. Normalizes `text` and splits it into tokens.
///
/// Whitespace and punctuation (minus the configured whitelist) act as
/// separators. Runs of separators never produce empty tokens, and blank input
/// yields an empty vector.
pub fn tokenize_with(text: &str, cfg: &TokenizerConfig) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    // Normalization first, as it can merge a base char with its combining mark.
    let normalized: Cow<str> = if cfg.normalize_unicode {
        Cow::Owned(text.nfc().collect::<String>())
    } else {
        Cow::Borrowed(text)
    };

    let mut tokens: Vec<String> = Vec::with_capacity((normalized.len() / 5).saturating_add(1));
    let mut current = String::new();

    for ch in normalized.chars() {
        if is_separator(ch, cfg) {
            finalize_token(&mut tokens, &mut current);
        } else if cfg.lowercase {
            // Lowercasing can expand a single character into multiple.
            current.extend(ch.to_lowercase());
        } else {
            current.push(ch);
        }
    }
    finalize_token(&mut tokens, &mut current);

    tokens
}

fn is_separator(ch: char, cfg: &TokenizerConfig) -> bool {
    ch.is_whitespace() || (ch.is_punctuation() && !cfg.preserves(ch))
}

fn finalize_token(tokens: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        tokens.push(std::mem::take(current));
    }
}
