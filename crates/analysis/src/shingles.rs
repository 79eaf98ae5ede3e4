//! k-shingling over the tokenizer output.
//!
//! A shingle is `k` consecutive tokens joined by a single space. Extraction
//! runs in O(n·k) over the token count and keeps occurrences in text order.

use canonical::{tokenize_with, TokenizerConfig};
use fxhash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::stats::ShingleStats;

/// Upper bound on input size accepted by the extractor, in characters.
pub const DEFAULT_MAX_TEXT_CHARS: usize = 1_000_000;

/// Configuration for shingle extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShingleConfig {
    /// Inputs longer than this many characters are rejected.
    pub max_text_chars: usize,
    pub tokenizer: TokenizerConfig,
}

impl Default for ShingleConfig {
    fn default() -> Self {
        Self {
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
            tokenizer: TokenizerConfig::default(),
        }
    }
}

impl ShingleConfig {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.max_text_chars == 0 {
            return Err(AnalysisError::InvalidConfig(
                "max_text_chars must be > 0".into(),
            ));
        }
        self.tokenizer
            .validate()
            .map_err(|e| AnalysisError::InvalidConfig(e.to_string()))
    }
}

/// Ordered list of shingle occurrences for one text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shingles {
    k: usize,
    items: Vec<String>,
}

impl Shingles {
    /// Shingle size used to build this list.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Every occurrence, in text order, duplicates included.
    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Distinct shingles in order of first occurrence.
    ///
    /// The order is stable for a given input, which keeps sampling by index
    /// reproducible.
    pub fn unique(&self) -> Vec<&str> {
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        self.items
            .iter()
            .map(String::as_str)
            .filter(|s| seen.insert(*s))
            .collect()
    }

    /// Aggregated counts and frequencies.
    pub fn stats(&self) -> ShingleStats {
        ShingleStats::from_items(&self.items)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.items
    }
}

/// Builds every k-token window over `tokens`, joined by single spaces.
///
/// Returns an empty vector when `k == 0` or there are fewer than `k` tokens.
pub fn shingle_windows<S: AsRef<str>>(tokens: &[S], k: usize) -> Vec<String> {
    let n = tokens.len();
    if k == 0 || n < k {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(n - k + 1);
    for window in tokens.windows(k) {
        let len = window.iter().map(|t| t.as_ref().len()).sum::<usize>() + (k - 1);
        let mut shingle = String::with_capacity(len);
        for (idx, token) in window.iter().enumerate() {
            if idx > 0 {
                shingle.push(' ');
            }
            shingle.push_str(token.as_ref());
        }
        out.push(shingle);
    }
    out
}

/// Extracts shingles from `text` with the default configuration.
pub fn extract_shingles(text: &str, k: i64) -> Result<Shingles, AnalysisError> {
    extract_shingles_with(text, k, &ShingleConfig::default())
}

/// Extracts the ordered shingle list from `text`.
///
/// Fails on blank text, `k <= 0`, or text longer than
/// [`ShingleConfig::max_text_chars`]. Fewer than `k` tokens is not an error
/// and gives an empty list.
pub fn extract_shingles_with(
    text: &str,
    k: i64,
    cfg: &ShingleConfig,
) -> Result<Shingles, AnalysisError> {
    cfg.validate()?;

    if text.trim().is_empty() {
        return Err(AnalysisError::EmptyText);
    }
    let k_usize = match usize::try_from(k) {
        Ok(value) if value > 0 => value,
        _ => return Err(AnalysisError::InvalidShingleSize { k }),
    };
    // Byte length bounds char count from above, so only count when needed.
    if text.len() > cfg.max_text_chars && text.chars().count() > cfg.max_text_chars {
        return Err(AnalysisError::TextTooLarge {
            max: cfg.max_text_chars,
        });
    }

    let tokens = tokenize_with(text, &cfg.tokenizer);
    let items = shingle_windows(&tokens, k_usize);
    tracing::debug!(
        tokens = tokens.len(),
        k = k_usize,
        shingles = items.len(),
        "shingles extracted"
    );

    Ok(Shingles { k: k_usize, items })
}

/// Extracts aggregated shingle statistics with the default configuration.
pub fn extract_shingle_stats(text: &str, k: i64) -> Result<ShingleStats, AnalysisError> {
    extract_shingle_stats_with(text, k, &ShingleConfig::default())
}

/// Extracts aggregated shingle statistics.
pub fn extract_shingle_stats_with(
    text: &str,
    k: i64,
    cfg: &ShingleConfig,
) -> Result<ShingleStats, AnalysisError> {
    extract_shingles_with(text, k, cfg).map(|shingles| shingles.stats())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Window Tests ====================

    #[test]
    fn windows_empty_tokens() {
        let tokens: Vec<&str> = vec![];
        assert!(shingle_windows(&tokens, 3).is_empty());
    }

    #[test]
    fn windows_k_zero() {
        assert!(shingle_windows(&["a", "b", "c"], 0).is_empty());
    }

    #[test]
    fn windows_n_less_than_k() {
        assert!(shingle_windows(&["a", "b"], 3).is_empty());
    }

    #[test]
    fn windows_exact_k() {
        assert_eq!(shingle_windows(&["a", "b", "c"], 3), vec!["a b c"]);
    }

    #[test]
    fn windows_produce_n_minus_k_plus_one() {
        let tokens = ["a", "b", "c", "d", "e"];
        let out = shingle_windows(&tokens, 3);
        assert_eq!(out.len(), tokens.len() - 3 + 1);
        assert_eq!(out, vec!["a b c", "b c d", "c d e"]);
    }

    #[test]
    fn windows_k_one_is_identity() {
        assert_eq!(shingle_windows(&["x", "y"], 1), vec!["x", "y"]);
    }

    // ==================== Extraction Tests ====================

    #[test]
    fn counts_and_frequencies_are_correct() {
        let stats = extract_shingle_stats("one two three one two", 2).expect("valid input");
        assert_eq!(stats.total, 4);
        assert_eq!(stats.counts["one two"], 2);
        assert_eq!(stats.counts["two three"], 1);
        assert_eq!(stats.counts["three one"], 1);
        assert_eq!(stats.frequencies["one two"], 0.5);
        assert_eq!(stats.frequencies["two three"], 0.25);
        assert_eq!(stats.frequencies["three one"], 0.25);
    }

    #[test]
    fn raw_list_keeps_order_and_duplicates() {
        let shingles = extract_shingles("one two three one two", 2).expect("valid input");
        assert_eq!(shingles.k(), 2);
        assert_eq!(
            shingles.as_slice(),
            ["one two", "two three", "three one", "one two"]
        );
        assert_eq!(shingles.unique(), vec!["one two", "two three", "three one"]);
    }

    #[test]
    fn valid_text_and_k() {
        let stats = extract_shingle_stats("one two three four", 2).expect("valid input");
        assert_eq!(stats.total, 3);
        assert!(stats.counts.contains_key("one two"));
    }

    #[test]
    fn fewer_tokens_than_k_is_empty_not_error() {
        let stats = extract_shingle_stats("one two", 3).expect("valid input");
        assert_eq!(stats.total, 0);
        assert!(stats.counts.is_empty());
        assert!(stats.frequencies.is_empty());
    }

    #[test]
    fn blank_text_rejected() {
        for text in ["", "   ", "\n"] {
            assert_eq!(extract_shingles(text, 2), Err(AnalysisError::EmptyText));
        }
    }

    #[test]
    fn non_positive_k_rejected() {
        for k in [0, -1, -5] {
            let err = extract_shingles("some text", k).expect_err("k must be positive");
            assert_eq!(err, AnalysisError::InvalidShingleSize { k });
            assert!(err.to_string().contains("K must be > 0"));
        }
    }

    #[test]
    fn oversized_text_rejected() {
        let long_text = "a".repeat(DEFAULT_MAX_TEXT_CHARS + 1);
        let err = extract_shingles(&long_text, 2).expect_err("too large");
        assert!(err.to_string().contains("Text is too large"));
    }

    #[test]
    fn limit_counts_chars_not_bytes() {
        let cfg = ShingleConfig {
            max_text_chars: 4,
            ..Default::default()
        };
        // Four chars, seven bytes.
        let shingles = extract_shingles_with("\u{e9}\u{e9} \u{e9}", 1, &cfg).expect("within limit");
        assert_eq!(shingles.len(), 2);
    }

    #[test]
    fn blank_check_runs_before_k_check() {
        assert_eq!(extract_shingles("  ", 0), Err(AnalysisError::EmptyText));
    }

    #[test]
    fn shingles_are_lowercased_and_punctuation_free() {
        let shingles = extract_shingles("The Cat, the cat!", 2).expect("valid input");
        assert_eq!(shingles.as_slice(), ["the cat", "cat the", "the cat"]);
    }

    #[test]
    fn invalid_config_rejected() {
        let cfg = ShingleConfig {
            max_text_chars: 0,
            ..Default::default()
        };
        assert!(matches!(
            extract_shingles_with("a b", 1, &cfg),
            Err(AnalysisError::InvalidConfig(_))
        ));
    }
}
