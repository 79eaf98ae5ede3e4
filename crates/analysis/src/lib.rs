//! # textlens analysis
//!
//! Word frequency counting and shingle (k-gram) extraction over the
//! [`canonical`] tokenizer output.
//!
//! ## Contract
//!
//! - Both analyses are pure functions of `(text, config)`.
//! - [`analyze`] never fails; empty input gives zeroed statistics.
//! - [`extract_shingles`] validates its input and rejects blank text,
//!   non-positive `k` and oversized text with [`AnalysisError`]. Fewer tokens
//!   than `k` is a valid boundary and yields an empty result.
//!
//! ## Example Usage
//!
//! ```
//! use analysis::{analyze, extract_shingle_stats};
//!
//! let words = analyze("aa bb aa");
//! assert_eq!(words.total, 3);
//! assert_eq!(words.counts["aa"], 2);
//!
//! let shingles = extract_shingle_stats("one two three one two", 2).unwrap();
//! assert_eq!(shingles.total, 4);
//! assert_eq!(shingles.frequencies["one two"], 0.5);
//! ```

mod error;
mod shingles;
mod stats;
mod words;

pub use crate::error::AnalysisError;
pub use crate::shingles::{
    extract_shingle_stats, extract_shingle_stats_with, extract_shingles, extract_shingles_with,
    shingle_windows, ShingleConfig, Shingles, DEFAULT_MAX_TEXT_CHARS,
};
pub use crate::stats::{FrequencyStats, ShingleStats, TokenStats};
pub use crate::words::{analyze, analyze_with};
pub use canonical::TokenizerConfig;
