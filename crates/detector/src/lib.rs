//! Shingle-sampling plagiarism detection.
//!
//! The detector turns text into unique shingles, samples every `step`-th one
//! and asks a [`PhraseSearch`] provider whether each sampled shingle appears
//! verbatim somewhere on the web. Matches are grouped by URL and the share of
//! matched samples becomes the score.
//!
//! ```text
//! text -> shingles(k) -> unique (first-occurrence order) -> sample(step)
//!      -> concurrent lookups -> sort by request index -> group by URL -> score
//! ```
//!
//! Lookups never fail the detection. Provider errors, blank answers and
//! timeouts all count as "no match".
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use detector::{DetectorConfig, PlagiarismDetector, StaticSearch};
//!
//! # async fn run() -> Result<(), detector::DetectError> {
//! let search = StaticSearch::new().with_match("the quick brown", "https://example.com/fox");
//! let detector = PlagiarismDetector::new(Arc::new(search), DetectorConfig::default());
//! let result = detector.detect("the quick brown fox", 3, 1).await?;
//! assert!(result.score > 0.0);
//! # Ok(())
//! # }
//! ```

mod config;
mod engine;
mod error;
mod google;
mod search;
mod types;

pub use crate::config::{DetectorConfig, SearchConfig, DEFAULT_SEARCH_URL};
pub use crate::engine::{aggregate, sample, PlagiarismDetector};
pub use crate::error::{DetectError, LookupError};
pub use crate::google::GoogleSearchClient;
pub use crate::search::{DisabledSearch, PhraseSearch, StaticSearch};
pub use crate::types::{PlagiarismResult, SourceMatch};
