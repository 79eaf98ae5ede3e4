//! Sampling, concurrent lookup and aggregation.

use std::sync::Arc;
use std::time::Instant;

use analysis::extract_shingles_with;
use futures::stream::{self, StreamExt};
use metrics::counter;
use tracing::{debug, info_span, warn, Instrument};

use crate::config::DetectorConfig;
use crate::error::DetectError;
use crate::search::PhraseSearch;
use crate::types::{PlagiarismResult, SourceMatch};

/// Keeps every item whose index is a multiple of `step`, preserving order.
///
/// Index 0 always qualifies, so a non-empty input yields a non-empty sample.
/// `step == 0` yields nothing.
pub fn sample<S: AsRef<str>>(unique: &[S], step: usize) -> Vec<String> {
    if step == 0 {
        return Vec::new();
    }
    unique
        .iter()
        .step_by(step)
        .map(|s| s.as_ref().to_owned())
        .collect()
}

/// Groups `(shingle, lookup)` pairs by URL and scores them.
///
/// `pairs` must be in sampled order. Pairs without a URL, or with a blank
/// one, count as misses.
pub fn aggregate(pairs: Vec<(String, Option<String>)>) -> PlagiarismResult {
    let sampled = pairs.len();
    if sampled == 0 {
        return PlagiarismResult::empty();
    }

    let mut sources: Vec<SourceMatch> = Vec::new();
    let mut matched = 0usize;
    for (shingle, url) in pairs {
        let Some(url) = url.filter(|u| !u.trim().is_empty()) else {
            continue;
        };
        matched += 1;
        match sources.iter_mut().find(|s| s.url == url) {
            Some(source) => source.matched_shingles.push(shingle),
            None => sources.push(SourceMatch {
                url,
                matched_shingles: vec![shingle],
            }),
        }
    }

    PlagiarismResult {
        score: matched as f64 / sampled as f64,
        potential_sources: sources,
    }
}

/// Shingle-sampling plagiarism detector.
///
/// Stateless per call; one instance can serve concurrent requests.
#[derive(Clone)]
pub struct PlagiarismDetector {
    search: Arc<dyn PhraseSearch>,
    cfg: DetectorConfig,
}

impl std::fmt::Debug for PlagiarismDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlagiarismDetector")
            .field("cfg", &self.cfg)
            .finish_non_exhaustive()
    }
}

impl PlagiarismDetector {
    pub fn new(search: Arc<dyn PhraseSearch>, cfg: DetectorConfig) -> Self {
        Self { search, cfg }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.cfg
    }

    /// Scores `text` against the web.
    ///
    /// Validation happens before any lookup: a non-positive size or step, or
    /// text the extractor rejects, returns an error without touching the
    /// search provider.
    pub async fn detect(
        &self,
        text: &str,
        shingle_size: i64,
        sample_step: i64,
    ) -> Result<PlagiarismResult, DetectError> {
        if shingle_size <= 0 {
            return Err(DetectError::InvalidShingleSize { shingle_size });
        }
        let step = match usize::try_from(sample_step) {
            Ok(step) if step > 0 => step,
            _ => return Err(DetectError::InvalidSampleStep { sample_step }),
        };

        let shingles = extract_shingles_with(text, shingle_size, &self.cfg.shingles)?;
        let unique = shingles.unique();
        if unique.is_empty() {
            debug!(shingle_size, "no shingles to look up");
            return Ok(PlagiarismResult::empty());
        }

        let sampled = sample(&unique, step);
        let span = info_span!(
            "detector.detect",
            shingle_size,
            sample_step,
            unique = unique.len(),
            sampled = sampled.len()
        );
        Ok(self.detect_sampled(&sampled).instrument(span).await)
    }

    /// Looks up every shingle in `sampled` and aggregates the answers.
    pub async fn detect_sampled(&self, sampled: &[String]) -> PlagiarismResult {
        if sampled.is_empty() {
            return PlagiarismResult::empty();
        }

        let start = Instant::now();
        let limit = match self.cfg.max_concurrent_lookups {
            0 => sampled.len(),
            n => n,
        };

        let mut answers: Vec<(usize, Option<String>)> =
            stream::iter(sampled.iter().cloned().enumerate())
                .map(|(idx, phrase): (usize, String)| async move {
                    (idx, self.lookup(&phrase).await)
                })
            .buffer_unordered(limit)
            .collect()
            .await;
        answers.sort_by_key(|(idx, _)| *idx);

        let pairs = sampled
            .iter()
            .cloned()
            .zip(answers.into_iter().map(|(_, url)| url))
            .collect();
        let result = aggregate(pairs);

        debug!(
            sampled = sampled.len(),
            matched = result.matched_count(),
            sources = result.potential_sources.len(),
            score = result.score,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "detection complete"
        );
        result
    }

    async fn lookup(&self, phrase: &str) -> Option<String> {
        let found = match self.cfg.lookup_timeout() {
            Some(limit) => {
                match tokio::time::timeout(limit, self.search.find_first_match_url(phrase)).await {
                    Ok(found) => found,
                    Err(_) => {
                        warn!(
                            phrase,
                            timeout_ms = self.cfg.lookup_timeout_ms,
                            "phrase lookup timed out"
                        );
                        counter!("textlens_lookups_total", "outcome" => "timeout").increment(1);
                        return None;
                    }
                }
            }
            None => self.search.find_first_match_url(phrase).await,
        };

        let found = found.filter(|url| !url.trim().is_empty());
        let outcome = if found.is_some() { "match" } else { "miss" };
        counter!("textlens_lookups_total", "outcome" => outcome).increment(1);
        found
    }
}
