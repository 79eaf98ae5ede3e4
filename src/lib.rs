//! Workspace umbrella crate for textlens.
//!
//! This crate stitches together file ingest, tokenization, frequency and
//! shingle analysis and plagiarism detection so callers can go from an
//! uploaded file to a result with a single call.

pub use analysis::{
    analyze, analyze_with, extract_shingle_stats, extract_shingle_stats_with, extract_shingles,
    extract_shingles_with, shingle_windows, AnalysisError, FrequencyStats, ShingleConfig,
    ShingleStats, Shingles, TokenStats, DEFAULT_MAX_TEXT_CHARS,
};
pub use canonical::{tokenize, tokenize_with, CanonicalError, TokenizerConfig};
pub use detector::{
    aggregate, sample, DetectError, DetectorConfig, DisabledSearch, GoogleSearchClient,
    LookupError, PhraseSearch, PlagiarismDetector, PlagiarismResult, SearchConfig, SourceMatch,
    StaticSearch,
};
pub use ingest::{
    decode_text, file_extension, load_file, FilePolicy, IngestError, LoadedFile, RawUpload,
    TextEncoding,
};

use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use thiserror::Error;

/// Errors that can occur while running a file through the pipeline.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PipelineError {
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    #[error(transparent)]
    Detect(#[from] DetectError),
}

/// Metrics observer for pipeline stages.
pub trait PipelineMetrics: Send + Sync {
    fn record_ingest(&self, latency: Duration, result: Result<(), IngestError>);
    fn record_analysis(&self, latency: Duration, result: Result<(), AnalysisError>);
    fn record_detect(&self, latency: Duration, result: Result<(), DetectError>);
}

/// Install or clear the global pipeline metrics recorder.
pub fn set_pipeline_metrics(recorder: Option<Arc<dyn PipelineMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn PipelineMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn PipelineMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn PipelineMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

struct MetricsSpan {
    recorder: Arc<dyn PipelineMetrics>,
    start: Instant,
}

impl MetricsSpan {
    fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    fn record_ingest(self, result: Result<(), IngestError>) {
        self.recorder.record_ingest(self.start.elapsed(), result);
    }

    fn record_analysis(self, result: Result<(), AnalysisError>) {
        self.recorder.record_analysis(self.start.elapsed(), result);
    }

    fn record_detect(self, result: Result<(), DetectError>) {
        self.recorder.record_detect(self.start.elapsed(), result);
    }
}

fn outcome<T, E: Clone>(result: &Result<T, E>) -> Result<(), E> {
    match result {
        Ok(_) => Ok(()),
        Err(err) => Err(err.clone()),
    }
}

/// Validate and decode an upload, reporting the ingest stage.
pub fn ingest_file(upload: RawUpload, policy: &FilePolicy) -> Result<LoadedFile, PipelineError> {
    let span = MetricsSpan::start();
    let result = load_file(upload, policy);
    if let Some(span) = span {
        span.record_ingest(outcome(&result));
    }
    Ok(result?)
}

/// Word-frequency statistics for `text`. Never fails.
pub fn analyze_text(text: &str, cfg: &TokenizerConfig) -> TokenStats {
    let span = MetricsSpan::start();
    let stats = analyze_with(text, cfg);
    if let Some(span) = span {
        span.record_analysis(Ok(()));
    }
    stats
}

/// Ordered `k`-shingles of `text`, reporting the analysis stage.
pub fn shingle_text(text: &str, k: i64, cfg: &ShingleConfig) -> Result<Shingles, PipelineError> {
    let span = MetricsSpan::start();
    let result = extract_shingles_with(text, k, cfg);
    if let Some(span) = span {
        span.record_analysis(outcome(&result));
    }
    Ok(result?)
}

/// Plagiarism detection for `text`, reporting the detection stage.
pub async fn detect_text(
    text: &str,
    detector: &PlagiarismDetector,
    shingle_size: i64,
    sample_step: i64,
) -> Result<PlagiarismResult, PipelineError> {
    let span = MetricsSpan::start();
    let result = detector.detect(text, shingle_size, sample_step).await;
    if let Some(span) = span {
        span.record_detect(outcome(&result));
    }
    Ok(result?)
}

/// Load an upload and count its words.
pub fn analyze_file(
    upload: RawUpload,
    policy: &FilePolicy,
    cfg: &TokenizerConfig,
) -> Result<(LoadedFile, TokenStats), PipelineError> {
    let file = ingest_file(upload, policy)?;
    let stats = analyze_text(&file.text, cfg);
    Ok((file, stats))
}

/// Load an upload and extract its `k`-shingle statistics.
pub fn shingle_file(
    upload: RawUpload,
    policy: &FilePolicy,
    cfg: &ShingleConfig,
    k: i64,
) -> Result<(LoadedFile, ShingleStats), PipelineError> {
    let file = ingest_file(upload, policy)?;
    let stats = shingle_text(&file.text, k, cfg)?.stats();
    Ok((file, stats))
}

/// Load an upload and run plagiarism detection over it.
///
/// Shingle size and sample step are validated before the upload is read, so
/// a bad request never costs a decode.
pub async fn detect_file(
    upload: RawUpload,
    policy: &FilePolicy,
    detector: &PlagiarismDetector,
    shingle_size: i64,
    sample_step: i64,
) -> Result<(LoadedFile, PlagiarismResult), PipelineError> {
    if shingle_size <= 0 {
        return Err(DetectError::InvalidShingleSize { shingle_size }.into());
    }
    if sample_step <= 0 {
        return Err(DetectError::InvalidSampleStep { sample_step }.into());
    }
    let file = ingest_file(upload, policy)?;
    let result = detect_text(&file.text, detector, shingle_size, sample_step).await?;
    Ok((file, result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Tests touching the global recorder run one at a time.
    static GLOBAL: Mutex<()> = Mutex::new(());

    #[derive(Default)]
    struct CountingMetrics {
        events: RwLock<Vec<&'static str>>,
    }

    impl CountingMetrics {
        fn snapshot(&self) -> Vec<&'static str> {
            self.events.read().unwrap().clone()
        }
    }

    impl PipelineMetrics for CountingMetrics {
        fn record_ingest(&self, _latency: Duration, result: Result<(), IngestError>) {
            let label = if result.is_ok() { "ingest_ok" } else { "ingest_err" };
            self.events.write().unwrap().push(label);
        }

        fn record_analysis(&self, _latency: Duration, result: Result<(), AnalysisError>) {
            let label = if result.is_ok() { "analysis_ok" } else { "analysis_err" };
            self.events.write().unwrap().push(label);
        }

        fn record_detect(&self, _latency: Duration, result: Result<(), DetectError>) {
            let label = if result.is_ok() { "detect_ok" } else { "detect_err" };
            self.events.write().unwrap().push(label);
        }
    }

    fn upload(name: &str, text: &str) -> RawUpload {
        RawUpload::new(name, text.as_bytes().to_vec())
    }

    #[test]
    fn analyze_file_counts_words() {
        let (file, stats) = analyze_file(
            upload("a.txt", "aa bb aa"),
            &FilePolicy::default(),
            &TokenizerConfig::default(),
        )
        .expect("valid upload");
        assert_eq!(file.file_name, "a.txt");
        assert_eq!(stats.total, 3);
        assert_eq!(stats.counts["aa"], 2);
    }

    #[test]
    fn shingle_file_rejects_bad_k() {
        let err = shingle_file(
            upload("a.txt", "one two three"),
            &FilePolicy::default(),
            &ShingleConfig::default(),
            0,
        )
        .expect_err("k must be positive");
        assert_eq!(
            err,
            PipelineError::Analysis(AnalysisError::InvalidShingleSize { k: 0 })
        );
    }

    #[test]
    fn ingest_errors_pass_through() {
        let err = analyze_file(
            upload("a.bin", "text"),
            &FilePolicy::default(),
            &TokenizerConfig::default(),
        )
        .expect_err("extension not allowed");
        assert!(matches!(
            err,
            PipelineError::Ingest(IngestError::UnsupportedExtension { .. })
        ));
        assert_eq!(
            err.to_string(),
            "Unsupported file extension '.bin'. Allowed: .txt, .log"
        );
    }

    #[test]
    fn metrics_recorder_tracks_pipeline_outcome() {
        let _lock = GLOBAL.lock().unwrap_or_else(|p| p.into_inner());
        let metrics = Arc::new(CountingMetrics::default());
        set_pipeline_metrics(Some(metrics.clone()));

        let ok = shingle_file(
            upload("a.txt", "one two three"),
            &FilePolicy::default(),
            &ShingleConfig::default(),
            2,
        );
        let bad = analyze_file(
            upload("", "x"),
            &FilePolicy::default(),
            &TokenizerConfig::default(),
        );
        set_pipeline_metrics(None);

        assert!(ok.is_ok());
        assert!(bad.is_err());
        let events = metrics.snapshot();
        assert!(events.contains(&"ingest_ok"));
        assert!(events.contains(&"analysis_ok"));
        assert!(events.contains(&"ingest_err"));
    }

    #[test]
    fn no_recorder_is_fine() {
        let _lock = GLOBAL.lock().unwrap_or_else(|p| p.into_inner());
        set_pipeline_metrics(None);
        assert_eq!(analyze_text("a a", &TokenizerConfig::default()).total, 2);
    }
}
