//! Prometheus wiring for pipeline stage metrics.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Duration;
use textlens::{AnalysisError, DetectError, IngestError, PipelineMetrics};

/// Records `textlens_stage_duration_seconds{stage}` and
/// `textlens_stage_total{stage,outcome}` through the global `metrics` recorder.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrometheusPipelineMetrics;

fn record_stage(stage: &'static str, latency: Duration, ok: bool) {
    let outcome = if ok { "ok" } else { "error" };
    histogram!("textlens_stage_duration_seconds", "stage" => stage)
        .record(latency.as_secs_f64());
    counter!("textlens_stage_total", "stage" => stage, "outcome" => outcome).increment(1);
}

impl PipelineMetrics for PrometheusPipelineMetrics {
    fn record_ingest(&self, latency: Duration, result: Result<(), IngestError>) {
        record_stage("ingest", latency, result.is_ok());
    }

    fn record_analysis(&self, latency: Duration, result: Result<(), AnalysisError>) {
        record_stage("analysis", latency, result.is_ok());
    }

    fn record_detect(&self, latency: Duration, result: Result<(), DetectError>) {
        record_stage("detect", latency, result.is_ok());
    }
}

/// Install the Prometheus recorder as the process-wide `metrics` recorder.
///
/// Fails if another recorder is already installed.
pub fn install_prometheus() -> anyhow::Result<PrometheusHandle> {
    Ok(PrometheusBuilder::new().install_recorder()?)
}
