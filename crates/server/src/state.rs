use crate::config::{SearchProvider, ServerConfig};
use crate::error::ServerResult;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use textlens::{
    DisabledSearch, FilePolicy, GoogleSearchClient, PhraseSearch, PlagiarismDetector,
    ShingleConfig, TokenizerConfig,
};

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Detector instance (shared across requests)
    pub detector: Arc<PlagiarismDetector>,

    pub tokenizer: TokenizerConfig,
    pub shingles: ShingleConfig,
    pub files: FilePolicy,

    /// Prometheus handle, present when the exporter was installed
    pub metrics: Option<PrometheusHandle>,
}

impl ServerState {
    /// Create new server state with the search provider named in `config`
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let search: Arc<dyn PhraseSearch> = match config.search.provider {
            SearchProvider::Google => Arc::new(GoogleSearchClient::new(config.search_config())?),
            SearchProvider::Disabled => Arc::new(DisabledSearch),
        };
        Self::with_search(config, search)
    }

    /// Create new server state around an explicit search provider
    pub fn with_search(config: ServerConfig, search: Arc<dyn PhraseSearch>) -> ServerResult<Self> {
        config.validate()?;
        let detector = Arc::new(PlagiarismDetector::new(search, config.detector_config()));

        Ok(Self {
            tokenizer: config.tokenizer_config(),
            shingles: config.shingle_config(),
            files: config.files.clone(),
            config: Arc::new(config),
            detector,
            metrics: None,
        })
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_uses_disabled_search() {
        let state = ServerState::new(ServerConfig::default()).expect("default config is valid");
        assert_eq!(state.shingles.max_text_chars, state.config.analysis.max_text_chars);
        assert!(state.metrics.is_none());
    }

    #[test]
    fn invalid_config_rejected() {
        let mut config = ServerConfig::default();
        config.search.provider = SearchProvider::Google;
        assert!(ServerState::new(config).is_err());
    }
}
