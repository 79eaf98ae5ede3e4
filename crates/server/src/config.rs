use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;
use textlens::{
    DetectorConfig, FilePolicy, SearchConfig, ShingleConfig, TokenizerConfig,
    DEFAULT_MAX_TEXT_CHARS,
};

use crate::error::{ServerError, ServerResult};

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum request body size in MB
    #[serde(default = "default_max_body_size_mb")]
    pub max_body_size_mb: usize,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Allowed CORS origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Log level or full `EnvFilter` directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// `json` or `pretty`
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Metrics endpoint enabled
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    #[serde(default)]
    pub analysis: AnalysisSettings,

    #[serde(default)]
    pub files: FilePolicy,

    #[serde(default)]
    pub search: SearchSettings,
}

/// Tokenizer and shingle defaults applied to every request.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub max_text_chars: usize,
    /// `k` used by `/text/shingles` and `/file/shingles` when the request omits it.
    pub default_k: i64,
    pub default_shingle_size: i64,
    pub default_sample_step: i64,
    pub preserved_symbols: Vec<char>,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
            default_k: 3,
            default_shingle_size: 5,
            default_sample_step: 5,
            preserved_symbols: TokenizerConfig::default().preserved_symbols,
        }
    }
}

/// Which phrase-search backend the detector talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchProvider {
    Google,
    /// Every lookup is a miss; plagiarism scores are always 0.
    #[default]
    Disabled,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    pub provider: SearchProvider,
    pub base_url: String,
    #[serde(skip_serializing)]
    pub api_key: String,
    pub search_engine_id: String,
    pub timeout_ms: u64,
    pub lookup_timeout_ms: u64,
    pub max_concurrent_lookups: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        let search = SearchConfig::default();
        let detector = DetectorConfig::default();
        Self {
            provider: SearchProvider::default(),
            base_url: search.base_url,
            api_key: search.api_key,
            search_engine_id: search.search_engine_id,
            timeout_ms: search.timeout_ms,
            lookup_timeout_ms: detector.lookup_timeout_ms,
            max_concurrent_lookups: detector.max_concurrent_lookups,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            max_body_size_mb: default_max_body_size_mb(),
            enable_cors: default_true(),
            cors_origins: Vec::new(),
            log_level: default_log_level(),
            log_format: default_log_format(),
            metrics_enabled: default_true(),
            analysis: AnalysisSettings::default(),
            files: FilePolicy::default(),
            search: SearchSettings::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `.env`, an optional `server.*` file and
    /// `TEXTLENS_SERVER__*` environment variables, in increasing priority.
    pub fn load() -> anyhow::Result<Self> {
        // A missing .env is normal outside development.
        let _ = dotenvy::dotenv();

        let builder = config::Config::builder()
            .add_source(config::File::with_name("server").required(false))
            .add_source(
                config::Environment::with_prefix("TEXTLENS_SERVER")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_origins")
                    .with_list_parse_key("files.allowed_extensions"),
            );

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        config.validate()?;

        if config.search.provider == SearchProvider::Disabled {
            tracing::warn!("Web search disabled; plagiarism scores will always be 0");
        }

        Ok(config)
    }

    /// Reject settings the server cannot run with.
    pub fn validate(&self) -> ServerResult<()> {
        if self.timeout_secs == 0 {
            return Err(ServerError::Config("timeout_secs must be > 0".into()));
        }
        if self.max_body_size_mb == 0 {
            return Err(ServerError::Config("max_body_size_mb must be > 0".into()));
        }
        if !matches!(self.log_format.as_str(), "json" | "pretty") {
            return Err(ServerError::Config(format!(
                "log_format must be 'json' or 'pretty', got '{}'",
                self.log_format
            )));
        }
        for origin in &self.cors_origins {
            if origin.parse::<axum::http::HeaderValue>().is_err() {
                return Err(ServerError::Config(format!("invalid CORS origin '{origin}'")));
            }
        }

        let analysis = &self.analysis;
        for (name, value) in [
            ("default_k", analysis.default_k),
            ("default_shingle_size", analysis.default_shingle_size),
            ("default_sample_step", analysis.default_sample_step),
        ] {
            if value <= 0 {
                return Err(ServerError::Config(format!("analysis.{name} must be > 0")));
            }
        }
        self.shingle_config()
            .validate()
            .map_err(|e| ServerError::Config(e.to_string()))?;
        self.files
            .validate()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        if self.search.provider == SearchProvider::Google {
            self.search_config()
                .validate()
                .map_err(|e| ServerError::Config(e.to_string()))?;
        }
        Ok(())
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_mb * 1024 * 1024
    }

    pub fn tokenizer_config(&self) -> TokenizerConfig {
        TokenizerConfig {
            preserved_symbols: self.analysis.preserved_symbols.clone(),
            ..Default::default()
        }
    }

    pub fn shingle_config(&self) -> ShingleConfig {
        ShingleConfig {
            max_text_chars: self.analysis.max_text_chars,
            tokenizer: self.tokenizer_config(),
        }
    }

    pub fn detector_config(&self) -> DetectorConfig {
        DetectorConfig {
            shingles: self.shingle_config(),
            max_concurrent_lookups: self.search.max_concurrent_lookups,
            lookup_timeout_ms: self.search.lookup_timeout_ms,
        }
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            base_url: self.search.base_url.clone(),
            api_key: self.search.api_key.clone(),
            search_engine_id: self.search.search_engine_id.clone(),
            timeout_ms: self.search.timeout_ms,
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_body_size_mb() -> usize {
    10
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}
