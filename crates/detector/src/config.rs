//! Detector and search-provider configuration.

use std::time::Duration;

use analysis::ShingleConfig;
use serde::{Deserialize, Serialize};

use crate::error::DetectError;

/// Default endpoint of the Google Programmable Search JSON API.
pub const DEFAULT_SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Runtime configuration for [`PlagiarismDetector`](crate::PlagiarismDetector).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Extraction settings for the shingles that get sampled.
    pub shingles: ShingleConfig,

    /// Upper bound on lookups in flight for one detection. `0` launches every
    /// sampled lookup at once.
    pub max_concurrent_lookups: usize,

    /// Per-lookup deadline in milliseconds. A lookup that misses it counts as
    /// "no match". `0` disables the deadline.
    pub lookup_timeout_ms: u64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            shingles: ShingleConfig::default(),
            max_concurrent_lookups: 8,
            lookup_timeout_ms: 15_000,
        }
    }
}

impl DetectorConfig {
    pub fn validate(&self) -> Result<(), DetectError> {
        self.shingles.validate()?;
        Ok(())
    }

    pub fn lookup_timeout(&self) -> Option<Duration> {
        (self.lookup_timeout_ms > 0).then(|| Duration::from_millis(self.lookup_timeout_ms))
    }
}

/// Credentials and transport settings for [`GoogleSearchClient`](crate::GoogleSearchClient).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub base_url: String,
    pub api_key: String,
    pub search_engine_id: String,
    /// HTTP request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SEARCH_URL.to_string(),
            api_key: String::new(),
            search_engine_id: String::new(),
            timeout_ms: 10_000,
        }
    }
}

// The API key never reaches logs.
impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("search_engine_id", &self.search_engine_id)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), DetectError> {
        if self.api_key.trim().is_empty() {
            return Err(DetectError::InvalidConfig("search api_key is required".into()));
        }
        if self.search_engine_id.trim().is_empty() {
            return Err(DetectError::InvalidConfig(
                "search search_engine_id is required".into(),
            ));
        }
        reqwest::Url::parse(&self.base_url).map_err(|e| {
            DetectError::InvalidConfig(format!("invalid search base_url '{}': {e}", self.base_url))
        })?;
        if self.timeout_ms == 0 {
            return Err(DetectError::InvalidConfig("search timeout_ms must be > 0".into()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
