use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, error, warn};

use crate::config::SearchConfig;
use crate::error::{DetectError, LookupError};
use crate::search::PhraseSearch;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Option<Vec<SearchItem>>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    link: Option<String>,
}

/// Client for the Google Programmable Search JSON API.
///
/// Issues `GET {base_url}?key=..&cx=..&q="phrase"` and returns the `link`
/// of the first result item.
#[derive(Debug, Clone)]
pub struct GoogleSearchClient {
    http: reqwest::Client,
    cfg: SearchConfig,
}

impl GoogleSearchClient {
    pub fn new(cfg: SearchConfig) -> Result<Self, DetectError> {
        cfg.validate()?;
        let http = reqwest::Client::builder()
            .timeout(cfg.timeout())
            .connect_timeout(cfg.timeout())
            .pool_max_idle_per_host(32)
            .build()
            .map_err(|e| DetectError::InvalidConfig(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, cfg })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.cfg
    }

    /// Like [`PhraseSearch::find_first_match_url`] but reports why a lookup failed.
    pub async fn try_find_first_match_url(
        &self,
        exact_phrase: &str,
    ) -> Result<Option<String>, LookupError> {
        let quoted = format!("\"{exact_phrase}\"");
        let response = self
            .http
            .get(&self.cfg.base_url)
            .query(&[
                ("key", self.cfg.api_key.as_str()),
                ("cx", self.cfg.search_engine_id.as_str()),
                ("q", quoted.as_str()),
            ])
            .send()
            .await
            .map_err(|e| LookupError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Decode(e.to_string()))?;

        Ok(body
            .items
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|item| item.link)
            .filter(|link| !link.trim().is_empty()))
    }
}

#[async_trait]
impl PhraseSearch for GoogleSearchClient {
    async fn find_first_match_url(&self, exact_phrase: &str) -> Option<String> {
        match self.try_find_first_match_url(exact_phrase).await {
            Ok(found) => {
                debug!(phrase = exact_phrase, matched = found.is_some(), "search_lookup");
                found
            }
            Err(err @ LookupError::Status(_)) => {
                warn!(phrase = exact_phrase, error = %err, "search_lookup_failed");
                None
            }
            Err(err) => {
                error!(phrase = exact_phrase, error = %err, "search_lookup_failed");
                None
            }
        }
    }
}
