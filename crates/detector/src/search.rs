//! Exact-phrase search providers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

/// Looks up the first web page containing a phrase verbatim.
///
/// Implementations never fail: transport or provider errors are logged and
/// reported as `None`, the same as "no match".
#[async_trait]
pub trait PhraseSearch: Send + Sync {
    async fn find_first_match_url(&self, exact_phrase: &str) -> Option<String>;
}

#[async_trait]
impl<T: PhraseSearch + ?Sized> PhraseSearch for Arc<T> {
    async fn find_first_match_url(&self, exact_phrase: &str) -> Option<String> {
        (**self).find_first_match_url(exact_phrase).await
    }
}

/// Provider used when web search is switched off. Every phrase is a miss.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledSearch;

#[async_trait]
impl PhraseSearch for DisabledSearch {
    async fn find_first_match_url(&self, _exact_phrase: &str) -> Option<String> {
        None
    }
}

/// In-memory provider answering from a fixed phrase -> URL table.
///
/// Records every phrase it is asked about, so callers can assert on the
/// number and content of lookups.
#[derive(Debug, Default)]
pub struct StaticSearch {
    matches: HashMap<String, String>,
    delay: Option<Duration>,
    calls: Mutex<Vec<String>>,
}

impl StaticSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` whenever `phrase` is looked up.
    pub fn with_match(mut self, phrase: impl Into<String>, url: impl Into<String>) -> Self {
        self.matches.insert(phrase.into(), url.into());
        self
    }

    /// Sleep before answering each lookup.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Phrases looked up so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        match self.calls.lock() {
            Ok(calls) => calls.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls().len()
    }
}

#[async_trait]
impl PhraseSearch for StaticSearch {
    async fn find_first_match_url(&self, exact_phrase: &str) -> Option<String> {
        match self.calls.lock() {
            Ok(mut calls) => calls.push(exact_phrase.to_string()),
            Err(poisoned) => poisoned.into_inner().push(exact_phrase.to_string()),
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.matches.get(exact_phrase).cloned()
    }
}
