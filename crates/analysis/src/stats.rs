use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Occurrence counts and relative frequencies over a sequence of keys.
///
/// Invariants:
/// - `counts.values().sum() == total`
/// - `frequencies[k] == counts[k] / total` for every key
/// - `counts` and `frequencies` share the same key set, and both are empty
///   when `total == 0`
///
/// Maps are ordered so serialized output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrequencyStats {
    /// Number of occurrences, not the number of distinct keys.
    pub total: usize,
    pub counts: BTreeMap<String, usize>,
    pub frequencies: BTreeMap<String, f64>,
}

/// Per-token statistics produced by [`analyze`](crate::analyze).
pub type TokenStats = FrequencyStats;

/// Per-shingle statistics produced by [`extract_shingle_stats`](crate::extract_shingle_stats).
pub type ShingleStats = FrequencyStats;

impl FrequencyStats {
    /// Counts every item of `items`. Keys are compared exactly, so callers
    /// normalize case before handing items over.
    pub fn from_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut total = 0usize;
        for item in items {
            let key = item.as_ref();
            match counts.get_mut(key) {
                Some(count) => *count += 1,
                None => {
                    counts.insert(key.to_owned(), 1);
                }
            }
            total += 1;
        }

        let frequencies = if total == 0 {
            BTreeMap::new()
        } else {
            let denom = total as f64;
            counts
                .iter()
                .map(|(key, &count)| (key.clone(), count as f64 / denom))
                .collect()
        };

        Self {
            total,
            counts,
            frequencies,
        }
    }

    /// Number of distinct keys.
    pub fn unique(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
