use serde::{Deserialize, Serialize};

/// One external page believed to contain sampled shingles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMatch {
    pub url: String,
    /// Sampled shingles that resolved to `url`, in sampled order.
    pub matched_shingles: Vec<String>,
}

/// Outcome of a detection run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlagiarismResult {
    /// Matched sampled shingles over sampled shingles, in `[0, 1]`.
    pub score: f64,
    /// Sources grouped by URL, in order of first discovery.
    pub potential_sources: Vec<SourceMatch>,
}

impl PlagiarismResult {
    /// Result for input that produced nothing to look up.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn matched_count(&self) -> usize {
        self.potential_sources
            .iter()
            .map(|s| s.matched_shingles.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case() {
        let result = PlagiarismResult {
            score: 0.5,
            potential_sources: vec![SourceMatch {
                url: "http://a".into(),
                matched_shingles: vec!["s1".into()],
            }],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["score"], 0.5);
        assert_eq!(json["potentialSources"][0]["url"], "http://a");
        assert_eq!(json["potentialSources"][0]["matchedShingles"][0], "s1");
    }

    #[test]
    fn empty_result_is_zero() {
        let empty = PlagiarismResult::empty();
        assert_eq!(empty.score, 0.0);
        assert!(empty.potential_sources.is_empty());
        assert_eq!(empty.matched_count(), 0);
    }
}
