use canonical::{tokenize_with, TokenizerConfig};

use crate::stats::TokenStats;

/// Counts word occurrences in `text` using the default tokenizer.
///
/// Never fails: empty or whitespace-only input gives zeroed stats.
pub fn analyze(text: &str) -> TokenStats {
    analyze_with(text, &TokenizerConfig::default())
}

/// Counts word occurrences in `text` with an explicit tokenizer config.
pub fn analyze_with(text: &str, cfg: &TokenizerConfig) -> TokenStats {
    let tokens = tokenize_with(text, cfg);
    let stats = TokenStats::from_items(&tokens);
    tracing::debug!(
        total = stats.total,
        unique = stats.unique(),
        "word frequency computed"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frequency_sum(stats: &TokenStats) -> f64 {
        stats.frequencies.values().sum()
    }

    #[test]
    fn counts_repeated_words() {
        let s = analyze("aa bb aa");
        assert_eq!(s.total, 3);
        assert_eq!(s.counts["aa"], 2);
        assert_eq!(s.counts["bb"], 1);
        assert!((frequency_sum(&s) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn ignores_extra_spaces() {
        let s = analyze("  foo   bar   foo  ");
        assert_eq!(s.total, 3);
        assert_eq!(s.counts["foo"], 2);
        assert_eq!(s.counts["bar"], 1);
    }

    #[test]
    fn blank_input_is_safe() {
        for text in ["", "   ", "\n\t"] {
            let s = analyze(text);
            assert_eq!(s.total, 0);
            assert!(s.counts.is_empty());
            assert!(s.frequencies.is_empty());
        }
    }

    #[test]
    fn case_insensitive_counting() {
        let s = analyze("Hello hELLo HELLO world WORLD");
        assert_eq!(s.total, 5);
        assert_eq!(s.counts["hello"], 3);
        assert_eq!(s.counts["world"], 2);
    }

    #[test]
    fn unicode_words_work() {
        let s = analyze("\u{e9}\u{e9} e \u{e9}\u{e9}");
        assert_eq!(s.total, 3);
        assert_eq!(s.counts["\u{e9}\u{e9}"], 2);
    }

    #[test]
    fn punctuation_is_removed() {
        let s = analyze("hello,world! foo...bar");
        assert_eq!(s.total, 4);
        for word in ["hello", "world", "foo", "bar"] {
            assert_eq!(s.counts[word], 1);
        }
    }

    #[test]
    fn analysis_is_idempotent() {
        let text = "The cat sat on the mat. The end!";
        assert_eq!(analyze(text), analyze(text));
    }
}
