//! textlens tokenizer.
//!
//! Turns free text into a sequence of normalized tokens that the word
//! frequency analyzer and the shingle extractor consume.
//!
//! ## What we do
//!
//! - Unicode normalization (NFC by default)
//! - Locale-free lowercasing
//! - Punctuation becomes a separator, except a small whitelist (`#`, `@`)
//! - Whitespace runs split tokens; no empty tokens are ever produced
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no OS/locale dependence. Same text and config give
//! the same tokens on any machine.
//!
//! ```rust
//! use canonical::tokenize;
//!
//! assert_eq!(tokenize("Hello, world! C# rocks."), vec!["hello", "world", "c#", "rocks"]);
//! ```

mod config;
mod error;
mod pipeline;

pub use crate::config::{TokenizerConfig, DEFAULT_PRESERVED_SYMBOLS};
pub use crate::error::CanonicalError;
pub use crate::pipeline::{tokenize, tokenize_with};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace_and_lowercases() {
        assert_eq!(
            tokenize("  Hello hELLo \n WORLD "),
            vec!["hello", "hello", "world"]
        );
    }

    #[test]
    fn empty_and_blank_input_yield_nothing() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \t\r\n ").is_empty());
    }

    #[test]
    fn punctuation_does_not_glue_words() {
        assert_eq!(
            tokenize("hello,world! foo...bar"),
            vec!["hello", "world", "foo", "bar"]
        );
    }

    #[test]
    fn punctuation_runs_collapse_to_one_separator() {
        assert_eq!(tokenize("one---two!!!three??"), vec!["one", "two", "three"]);
    }

    #[test]
    fn unicode_dashes_split_words() {
        assert_eq!(tokenize("hello\u{2014}world"), vec!["hello", "world"]);
        assert_eq!(tokenize("cat\u{2013}dog"), vec!["cat", "dog"]);
    }

    #[test]
    fn symbols_survive_inside_words() {
        assert_eq!(
            tokenize("c# c++ usd$ price#tag me@host"),
            vec!["c#", "c++", "usd$", "price#tag", "me@host"]
        );
    }

    #[test]
    fn mixed_whitespace_splits() {
        assert_eq!(tokenize("a\t\tb \n c\r\nd"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn composed_and_decomposed_forms_match() {
        let composed = tokenize("Caf\u{00E9}");
        let decomposed = tokenize("Cafe\u{0301}");
        assert_eq!(composed, decomposed);
        assert_eq!(composed, vec!["caf\u{00E9}"]);
    }

    #[test]
    fn disable_unicode_normalization() {
        let cfg = TokenizerConfig {
            normalize_unicode: false,
            ..Default::default()
        };
        assert_eq!(tokenize_with("Cafe\u{0301}", &cfg), vec!["cafe\u{0301}"]);
    }

    #[test]
    fn preserve_case_when_disabled() {
        let cfg = TokenizerConfig {
            lowercase: false,
            ..Default::default()
        };
        assert_eq!(tokenize_with("Hello World", &cfg), vec!["Hello", "World"]);
    }

    #[test]
    fn empty_whitelist_strips_hash() {
        let cfg = TokenizerConfig {
            preserved_symbols: Vec::new(),
            ..Default::default()
        };
        assert_eq!(tokenize_with("c# is fun", &cfg), vec!["c", "is", "fun"]);
    }

    #[test]
    fn cyrillic_words_are_tokens() {
        assert_eq!(
            tokenize("Був господар, був пан"),
            vec!["був", "господар", "був", "пан"]
        );
    }

    #[test]
    fn tokenization_is_deterministic() {
        let text = "The quick brown fox; the QUICK brown dog.";
        assert_eq!(tokenize(text), tokenize(text));
    }
}
