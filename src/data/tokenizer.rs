// ============================================================
// Layer 4 — Whitespace Tokenizer
// ============================================================
// Turns a raw message into a sequence of lowercase tokens.
//
// Steps (applied in order):
//   1. Lowercase the whole input
//   2. Split on every run of whitespace
//
// No stemming, no punctuation stripping, no stop-word removal.
//
// Splitting is a true "split on runs", so text that starts or
// ends with whitespace yields an empty token at that end, and
// the empty string yields exactly one empty token. Callers
// downstream (the vocabulary builder) drop empty tokens; the
// sequence encoder maps them to the out-of-vocabulary index.
//
// Reference: Rust Book §8 (Strings in Rust)
//            Rust Book §13 (Iterators)

/// An ordered sequence of tokens for one document.
pub type TokenSequence = Vec<String>;

/// Lowercasing whitespace tokenizer. Pure and deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Tokenize one document.
    pub fn tokenize(&self, text: &str) -> TokenSequence {
        let lowered = text.to_lowercase();

        if lowered.is_empty() {
            return vec![String::new()];
        }

        let mut tokens = Vec::new();

        // A leading separator run produces an empty first field
        if lowered.starts_with(char::is_whitespace) {
            tokens.push(String::new());
        }

        tokens.extend(lowered.split_whitespace().map(str::to_string));

        // ...and a trailing one an empty last field
        if lowered.ends_with(char::is_whitespace) {
            tokens.push(String::new());
        }

        tokens
    }

    /// Tokenize every document, preserving corpus order.
    pub fn tokenize_all<S: AsRef<str>>(&self, texts: &[S]) -> Vec<TokenSequence> {
        texts.iter().map(|t| self.tokenize(t.as_ref())).collect()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_input_gives_one_empty_token() {
        let t = WhitespaceTokenizer::new();
        assert_eq!(t.tokenize(""), vec![String::new()]);
    }

    #[test]
    fn test_lowercases_and_collapses_whitespace() {
        let t = WhitespaceTokenizer::new();
        assert_eq!(t.tokenize("Hello  World"), vec!["hello", "world"]);
    }

    #[test]
    fn test_keeps_punctuation() {
        let t = WhitespaceTokenizer::new();
        assert_eq!(t.tokenize("WIN £100!! now"), vec!["win", "£100!!", "now"]);
    }

    #[test]
    fn test_mixed_whitespace_runs() {
        let t = WhitespaceTokenizer::new();
        assert_eq!(t.tokenize("a\t\nb \r c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_edge_whitespace_yields_empty_tokens() {
        let t = WhitespaceTokenizer::new();
        assert_eq!(t.tokenize(" ok "), vec!["", "ok", ""]);
        assert_eq!(t.tokenize("   "), vec!["", ""]);
    }

    #[test]
    fn test_tokenize_all_preserves_order() {
        let t    = WhitespaceTokenizer::new();
        let docs = t.tokenize_all(&["B a", "c"]);
        assert_eq!(docs, vec![vec!["b", "a"], vec!["c"]]);
    }

    proptest! {
        #[test]
        fn prop_tokens_are_lowercase_and_whitespace_free(text in "[A-Za-zÀ-ÿ0-9 \t\n!?.,£]{0,200}") {
            let tokens = WhitespaceTokenizer::new().tokenize(&text);
            prop_assert!(!tokens.is_empty());
            for tok in &tokens {
                prop_assert!(!tok.chars().any(char::is_whitespace));
                prop_assert_eq!(tok.clone(), tok.to_lowercase());
            }
        }

        #[test]
        fn prop_non_empty_tokens_match_split_whitespace(text in "[A-Za-z0-9 \t\n]{0,120}") {
            let tokens: Vec<String> = WhitespaceTokenizer::new()
                .tokenize(&text)
                .into_iter()
                .filter(|t| !t.is_empty())
                .collect();
            let lowered = text.to_lowercase();
            let expected: Vec<String> = lowered.split_whitespace().map(str::to_string).collect();
            prop_assert_eq!(tokens, expected);
        }
    }
}
