// ============================================================
// Layer 4 — Vocabulary
// ============================================================
// A bounded mapping from token to a dense integer index.
//
// Build rules:
//   1. Collect distinct tokens across the corpus in
//      first-occurrence order
//   2. Drop empty tokens
//   3. Keep only the first `max_size` of them
//   4. Append the reserved out-of-vocabulary token "<UNK>"
//   5. Index = position in the final ordered list
//
// So for a cap V the vocabulary has at most V + 1 entries and
// the OOV token always sits at `len - 1`.
//
// Membership depends on corpus order, not on frequency. A word
// first seen after the cap is reached maps to the OOV index
// even if it is common.
//
// The build is a single fold over the token stream producing an
// immutable value; nothing is mutated after `build` returns.
//
// Reference: Rust Book §8 (Hash Maps)
//            Rust Book §13 (Iterators and Closures)

use std::collections::{HashMap, HashSet};

use crate::domain::error::{PipelineError, Result};

/// Reserved token that absorbs every word not kept by the cap.
pub const OOV_TOKEN: &str = "<UNK>";

/// Default cap on regular (non-OOV) vocabulary entries.
pub const DEFAULT_MAX_VOCAB_SIZE: usize = 5000;

// ─── Vocabulary ───────────────────────────────────────────────────────────────
/// Immutable token ↔ index mapping. Indices are `0..len` and dense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    /// index → token, OOV last
    tokens: Vec<String>,
    /// token → index
    index:  HashMap<String, u32>,
}

impl Vocabulary {
    /// Build from an ordered list of distinct regular words.
    /// The OOV token is appended here so it is always last.
    fn from_words(words: Vec<String>) -> Self {
        let mut tokens = words;
        tokens.push(OOV_TOKEN.to_string());

        let index = tokens
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i as u32))
            .collect();

        Self { tokens, index }
    }

    /// Number of entries including the OOV token. Never zero.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Index of the OOV token (`len - 1`).
    pub fn oov_index(&self) -> u32 {
        (self.tokens.len() - 1) as u32
    }

    /// Index for `token`, or `None` when it was not retained.
    pub fn index_of(&self, token: &str) -> Option<u32> {
        self.index.get(token).copied()
    }

    /// Index for `token`, falling back to the OOV index on a miss.
    pub fn lookup(&self, token: &str) -> u32 {
        self.index_of(token).unwrap_or_else(|| self.oov_index())
    }

    /// Inverse mapping: the token stored at `index`.
    pub fn token_at(&self, index: u32) -> Option<&str> {
        self.tokens.get(index as usize).map(String::as_str)
    }

    /// Width of the feature space handed to the model: every
    /// vocabulary index plus the reserved padding id.
    pub fn feature_size(&self) -> usize {
        self.tokens.len() + 1
    }

    /// `(token, index)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.tokens
            .iter()
            .enumerate()
            .map(|(i, t)| (t.as_str(), i as u32))
    }
}

// ─── VocabularyBuilder ────────────────────────────────────────────────────────
/// Builds a [`Vocabulary`] with a fixed cap on regular entries.
#[derive(Debug, Clone, Copy)]
pub struct VocabularyBuilder {
    max_size: usize,
}

impl VocabularyBuilder {
    /// Fails with `InvalidConfiguration` when `max_size` is zero.
    pub fn new(max_size: usize) -> Result<Self> {
        if max_size == 0 {
            return Err(PipelineError::InvalidConfiguration(
                "maximum vocabulary size must be greater than zero".to_string(),
            ));
        }
        Ok(Self { max_size })
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Reduce every token of every document into a vocabulary.
    pub fn build<D>(&self, documents: &[D]) -> Vocabulary
    where
        D: AsRef<[String]>,
    {
        let (words, _) = documents
            .iter()
            .flat_map(|doc| doc.as_ref().iter())
            .filter(|tok| !tok.is_empty() && tok.as_str() != OOV_TOKEN)
            .fold(
                (Vec::new(), HashSet::new()),
                |(mut words, mut seen): (Vec<String>, HashSet<&str>), tok| {
                    if words.len() < self.max_size && seen.insert(tok.as_str()) {
                        words.push(tok.clone());
                    }
                    (words, seen)
                },
            );

        let vocab = Vocabulary::from_words(words);
        tracing::debug!(
            "Vocabulary built: {} entries (cap {} + OOV)",
            vocab.len(),
            self.max_size
        );
        vocab
    }
}
