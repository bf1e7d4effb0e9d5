// ============================================================
// Layer 4 — Padder / Truncator
// ============================================================
// Forces every encoded document to exactly `L` positions.
//
//   |seq| >  L  → keep the first L entries (trailing tokens lost)
//   |seq| <  L  → append L - |seq| zero entries on the right
//   |seq| == L  → unchanged
//
// Example with L = 5:
//   [0, 2, 1]          → [0, 2, 1, 0, 0]   real_len = 3
//   [4, 4, 4, 4, 4, 4] → [4, 4, 4, 4, 4]   real_len = 5
//
// The padding value is index 0, which is also a real vocabulary
// index. A PaddedSequence therefore records how many leading
// positions are real tokens, and the tensor assembler uses that
// count to give padding its own reserved feature id.

use crate::data::encoder::EncodedSequence;
use crate::data::tokenizer::TokenSequence;
use crate::domain::error::{PipelineError, Result};

/// Numeric value written into padded positions.
pub const PAD_INDEX: u32 = 0;

/// Default number of token positions per document.
pub const DEFAULT_MAX_SEQ_LEN: usize = 100;

/// An encoded document forced to a fixed length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaddedSequence {
    ids:      Vec<u32>,
    /// Number of leading positions holding real tokens
    real_len: usize,
}

impl PaddedSequence {
    pub fn ids(&self) -> &[u32] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn real_len(&self) -> usize {
        self.real_len
    }

    /// 1 for real token positions, 0 for padding.
    pub fn attention_mask(&self) -> Vec<u32> {
        let real = self.real_len();
        (0..self.ids.len())
            .map(|i| u32::from(i < real))
            .collect()
    }
}

/// Pad or truncate `sequence` to exactly `length` entries.
///
/// Total for every `length`, including 0.
pub fn fit(sequence: EncodedSequence, length: usize) -> PaddedSequence {
    let mut ids  = sequence.into_inner();
    let real_len = ids.len().min(length);

    // Vec::resize truncates or extends in one call
    ids.resize(length, PAD_INDEX);

    PaddedSequence { ids, real_len }
}

// ─── SequenceFitter ───────────────────────────────────────────────────────────
/// A configured padder/truncator holding the sequence length cap.
#[derive(Debug, Clone, Copy)]
pub struct SequenceFitter {
    length: usize,
}

impl SequenceFitter {
    /// Fails with `InvalidConfiguration` when `length` is zero.
    pub fn new(length: usize) -> Result<Self> {
        if length == 0 {
            return Err(PipelineError::InvalidConfiguration(
                "maximum sequence length must be greater than zero".to_string(),
            ));
        }
        Ok(Self { length })
    }

    /// Pick `L` from the corpus itself: the longest tokenized document.
    pub fn from_longest(documents: &[TokenSequence]) -> Result<Self> {
        let longest = documents.iter().map(Vec::len).max().unwrap_or(0);
        tracing::debug!("Derived sequence length {} from corpus", longest);
        Self::new(longest)
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn fit(&self, sequence: EncodedSequence) -> PaddedSequence {
        fit(sequence, self.length)
    }

    pub fn fit_all(&self, sequences: Vec<EncodedSequence>) -> Vec<PaddedSequence> {
        sequences.into_iter().map(|s| self.fit(s)).collect()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pads_short_sequence() {
        let padded = fit(vec![0, 2, 1].into(), 5);
        assert_eq!(padded.ids(), &[0, 2, 1, 0, 0]);
        assert_eq!(padded.real_len(), 3);
        assert_eq!(padded.attention_mask(), vec![1, 1, 1, 0, 0]);
    }

    #[test]
    fn test_truncates_long_sequence() {
        let padded = fit(vec![0, 2, 1].into(), 2);
        assert_eq!(padded.ids(), &[0, 2]);
        assert_eq!(padded.real_len(), 2);
    }

    #[test]
    fn test_exact_length_unchanged() {
        let padded = fit(vec![7, 8, 9].into(), 3);
        assert_eq!(padded.ids(), &[7, 8, 9]);
        assert_eq!(padded.attention_mask(), vec![1, 1, 1]);
    }

    #[test]
    fn test_zero_length_is_total() {
        let padded = fit(vec![1, 2].into(), 0);
        assert_eq!(padded.len(), 0);
        assert_eq!(padded.real_len(), 0);
    }

    #[test]
    fn test_padding_distinguishable_from_index_zero() {
        let padded = fit(vec![0].into(), 2);
        assert_eq!(padded.ids(), &[0, 0]);
        assert_eq!(padded.attention_mask(), vec![1, 0]);
    }

    #[test]
    fn test_fitter_rejects_zero_length() {
        let err = SequenceFitter::new(0).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_from_longest() {
        let docs = vec![
            vec!["a".to_string()],
            vec!["b".to_string(), "c".to_string(), "d".to_string()],
        ];
        assert_eq!(SequenceFitter::from_longest(&docs).unwrap().length(), 3);
        assert!(SequenceFitter::from_longest(&[]).is_err());
    }

    proptest! {
        #[test]
        fn prop_result_has_exact_length(
            seq in prop::collection::vec(0u32..50, 0..40),
            len in 0usize..60,
        ) {
            let padded = fit(seq.clone().into(), len);
            prop_assert_eq!(padded.len(), len);
            prop_assert_eq!(padded.real_len(), seq.len().min(len));
        }

        #[test]
        fn prop_fitting_is_idempotent(
            seq in prop::collection::vec(0u32..50, 0..40),
            len in 0usize..60,
        ) {
            let once  = fit(seq.into(), len);
            let twice = fit(once.ids().to_vec().into(), len);
            prop_assert_eq!(once.ids(), twice.ids());
        }
    }
}
