// ============================================================
// Layer 4 — Sequence Encoder
// ============================================================
// Maps a tokenized document to the vocabulary index of every
// token, one index per position.
//
// A token that is not in the vocabulary (never seen, dropped
// by the cap, or the empty token) maps to the OOV index. The
// miss is resolved through `Option`, so a lookup miss is never
// confused with the word that legitimately owns index 0.

use crate::data::vocabulary::Vocabulary;

/// Vocabulary indices for one document, before padding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EncodedSequence(Vec<u32>);

impl EncodedSequence {
    pub fn new(ids: Vec<u32>) -> Self {
        Self(ids)
    }

    pub fn into_inner(self) -> Vec<u32> {
        self.0
    }
}

impl From<Vec<u32>> for EncodedSequence {
    fn from(ids: Vec<u32>) -> Self {
        Self(ids)
    }
}

/// Encodes token sequences against a borrowed vocabulary.
#[derive(Debug, Clone, Copy)]
pub struct SequenceEncoder<'v> {
    vocabulary: &'v Vocabulary,
}

impl<'v> SequenceEncoder<'v> {
    pub fn new(vocabulary: &'v Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn encode(&self, tokens: &[String]) -> EncodedSequence {
        EncodedSequence::new(
            tokens
                .iter()
                .map(|tok| self.vocabulary.lookup(tok))
                .collect(),
        )
    }

    pub fn encode_all<D: AsRef<[String]>>(&self, documents: &[D]) -> Vec<EncodedSequence> {
        documents.iter().map(|d| self.encode(d.as_ref())).collect()
    }
}
