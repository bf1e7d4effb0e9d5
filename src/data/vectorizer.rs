// ============================================================
// Layer 4 — Vectorizer
// ============================================================
// Bundles the fitted encoding state of a run:
//
//   WhitespaceTokenizer → Vocabulary → SequenceEncoder
//       → SequenceFitter → TensorAssembler
//
// Training and inference both go through this struct, so new
// text is tokenized, encoded and padded exactly like the
// training corpus was.

use crate::data::assembler::{FeatureBatch, FeatureEncoding, LabelBatch, TensorAssembler};
use crate::data::encoder::SequenceEncoder;
use crate::data::padder::{PaddedSequence, SequenceFitter};
use crate::data::tokenizer::{TokenSequence, WhitespaceTokenizer};
use crate::data::vocabulary::Vocabulary;
use crate::domain::error::Result;
use crate::domain::record::Label;

#[derive(Debug, Clone)]
pub struct Vectorizer {
    tokenizer:  WhitespaceTokenizer,
    vocabulary: Vocabulary,
    fitter:     SequenceFitter,
    assembler:  TensorAssembler,
}

impl Vectorizer {
    pub fn new(vocabulary: Vocabulary, fitter: SequenceFitter, encoding: FeatureEncoding) -> Self {
        Self {
            tokenizer: WhitespaceTokenizer::new(),
            vocabulary,
            fitter,
            assembler: TensorAssembler::new(encoding),
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn max_sequence_length(&self) -> usize {
        self.fitter.length()
    }

    pub fn encoding(&self) -> FeatureEncoding {
        self.assembler.encoding()
    }

    /// Feature width the model is built for.
    pub fn feature_size(&self) -> usize {
        self.vocabulary.feature_size()
    }

    /// Encode and pad already-tokenized documents.
    pub fn fit_tokens(&self, documents: &[TokenSequence]) -> Vec<PaddedSequence> {
        let encoder = SequenceEncoder::new(&self.vocabulary);
        self.fitter.fit_all(encoder.encode_all(documents))
    }

    /// Full path for a labelled, already-tokenized corpus.
    pub fn training_batch(
        &self,
        documents: &[TokenSequence],
        labels:    &[Label],
    ) -> Result<(FeatureBatch, LabelBatch)> {
        let padded = self.fit_tokens(documents);
        self.assembler.assemble(&padded, labels, self.feature_size())
    }

    /// Full path for raw texts at inference time.
    pub fn features<S: AsRef<str>>(&self, texts: &[S]) -> Result<FeatureBatch> {
        let tokens = self.tokenizer.tokenize_all(texts);
        let padded = self.fit_tokens(&tokens);
        self.assembler.assemble_features(&padded, self.feature_size())
    }
}
