// ============================================================
// Layer 2 — Trained Artifact
// ============================================================
// What a training run exports: the fitted vectorizer
// (vocabulary, sequence length, feature encoding) together with
// the trained model. Inference needs all of it, since new text
// has to be tokenized, encoded and padded exactly like the
// training corpus.
//
// The artifact lives in memory only.

use anyhow::Result;

use crate::data::assembler::FeatureEncoding;
use crate::data::vectorizer::Vectorizer;
use crate::data::vocabulary::Vocabulary;
use crate::domain::verdict::{classify, Verdict};
use crate::infra::metrics::EpochMetrics;
use crate::ml::inferencer::SpamPredictor;

pub struct TrainedArtifact {
    vectorizer: Vectorizer,
    predictor:  SpamPredictor,
    history:    Vec<EpochMetrics>,
}

impl TrainedArtifact {
    pub fn new(vectorizer: Vectorizer, predictor: SpamPredictor, history: Vec<EpochMetrics>) -> Self {
        Self { vectorizer, predictor, history }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        self.vectorizer.vocabulary()
    }

    pub fn max_sequence_length(&self) -> usize {
        self.vectorizer.max_sequence_length()
    }

    pub fn encoding(&self) -> FeatureEncoding {
        self.vectorizer.encoding()
    }

    pub fn history(&self) -> &[EpochMetrics] {
        &self.history
    }

    /// Spam probability per text, in input order.
    pub fn predict_proba<S: AsRef<str>>(&self, texts: &[S]) -> Result<Vec<f32>> {
        let features = self.vectorizer.features(texts)?;
        Ok(self.predictor.predict(features))
    }

    /// Probability and verdict per text.
    pub fn classify<S: AsRef<str>>(&self, texts: &[S], threshold: f32) -> Result<Vec<(f32, Verdict)>> {
        Ok(self
            .predict_proba(texts)?
            .into_iter()
            .map(|p| (p, classify(p, threshold)))
            .collect())
    }
}
