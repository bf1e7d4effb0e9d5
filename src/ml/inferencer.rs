// ============================================================
// Layer 5 — Predictor
// ============================================================
// Batched prediction with a trained model.

use burn::prelude::*;

use crate::data::assembler::FeatureBatch;
use crate::data::batcher::SmsBatcher;
use crate::ml::model::SpamClassifier;
use crate::ml::trainer::InferBackend;

pub struct SpamPredictor<B: Backend = InferBackend> {
    model:   SpamClassifier<B>,
    batcher: SmsBatcher<B>,
}

impl<B: Backend> SpamPredictor<B> {
    pub fn new(model: SpamClassifier<B>, device: B::Device) -> Self {
        Self { model, batcher: SmsBatcher::new(device) }
    }

    /// Spam probability for every row of `features`, in row order.
    pub fn predict(&self, features: FeatureBatch) -> Vec<f32> {
        if features.rows() == 0 {
            return Vec::new();
        }
        let inputs = self.batcher.stack_batch(&features);

        self.model
            .predict_proba(inputs)
            .into_data()
            .iter::<f32>()
            .collect()
    }
}
