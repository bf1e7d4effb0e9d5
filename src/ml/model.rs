use burn::{
    nn::{
        loss::BinaryCrossEntropyLossConfig,
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::{relu, sigmoid},
};

use crate::data::assembler::FeatureEncoding;
use crate::data::batcher::ModelInput;

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct SpamClassifierConfig {
    /// Feature layout produced by the assembler
    pub encoding:      FeatureEncoding,
    /// Feature width: vocabulary length + the padding id
    pub vocab_size:    usize,
    /// Positions per document (L)
    pub seq_len:       usize,
    #[config(default = 16)]
    pub embedding_dim: usize,
    #[config(default = 16)]
    pub hidden_units:  usize,
}

impl SpamClassifierConfig {
    /// Number of values the hidden layer sees per document.
    pub fn input_width(&self) -> usize {
        match self.encoding {
            FeatureEncoding::Index  => self.seq_len * self.embedding_dim,
            FeatureEncoding::Scalar => self.seq_len,
            FeatureEncoding::OneHot => self.seq_len * self.vocab_size,
        }
    }

    pub fn init<B: Backend>(&self, device: &B::Device) -> SpamClassifier<B> {
        let embedding = match self.encoding {
            FeatureEncoding::Index => {
                Some(EmbeddingConfig::new(self.vocab_size, self.embedding_dim).init(device))
            }
            FeatureEncoding::Scalar | FeatureEncoding::OneHot => None,
        };
        let hidden = LinearConfig::new(self.input_width(), self.hidden_units).init(device);
        let output = LinearConfig::new(self.hidden_units, 1).init(device);
        SpamClassifier { embedding, hidden, output }
    }
}

/// embedding/flatten → dense(relu) → dense(1) → sigmoid
#[derive(Module, Debug)]
pub struct SpamClassifier<B: Backend> {
    pub embedding: Option<Embedding<B>>,
    pub hidden:    Linear<B>,
    pub output:    Linear<B>,
}

impl<B: Backend> SpamClassifier<B> {
    /// inputs: [batch, width] → logits: [batch, 1]
    pub fn forward(&self, inputs: ModelInput<B>) -> Tensor<B, 2> {
        let x = match (inputs, &self.embedding) {
            // [batch, L] → [batch, L, E] → [batch, L * E]
            (ModelInput::Ids(ids), Some(embedding)) => embedding.forward(ids).flatten::<2>(1, 2),
            (ModelInput::Ids(ids), None)            => ids.float(),
            (ModelInput::Scalars(x), _)             => x,
        };
        let x = relu(self.hidden.forward(x));
        self.output.forward(x)
    }

    /// Spam probability per document, shape [batch].
    pub fn predict_proba(&self, inputs: ModelInput<B>) -> Tensor<B, 1> {
        sigmoid(self.forward(inputs)).flatten::<1>(0, 1)
    }

    /// Binary cross-entropy on logits, plus the probabilities for metrics.
    pub fn forward_loss(
        &self,
        inputs:  ModelInput<B>,
        targets: Tensor<B, 1, Int>,
    ) -> (Tensor<B, 1>, Tensor<B, 1>) {
        let logits = self.forward(inputs).flatten::<1>(0, 1);
        let bce = BinaryCrossEntropyLossConfig::new()
            .with_logits(true)
            .init(&logits.device());
        let loss = bce.forward(logits.clone(), targets);
        (loss, sigmoid(logits))
    }
}
