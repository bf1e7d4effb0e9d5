// ============================================================
// Layer 4 — SMS Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec<SmsItem>
// into tensors for one mini-batch.
//
// Every item already has the same flattened width (the
// assembler guarantees a rectangular batch), so batching is:
//
//   [row_1, row_2, ..., row_B] → flat Vec → reshape [B, width]
//
// Integer rows become an Int tensor for the embedding lookup;
// float rows become a Float tensor for the dense input layer.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::data::assembler::{FeatureBatch, FeatureRow, FeatureValues};
use crate::data::dataset::SmsItem;

// ─── ModelInput ───────────────────────────────────────────────────────────────
/// Model-ready features for a batch, shape [batch_size, width].
#[derive(Debug, Clone)]
pub enum ModelInput<B: Backend> {
    /// Feature ids for an embedding layer
    Ids(Tensor<B, 2, Int>),
    /// Scalar or flattened one-hot features
    Scalars(Tensor<B, 2>),
}

// ─── SmsBatch ─────────────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct SmsBatch<B: Backend> {
    pub inputs:  ModelInput<B>,
    /// Targets — shape [batch_size], 0 = ham, 1 = spam
    pub targets: Tensor<B, 1, Int>,
}

// ─── SmsBatcher ───────────────────────────────────────────────────────────────
#[derive(Clone, Debug)]
pub struct SmsBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> SmsBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }

    /// Stack feature rows into one model input tensor.
    ///
    /// All rows must share the variant and width of the first row.
    pub fn stack_features(&self, rows: &[FeatureRow]) -> ModelInput<B> {
        let batch_size = rows.len();

        match rows.first() {
            Some(FeatureRow::Ids(first)) => {
                let width = first.len();
                let flat: Vec<i32> = rows
                    .iter()
                    .flat_map(|r| match r {
                        FeatureRow::Ids(ids) => ids.iter().map(|&x| x as i32).collect::<Vec<_>>(),
                        FeatureRow::Scalars(xs) => xs.iter().map(|&x| x as i32).collect(),
                    })
                    .collect();
                ModelInput::Ids(
                    Tensor::<B, 1, Int>::from_ints(flat.as_slice(), &self.device)
                        .reshape([batch_size, width]),
                )
            }
            Some(FeatureRow::Scalars(first)) => {
                let width = first.len();
                let flat: Vec<f32> = rows
                    .iter()
                    .flat_map(|r| match r {
                        FeatureRow::Scalars(xs) => xs.clone(),
                        FeatureRow::Ids(ids) => ids.iter().map(|&x| x as f32).collect(),
                    })
                    .collect();
                ModelInput::Scalars(
                    Tensor::<B, 1>::from_floats(flat.as_slice(), &self.device)
                        .reshape([batch_size, width]),
                )
            }
            None => ModelInput::Scalars(Tensor::<B, 2>::zeros([0, 0], &self.device)),
        }
    }

    /// Turn a whole assembled batch into one model input, without
    /// splitting it into per-document rows first.
    pub fn stack_batch(&self, features: &FeatureBatch) -> ModelInput<B> {
        let shape = [features.rows(), features.row_width()];
        match features.values() {
            FeatureValues::Ids(ids) => {
                let flat: Vec<i32> = ids.iter().map(|&x| x as i32).collect();
                ModelInput::Ids(
                    Tensor::<B, 1, Int>::from_ints(flat.as_slice(), &self.device).reshape(shape),
                )
            }
            FeatureValues::Scalars(xs) => ModelInput::Scalars(
                Tensor::<B, 1>::from_floats(xs.as_slice(), &self.device).reshape(shape),
            ),
        }
    }
}

impl<B: Backend> Batcher<SmsItem, SmsBatch<B>> for SmsBatcher<B> {
    fn batch(&self, items: Vec<SmsItem>) -> SmsBatch<B> {
        let targets: Vec<i32> = items.iter().map(|i| i32::from(i.target)).collect();
        let rows: Vec<FeatureRow> = items.into_iter().map(|i| i.features).collect();

        let inputs  = self.stack_features(&rows);
        let targets = Tensor::<B, 1, Int>::from_ints(targets.as_slice(), &self.device);

        SmsBatch { inputs, targets }
    }
}
