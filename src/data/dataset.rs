use burn::data::dataset::Dataset;

use crate::data::assembler::{FeatureBatch, FeatureRow, LabelBatch};
use crate::domain::error::{PipelineError, Result};

/// One assembled document: its flattened features and its target.
#[derive(Debug, Clone, PartialEq)]
pub struct SmsItem {
    pub features: FeatureRow,
    pub target:   u8,
}

pub struct SmsDataset {
    items: Vec<SmsItem>,
}

impl SmsDataset {
    pub fn new(items: Vec<SmsItem>) -> Self { Self { items } }
}

/// Split a whole-corpus batch back into per-document items so the
/// DataLoader can shuffle and mini-batch them.
pub fn items_from_batch(features: FeatureBatch, labels: &LabelBatch) -> Result<Vec<SmsItem>> {
    if features.rows() != labels.values().len() {
        return Err(PipelineError::ShapeMismatch {
            context:  "feature/label rows",
            expected: features.rows(),
            actual:   labels.values().len(),
        });
    }

    Ok(features
        .into_rows()
        .into_iter()
        .zip(labels.to_rows())
        .map(|(features, [target])| SmsItem { features, target })
        .collect())
}

impl Dataset<SmsItem> for SmsDataset {
    fn get(&self, index: usize) -> Option<SmsItem> {
        self.items.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}
