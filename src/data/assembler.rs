// ============================================================
// Layer 4 — Tensor Assembler
// ============================================================
// Stacks padded documents into one rectangular feature batch
// and the matching (N, 1) label batch.
//
// Feature ids:
//   real token at vocabulary index i → feature id i + 1
//   padding position                 → feature id 0
//
// Feature id 0 is reserved for padding only, and `vocab_size`
// below is the full feature width (vocabulary length + 1).
//
// Three layouts are supported:
//
//   Index   (N, L)             raw feature ids, fed to an
//                              embedding layer, no normalisation
//   Scalar  (N, L)             ids / (vocab_size - 1), so every
//                              value lies in [0, 1]
//   OneHot  (N, L, vocab_size) one hot cell per position, scaled
//                              by 1 / (vocab_size - 1) like
//                              Scalar; N × L × V floats, only
//                              viable for small V
//
// The batch is plain Rust data. Layer 5 turns it into tensors.

use serde::{Deserialize, Serialize};

use crate::data::padder::PaddedSequence;
use crate::domain::error::{PipelineError, Result};
use crate::domain::record::Label;

/// Feature id written for padded positions.
pub const PAD_FEATURE_ID: u32 = 0;

/// How padded sequences are laid out for the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureEncoding {
    /// Integer ids for an embedding lookup
    #[default]
    Index,
    /// Normalised scalar ids for a dense input layer
    Scalar,
    /// One-hot rows per position
    OneHot,
}

/// Feature storage: integer ids or floats, row-major.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValues {
    Ids(Vec<u32>),
    Scalars(Vec<f32>),
}

/// A rectangular batch of features.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureBatch {
    encoding: FeatureEncoding,
    /// (N, L) or (N, L, V)
    shape:    Vec<usize>,
    values:   FeatureValues,
}

impl FeatureBatch {
    pub fn encoding(&self) -> FeatureEncoding {
        self.encoding
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn values(&self) -> &FeatureValues {
        &self.values
    }

    /// Number of documents (first dimension).
    pub fn rows(&self) -> usize {
        self.shape[0]
    }

    /// Values per document once any trailing dimensions are flattened.
    pub fn row_width(&self) -> usize {
        self.shape[1..].iter().product()
    }

    /// Split into one flattened feature row per document.
    pub fn into_rows(self) -> Vec<FeatureRow> {
        let width = self.row_width();
        if width == 0 {
            return Vec::new();
        }
        match self.values {
            FeatureValues::Ids(ids) => ids
                .chunks(width)
                .map(|c| FeatureRow::Ids(c.to_vec()))
                .collect(),
            FeatureValues::Scalars(xs) => xs
                .chunks(width)
                .map(|c| FeatureRow::Scalars(c.to_vec()))
                .collect(),
        }
    }
}

/// The flattened features of one document.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureRow {
    Ids(Vec<u32>),
    Scalars(Vec<f32>),
}

/// Labels as training targets, shape (N, 1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelBatch {
    values: Vec<u8>,
}

impl LabelBatch {
    pub fn shape(&self) -> [usize; 2] {
        [self.values.len(), 1]
    }

    pub fn values(&self) -> &[u8] {
        &self.values
    }

    /// Row-per-label view, e.g. `[[1], [0]]`.
    pub fn to_rows(&self) -> Vec<[u8; 1]> {
        self.values.iter().map(|&v| [v]).collect()
    }
}

// ─── TensorAssembler ──────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, Default)]
pub struct TensorAssembler {
    encoding: FeatureEncoding,
}

impl TensorAssembler {
    pub fn new(encoding: FeatureEncoding) -> Self {
        Self { encoding }
    }

    pub fn encoding(&self) -> FeatureEncoding {
        self.encoding
    }

    /// Assemble a training batch.
    ///
    /// Fails with `ShapeMismatch` when the number of sequences and
    /// labels differ, or when the sequences are not all the same length.
    pub fn assemble(
        &self,
        padded:     &[PaddedSequence],
        labels:     &[Label],
        vocab_size: usize,
    ) -> Result<(FeatureBatch, LabelBatch)> {
        if padded.len() != labels.len() {
            return Err(PipelineError::ShapeMismatch {
                context:  "feature/label count",
                expected: padded.len(),
                actual:   labels.len(),
            });
        }

        let features = self.assemble_features(padded, vocab_size)?;
        let labels   = LabelBatch {
            values: labels.iter().map(|l| l.as_target()).collect(),
        };

        tracing::debug!(
            "Assembled feature batch {:?} and label batch {:?}",
            features.shape(),
            labels.shape()
        );
        Ok((features, labels))
    }

    /// Assemble features only, as needed at inference time.
    pub fn assemble_features(
        &self,
        padded:     &[PaddedSequence],
        vocab_size: usize,
    ) -> Result<FeatureBatch> {
        if vocab_size < 2 {
            return Err(PipelineError::InvalidConfiguration(format!(
                "feature width must cover padding and at least one token, got {vocab_size}"
            )));
        }

        let n       = padded.len();
        let seq_len = padded.first().map(PaddedSequence::len).unwrap_or(0);

        let mut ids = Vec::with_capacity(n * seq_len);
        for seq in padded {
            if seq.len() != seq_len {
                return Err(PipelineError::ShapeMismatch {
                    context:  "padded sequence length",
                    expected: seq_len,
                    actual:   seq.len(),
                });
            }
            for (&index, real) in seq.ids().iter().zip(seq.attention_mask()) {
                ids.push(feature_id(index, real == 1, vocab_size)?);
            }
        }

        let batch = match self.encoding {
            FeatureEncoding::Index => FeatureBatch {
                encoding: self.encoding,
                shape:    vec![n, seq_len],
                values:   FeatureValues::Ids(ids),
            },
            FeatureEncoding::Scalar => {
                let mut xs: Vec<f32> = ids.iter().map(|&id| id as f32).collect();
                normalize(&mut xs, vocab_size);
                FeatureBatch {
                    encoding: self.encoding,
                    shape:    vec![n, seq_len],
                    values:   FeatureValues::Scalars(xs),
                }
            }
            FeatureEncoding::OneHot => {
                let mut xs = vec![0.0f32; n * seq_len * vocab_size];
                for (slot, &id) in ids.iter().enumerate() {
                    xs[slot * vocab_size + id as usize] = 1.0;
                }
                normalize(&mut xs, vocab_size);
                FeatureBatch {
                    encoding: self.encoding,
                    shape:    vec![n, seq_len, vocab_size],
                    values:   FeatureValues::Scalars(xs),
                }
            }
        };

        Ok(batch)
    }
}

/// Shift a real vocabulary index past the padding id, or emit the
/// padding id for padded positions.
fn feature_id(index: u32, real: bool, vocab_size: usize) -> Result<u32> {
    if !real {
        return Ok(PAD_FEATURE_ID);
    }
    let id = index.checked_add(1).ok_or(PipelineError::ShapeMismatch {
        context:  "feature id range",
        expected: vocab_size - 1,
        actual:   index as usize,
    })?;
    if id as usize >= vocab_size {
        return Err(PipelineError::ShapeMismatch {
            context:  "feature id range",
            expected: vocab_size - 1,
            actual:   id as usize,
        });
    }
    Ok(id)
}

/// Divide every value by `vocab_size - 1`, mapping ids onto [0, 1].
fn normalize(values: &mut [f32], vocab_size: usize) {
    let scale = (vocab_size - 1) as f32;
    for v in values.iter_mut() {
        *v /= scale;
    }
}
