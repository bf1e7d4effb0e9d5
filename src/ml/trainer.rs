// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Full train (+ optional validation) loop using Burn's
// DataLoader and Adam, for a fixed number of epochs.
//
//   - Training uses TrainBackend (Autodiff<NdArray>) for gradients
//   - model.valid() returns the model on InferBackend (NdArray)
//   - Validation batcher must also use InferBackend
//
// The call blocks until every epoch has run. There is no
// cancellation; the epoch count bounds the work.
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    nn::loss::BinaryCrossEntropyLossConfig,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::data::{batcher::SmsBatcher, dataset::SmsDataset};
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::model::{SpamClassifier, SpamClassifierConfig};

pub type TrainBackend = burn::backend::Autodiff<burn::backend::NdArray>;
pub type InferBackend = burn::backend::NdArray;

/// Optimiser and loop settings.
#[derive(Debug, Clone)]
pub struct TrainingOptions {
    pub epochs:        usize,
    pub batch_size:    usize,
    pub learning_rate: f64,
    pub seed:          u64,
}

/// What training hands back to the orchestrator.
pub struct TrainingOutcome {
    /// Trained weights on the inference backend (no autodiff)
    pub model:   SpamClassifier<InferBackend>,
    pub history: Vec<EpochMetrics>,
}

pub fn run_training(
    model_cfg:     &SpamClassifierConfig,
    opts:          &TrainingOptions,
    train_dataset: SmsDataset,
    val_dataset:   Option<SmsDataset>,
    metrics:       Option<&MetricsLogger>,
) -> Result<TrainingOutcome> {
    let device = burn::backend::ndarray::NdArrayDevice::default();
    tracing::info!("Using NdArray device: {:?}", device);

    TrainBackend::seed(opts.seed);

    // ── Build model ───────────────────────────────────────────────────────────
    let mut model: SpamClassifier<TrainBackend> = model_cfg.init(&device);
    tracing::info!(
        "Model ready: encoding={:?}, input_width={}, hidden={}",
        model_cfg.encoding,
        model_cfg.input_width(),
        model_cfg.hidden_units
    );

    let mut optim = AdamConfig::new().with_epsilon(1e-7).init();

    // ── Training data loader (autodiff backend) ───────────────────────────────
    let train_batcher = SmsBatcher::<TrainBackend>::new(device.clone());
    let train_loader  = DataLoaderBuilder::new(train_batcher)
        .batch_size(opts.batch_size)
        .shuffle(opts.seed)
        .num_workers(1)
        .build(train_dataset);

    // ── Validation data loader (inner backend, no autodiff overhead) ──────────
    let val_loader = val_dataset.map(|ds| {
        DataLoaderBuilder::new(SmsBatcher::<InferBackend>::new(device.clone()))
            .batch_size(opts.batch_size)
            .num_workers(1)
            .build(ds)
    });

    let mut history = Vec::with_capacity(opts.epochs);

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=opts.epochs {
        let mut loss_sum = 0.0f64;
        let mut batches  = 0usize;
        let mut correct  = 0usize;
        let mut seen     = 0usize;

        for batch in train_loader.iter() {
            let batch_len = batch.targets.dims()[0];
            let (loss, probs) = model.forward_loss(batch.inputs, batch.targets.clone());

            loss_sum += loss.clone().into_scalar().elem::<f64>();
            batches  += 1;
            correct  += count_correct(probs, batch.targets);
            seen     += batch_len;

            // Backward pass + Adam update
            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(opts.learning_rate, model, grads);
        }

        let train_loss = if batches > 0 { loss_sum / batches as f64 } else { f64::NAN };
        let train_acc  = ratio(correct, seen);

        // ── Validation phase ──────────────────────────────────────────────────
        let (val_loss, val_acc) = match &val_loader {
            Some(loader) => {
                let model_valid = model.valid();
                let mut loss_sum = 0.0f64;
                let mut batches  = 0usize;
                let mut correct  = 0usize;
                let mut seen     = 0usize;

                for batch in loader.iter() {
                    let logits = model_valid.forward(batch.inputs).flatten::<1>(0, 1);
                    let bce = BinaryCrossEntropyLossConfig::new()
                        .with_logits(true)
                        .init(&logits.device());

                    loss_sum += bce
                        .forward(logits.clone(), batch.targets.clone())
                        .into_scalar()
                        .elem::<f64>();
                    batches += 1;
                    seen    += batch.targets.dims()[0];
                    correct += count_correct(
                        burn::tensor::activation::sigmoid(logits),
                        batch.targets,
                    );
                }

                if batches > 0 {
                    (Some(loss_sum / batches as f64), Some(ratio(correct, seen)))
                } else {
                    (None, None)
                }
            }
            None => (None, None),
        };

        let m = EpochMetrics::new(epoch, train_loss, train_acc, val_loss, val_acc);
        tracing::info!("Epoch {:>3}/{} | {}", epoch, opts.epochs, m);
        if let Some(logger) = metrics {
            logger.log(&m)?;
        }
        history.push(m);
    }

    tracing::info!("Training complete");
    Ok(TrainingOutcome { model: model.valid(), history })
}

/// Number of predictions on the right side of 0.5.
fn count_correct<B: Backend>(probs: Tensor<B, 1>, targets: Tensor<B, 1, Int>) -> usize {
    let predicted = probs.greater_elem(0.5).int();
    let hits: i64 = predicted
        .equal(targets)
        .int()
        .sum()
        .into_scalar()
        .elem::<i64>();
    hits as usize
}

fn ratio(num: usize, den: usize) -> f64 {
    if den > 0 { num as f64 / den as f64 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::assembler::{FeatureEncoding, FeatureRow};
    use crate::data::dataset::SmsItem;

    fn toy_dataset() -> SmsDataset {
        // spam documents start with id 1, ham with id 2
        let items = (0..8)
            .map(|i| {
                let target = (i % 2) as u8;
                let first  = if target == 1 { 1 } else { 2 };
                SmsItem { features: FeatureRow::Ids(vec![first, 3, 0]), target }
            })
            .collect();
        SmsDataset::new(items)
    }

    #[test]
    fn test_runs_every_epoch_and_records_history() {
        let cfg  = SpamClassifierConfig::new(FeatureEncoding::Index, 4, 3);
        let opts = TrainingOptions { epochs: 3, batch_size: 4, learning_rate: 1e-2, seed: 1 };

        let outcome = run_training(&cfg, &opts, toy_dataset(), Some(toy_dataset()), None).unwrap();
        assert_eq!(outcome.history.len(), 3);
        assert_eq!(outcome.history[2].epoch, 3);
        assert!(outcome.history.iter().all(|m| m.train_loss.is_finite()));
        assert!(outcome.history.iter().all(|m| m.val_acc.is_some()));
    }

    #[test]
    fn test_ratio_handles_zero_denominator() {
        assert_eq!(ratio(3, 0), 0.0);
        assert_eq!(ratio(1, 4), 0.25);
    }
}
