// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Validate configuration      (Layer 2)
//   Step 2: Load the labelled corpus    (Layer 4 - data)
//   Step 3: Tokenize every document     (Layer 4 - data)
//   Step 4: Build the vocabulary        (Layer 4 - data)
//   Step 5: Encode, pad, assemble       (Layer 4 - data)
//   Step 6: Split train/validation      (Layer 4 - data)
//   Step 7: Run the training loop       (Layer 5 - ml)
//   Step 8: Sample predictions          (Layer 2 - reporter)
//
// Every stage propagates its error with `?`. `execute` is the
// only place a failure is caught: it is logged and the run
// yields `None`.
//
// Reference: Rust Book §13 (Iterators and Closures)
//            Burn Book §5 (Training)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::application::artifact::TrainedArtifact;
use crate::application::reporter::{ClassificationReporter, PredictionReport};
use crate::data::{
    assembler::FeatureEncoding,
    dataset::{items_from_batch, SmsDataset},
    loader::{CsvLoader, DEFAULT_LABEL_COLUMN, DEFAULT_TEXT_COLUMN},
    padder::{SequenceFitter, DEFAULT_MAX_SEQ_LEN},
    splitter::split_train_val,
    tokenizer::WhitespaceTokenizer,
    vectorizer::Vectorizer,
    vocabulary::{VocabularyBuilder, DEFAULT_MAX_VOCAB_SIZE},
};
use crate::domain::error::PipelineError;
use crate::domain::record::Label;
use crate::domain::traits::RecordSource;
use crate::domain::verdict::DEFAULT_THRESHOLD;
use crate::infra::metrics::MetricsLogger;
use crate::ml::inferencer::SpamPredictor;
use crate::ml::model::SpamClassifierConfig;
use crate::ml::trainer::{run_training, TrainingOptions};

// ─── Training Configuration ──────────────────────────────────────────────────
// All tunables for a training run, passed in explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub data_path:        String,
    pub has_headers:      bool,
    pub text_column:      String,
    pub label_column:     String,
    pub max_vocab_size:   usize,
    pub max_seq_len:      usize,
    /// Use the longest tokenized document as the sequence length
    pub derive_seq_len:   bool,
    pub encoding:         FeatureEncoding,
    pub epochs:           usize,
    pub batch_size:       usize,
    pub learning_rate:    f64,
    pub hidden_units:     usize,
    pub embedding_dim:    usize,
    /// Fraction of documents held out for validation, in [0, 1)
    pub validation_split: f64,
    pub seed:             u64,
    /// How many leading documents to show predictions for
    pub sample_count:     usize,
    pub threshold:        f32,
    pub metrics_dir:      Option<String>,
    /// Extra texts to score with the trained artifact
    pub classify:         Vec<String>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_path:        "files/sms_spam_dataset.csv".to_string(),
            has_headers:      true,
            text_column:      DEFAULT_TEXT_COLUMN.to_string(),
            label_column:     DEFAULT_LABEL_COLUMN.to_string(),
            max_vocab_size:   DEFAULT_MAX_VOCAB_SIZE,
            max_seq_len:      DEFAULT_MAX_SEQ_LEN,
            derive_seq_len:   false,
            encoding:         FeatureEncoding::Index,
            epochs:           10,
            batch_size:       32,
            learning_rate:    1e-3,
            hidden_units:     16,
            embedding_dim:    16,
            validation_split: 0.0,
            seed:             42,
            sample_count:     5,
            threshold:        DEFAULT_THRESHOLD,
            metrics_dir:      None,
            classify:         Vec::new(),
        }
    }
}

impl TrainConfig {
    /// Reject out-of-range settings before any work starts.
    pub fn validate(&self) -> Result<(), PipelineError> {
        let invalid = |msg: &str| Err(PipelineError::InvalidConfiguration(msg.to_string()));

        if self.max_vocab_size == 0 {
            return invalid("max_vocab_size must be greater than zero");
        }
        if self.max_seq_len == 0 && !self.derive_seq_len {
            return invalid("max_seq_len must be greater than zero");
        }
        if self.epochs == 0 {
            return invalid("epochs must be greater than zero");
        }
        if self.batch_size == 0 {
            return invalid("batch_size must be greater than zero");
        }
        if self.hidden_units == 0 || self.embedding_dim == 0 {
            return invalid("hidden_units and embedding_dim must be greater than zero");
        }
        if !(0.0..1.0).contains(&self.validation_split) {
            return invalid("validation_split must be in [0, 1)");
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return invalid("threshold must be in [0, 1]");
        }
        if self.learning_rate.is_nan() || self.learning_rate <= 0.0 {
            return invalid("learning_rate must be positive");
        }
        Ok(())
    }
}

/// Everything a successful run produces.
pub struct TrainingRun {
    pub artifact: TrainedArtifact,
    pub samples:  Vec<PredictionReport>,
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
    source: Box<dyn RecordSource>,
}

impl TrainUseCase {
    /// Read the corpus from the CSV file named in the config.
    pub fn new(config: TrainConfig) -> Self {
        let loader = CsvLoader::new(&config.data_path)
            .with_headers(config.has_headers)
            .with_columns(&config.text_column, &config.label_column);
        Self::with_source(config, Box::new(loader))
    }

    /// Read the corpus from any record source.
    pub fn with_source(config: TrainConfig, source: Box<dyn RecordSource>) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    /// Run the pipeline. Failures are logged here and yield `None`.
    pub fn execute(&self) -> Option<TrainingRun> {
        match self.try_execute() {
            Ok(run) => Some(run),
            Err(e) => {
                tracing::error!("FAILURE - training run aborted: {e:#}");
                None
            }
        }
    }

    /// Run the pipeline, propagating the first failure.
    pub fn try_execute(&self) -> Result<TrainingRun> {
        let cfg = &self.config;

        // ── Step 1: Validate configuration ────────────────────────────────────
        cfg.validate()?;
        tracing::debug!("Config: {}", serde_json::to_string(cfg)?);

        // ── Step 2: Load the corpus ───────────────────────────────────────────
        let records = self.source.load_all().context("loading corpus")?;
        if records.is_empty() {
            return Err(PipelineError::Ingestion("corpus contains no rows".to_string()).into());
        }
        tracing::debug!("Corpus has {} records", records.len());

        // ── Step 3: Tokenize every document ───────────────────────────────────
        let texts: Vec<&str> = records.iter().map(|r| r.text.as_str()).collect();
        let labels: Vec<Label> = records.iter().map(|r| r.label).collect();
        let tokens = WhitespaceTokenizer::new().tokenize_all(&texts);

        // ── Step 4: Build the vocabulary (whole corpus, one pass) ─────────────
        let builder    = VocabularyBuilder::new(cfg.max_vocab_size)?;
        let vocabulary = builder.build(&tokens);
        tracing::info!(
            "Vocabulary: {} entries (cap {}, OOV index {})",
            vocabulary.len(),
            builder.max_size(),
            vocabulary.oov_index()
        );
        tracing::debug!(
            "First vocabulary entries: {:?}",
            vocabulary.iter().take(10).collect::<Vec<_>>()
        );

        // ── Step 5: Encode, pad/truncate, assemble ────────────────────────────
        let fitter = if cfg.derive_seq_len {
            SequenceFitter::from_longest(&tokens)?
        } else {
            SequenceFitter::new(cfg.max_seq_len)?
        };
        let vectorizer = Vectorizer::new(vocabulary, fitter, cfg.encoding);
        let (features, label_batch) = vectorizer.training_batch(&tokens, &labels)?;
        debug_assert_eq!(features.rows(), label_batch.shape()[0]);
        tracing::info!(
            "Feature batch {:?} ({:?}), label batch {:?}",
            features.shape(),
            features.encoding(),
            label_batch.shape()
        );

        // ── Step 6: Train / validation split ──────────────────────────────────
        let items = items_from_batch(features, &label_batch)?;
        let (train_items, val_items) = if cfg.validation_split > 0.0 {
            let (train, val) = split_train_val(items, 1.0 - cfg.validation_split, cfg.seed);
            tracing::info!("Split: {} train, {} validation", train.len(), val.len());
            (train, Some(val).filter(|v| !v.is_empty()))
        } else {
            (items, None)
        };
        if train_items.is_empty() {
            return Err(PipelineError::InvalidConfiguration(
                "validation split leaves no training documents".to_string(),
            )
            .into());
        }

        // ── Step 7: Train ─────────────────────────────────────────────────────
        let model_cfg = SpamClassifierConfig::new(
            cfg.encoding,
            vectorizer.feature_size(),
            vectorizer.max_sequence_length(),
        )
        .with_embedding_dim(cfg.embedding_dim)
        .with_hidden_units(cfg.hidden_units);

        let opts = TrainingOptions {
            epochs:        cfg.epochs,
            batch_size:    cfg.batch_size,
            learning_rate: cfg.learning_rate,
            seed:          cfg.seed,
        };

        let metrics = cfg
            .metrics_dir
            .as_deref()
            .map(MetricsLogger::new)
            .transpose()?;

        let outcome = run_training(
            &model_cfg,
            &opts,
            SmsDataset::new(train_items),
            val_items.map(SmsDataset::new),
            metrics.as_ref(),
        )?;

        let predictor = SpamPredictor::new(outcome.model, Default::default());
        let artifact  = TrainedArtifact::new(vectorizer, predictor, outcome.history);

        // ── Step 8: Sample the first K predictions ────────────────────────────
        let k           = cfg.sample_count.min(records.len());
        let sample_recs = &records[..k];
        let probs       = artifact.predict_proba(&texts[..k])?;
        let samples     = ClassificationReporter::new(cfg.threshold).report(sample_recs, &probs);
        tracing::info!(
            "Sampled {} predictions, {} match their label",
            samples.len(),
            samples.iter().filter(|s| s.is_correct()).count()
        );

        Ok(TrainingRun { artifact, samples })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::SmsRecord;
    use crate::domain::traits::InMemorySource;

    fn tiny_corpus() -> InMemorySource {
        InMemorySource::new(vec![
            SmsRecord::new("buy now", Label::Spam),
            SmsRecord::new("see you later", Label::Ham),
        ])
    }

    fn quick_config() -> TrainConfig {
        TrainConfig {
            max_vocab_size: 10,
            max_seq_len:    4,
            epochs:         1,
            batch_size:     2,
            sample_count:   5,
            ..TrainConfig::default()
        }
    }

    #[test]
    fn test_end_to_end_tiny_corpus() {
        let use_case = TrainUseCase::with_source(quick_config(), Box::new(tiny_corpus()));
        let run      = use_case.try_execute().unwrap();
        let vocab    = run.artifact.vocabulary();

        for word in ["buy", "now", "see", "you", "later", "<UNK>"] {
            assert!(vocab.index_of(word).is_some(), "missing {word}");
        }
        assert_eq!(vocab.len(), 6);
        assert_eq!(vocab.oov_index(), 5);
        assert_eq!(run.artifact.max_sequence_length(), 4);
        assert_eq!(run.artifact.history().len(), 1);

        // Only two documents exist, so only two samples
        assert_eq!(run.samples.len(), 2);
        assert_eq!(run.samples[0].label, Label::Spam);
        assert_eq!(run.samples[1].text, "see you later");
    }

    #[test]
    fn test_batch_shapes_for_tiny_corpus() {
        let tokens = WhitespaceTokenizer::new().tokenize_all(&["buy now", "see you later"]);
        let vocab  = VocabularyBuilder::new(10).unwrap().build(&tokens);
        let vec    = Vectorizer::new(vocab, SequenceFitter::new(4).unwrap(), FeatureEncoding::Index);

        let (features, labels) = vec
            .training_batch(&tokens, &[Label::Spam, Label::Ham])
            .unwrap();
        assert_eq!(features.shape(), &[2, 4]);
        assert_eq!(labels.to_rows(), vec![[1], [0]]);
    }

    #[test]
    fn test_artifact_classifies_new_text() {
        let use_case = TrainUseCase::with_source(quick_config(), Box::new(tiny_corpus()));
        let run      = use_case.try_execute().unwrap();

        let out = run.artifact.classify(&["buy bitcoin now", ""], 0.5).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|(p, _)| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn test_scalar_encoding_with_validation_split() {
        let mut records = Vec::new();
        for i in 0..10 {
            records.push(SmsRecord::new(format!("win cash prize {i}"), Label::Spam));
            records.push(SmsRecord::new(format!("lunch at {i} ok"), Label::Ham));
        }
        let cfg = TrainConfig {
            encoding:         FeatureEncoding::Scalar,
            validation_split: 0.25,
            derive_seq_len:   true,
            ..quick_config()
        };
        let use_case = TrainUseCase::with_source(cfg, Box::new(InMemorySource::new(records)));
        let run      = use_case.try_execute().unwrap();

        assert_eq!(run.artifact.max_sequence_length(), 4);
        assert!(run.artifact.history()[0].val_acc.is_some());
        assert_eq!(run.samples.len(), 5);
    }

    #[test]
    fn test_empty_corpus_yields_none() {
        let use_case = TrainUseCase::with_source(quick_config(), Box::new(InMemorySource::default()));
        assert!(use_case.execute().is_none());

        let err = use_case.try_execute().err().unwrap();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::Ingestion(_))
        ));
    }

    #[test]
    fn test_invalid_configuration_is_caught() {
        let cfg = TrainConfig { max_vocab_size: 0, ..quick_config() };
        let use_case = TrainUseCase::with_source(cfg, Box::new(tiny_corpus()));
        assert!(use_case.execute().is_none());

        let err = use_case.try_execute().err().unwrap();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_missing_csv_file_yields_none() {
        let cfg = TrainConfig {
            data_path: "/no/such/corpus.csv".to_string(),
            ..quick_config()
        };
        assert!(TrainUseCase::new(cfg).execute().is_none());
    }

    #[test]
    fn test_validate_rejects_bad_ranges() {
        assert!(TrainConfig { validation_split: 1.0, ..TrainConfig::default() }.validate().is_err());
        assert!(TrainConfig { threshold: 1.5, ..TrainConfig::default() }.validate().is_err());
        assert!(TrainConfig { epochs: 0, ..TrainConfig::default() }.validate().is_err());
        assert!(TrainConfig { max_seq_len: 0, ..TrainConfig::default() }.validate().is_err());
        assert!(TrainConfig::default().validate().is_ok());
    }

    #[derive(Clone, Default)]
    struct LogCapture(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogCapture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_record_count_logged_once_at_info() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sms,label").unwrap();
        writeln!(file, "buy now,1").unwrap();
        writeln!(file, "see you later,0").unwrap();

        let cfg = TrainConfig {
            data_path: file.path().display().to_string(),
            ..quick_config()
        };

        let capture    = LogCapture::default();
        let writer     = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let run = tracing::subscriber::with_default(subscriber, || {
            TrainUseCase::new(cfg).try_execute()
        });
        assert!(run.is_ok());

        let logs  = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        let count = logs.lines().filter(|l| l.contains(" records")).count();
        assert_eq!(count, 1, "record count logged more than once:\n{logs}");
    }
}
