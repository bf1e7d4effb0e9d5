// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the `train` subcommand and all its configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for bad values
//   - type conversion (string → usize, f64, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};

use crate::application::train_use_case::TrainConfig;
use crate::data::assembler::FeatureEncoding;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train a spam classifier on a labelled SMS CSV file
    Train(TrainArgs),
}

/// How padded id sequences are turned into model input
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingArg {
    /// Integer ids fed to an embedding layer
    Index,
    /// One float per position, id / (vocab_size - 1)
    Scalar,
    /// One-hot vector per position
    OneHot,
}

impl From<EncodingArg> for FeatureEncoding {
    fn from(e: EncodingArg) -> Self {
        match e {
            EncodingArg::Index  => FeatureEncoding::Index,
            EncodingArg::Scalar => FeatureEncoding::Scalar,
            EncodingArg::OneHot => FeatureEncoding::OneHot,
        }
    }
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// CSV file with one SMS per row
    #[arg(long, default_value = "files/sms_spam_dataset.csv")]
    pub data: String,

    /// Treat the first row as data rather than a header
    #[arg(long)]
    pub no_headers: bool,

    /// Header of the text column
    #[arg(long, default_value = "sms")]
    pub text_column: String,

    /// Header of the label column (0 = ham, 1 = spam)
    #[arg(long, default_value = "label")]
    pub label_column: String,

    /// Maximum number of regular words; <UNK> is added on top
    #[arg(long, default_value_t = 5000)]
    pub max_vocab_size: usize,

    /// Every document is padded or truncated to this many tokens
    #[arg(long, default_value_t = 100)]
    pub max_seq_len: usize,

    /// Use the longest document's token count instead of --max-seq-len
    #[arg(long)]
    pub derive_seq_len: bool,

    #[arg(long, value_enum, default_value_t = EncodingArg::Index)]
    pub encoding: EncodingArg,

    #[arg(long, default_value_t = 10)]
    pub epochs: usize,

    #[arg(long, default_value_t = 32)]
    pub batch_size: usize,

    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Width of the ReLU hidden layer
    #[arg(long, default_value_t = 16)]
    pub hidden_units: usize,

    /// Embedding width, only used with --encoding index
    #[arg(long, default_value_t = 16)]
    pub embedding_dim: usize,

    /// Fraction of rows held out for validation, in [0, 1)
    #[arg(long, default_value_t = 0.0)]
    pub validation_split: f64,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Number of leading rows to print predictions for
    #[arg(long, default_value_t = 5)]
    pub samples: usize,

    /// Probabilities strictly above this are spam
    #[arg(long, default_value_t = 0.5)]
    pub threshold: f32,

    /// Append per-epoch metrics to <DIR>/metrics.csv
    #[arg(long)]
    pub metrics_dir: Option<String>,

    /// Extra message to classify after training (repeatable)
    #[arg(long = "classify", value_name = "TEXT")]
    pub classify: Vec<String>,
}

/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            data_path:        a.data,
            has_headers:      !a.no_headers,
            text_column:      a.text_column,
            label_column:     a.label_column,
            max_vocab_size:   a.max_vocab_size,
            max_seq_len:      a.max_seq_len,
            derive_seq_len:   a.derive_seq_len,
            encoding:         a.encoding.into(),
            epochs:           a.epochs,
            batch_size:       a.batch_size,
            learning_rate:    a.lr,
            hidden_units:     a.hidden_units,
            embedding_dim:    a.embedding_dim,
            validation_split: a.validation_split,
            seed:             a.seed,
            sample_count:     a.samples,
            threshold:        a.threshold,
            metrics_dir:      a.metrics_dir,
            classify:         a.classify,
        }
    }
}
