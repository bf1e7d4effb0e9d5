// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// `clap` and delegates every bit of work to Layer 2.
//
// One command is supported:
//   `train` — trains on a labelled CSV, prints sampled
//             predictions, then scores any --classify texts
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::{bail, Result};
use clap::Parser;
use commands::{Commands, TrainArgs};

use crate::application::artifact::TrainedArtifact;
use crate::application::train_use_case::{TrainConfig, TrainUseCase};

#[derive(Parser, Debug)]
#[command(
    name = "sms-spam-classifier",
    version = "0.1.0",
    about = "Train a binary spam/ham classifier on labelled SMS messages."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args) => run_train(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    let config: TrainConfig = args.into();
    tracing::info!("Starting training on: {}", config.data_path);

    let use_case = TrainUseCase::new(config);
    let Some(run) = use_case.execute() else {
        bail!("training failed, see log for details");
    };

    print_summary(&run.artifact);

    println!("\nSample predictions:");
    for report in &run.samples {
        println!("{report}");
    }

    let cfg = use_case.config();
    if !cfg.classify.is_empty() {
        println!("\nClassified messages:");
        let results = run.artifact.classify(&cfg.classify, cfg.threshold)?;
        for (text, (p, verdict)) in cfg.classify.iter().zip(results) {
            println!("{verdict:>4} (p={p:.3})  {text}");
        }
    }
    Ok(())
}

fn print_summary(artifact: &TrainedArtifact) {
    let vocab = artifact.vocabulary();
    let oov   = vocab.oov_index();

    println!("\nTrained artifact:");
    println!(
        "  vocabulary:      {} entries, {} at index {}",
        vocab.len(),
        vocab.token_at(oov).unwrap_or_default(),
        oov
    );
    println!("  sequence length: {}", artifact.max_sequence_length());
    println!("  encoding:        {:?}", artifact.encoding());
    if let Some(last) = artifact.history().last() {
        println!("  epoch {:>3}:       {}", last.epoch, last);
    }
}
