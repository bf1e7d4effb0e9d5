// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records training metrics after each epoch, and optionally
// appends them to a CSV file.
//
// Metrics recorded per epoch:
//   - epoch:      the epoch number (1, 2, 3, ...)
//   - train_loss: mean binary cross-entropy over training batches
//   - train_acc:  fraction of training documents classified right
//   - val_loss:   same on the validation split (empty if none)
//   - val_acc:    same on the validation split (empty if none)
//
// Output file: <metrics_dir>/metrics.csv
//
// Example CSV output:
//   epoch,train_loss,train_acc,val_loss,val_acc
//   1,0.6123,0.861,0.5401,0.87
//   2,0.3012,0.951,,
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    fs::{self, OpenOptions},
    path::PathBuf,
};

/// Column order of `metrics.csv`, matching the field order of `EpochMetrics`.
const HEADER: [&str; 5] = ["epoch", "train_loss", "train_acc", "val_loss", "val_acc"];

/// One row of metrics data for a single training epoch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// The epoch number (starts at 1)
    pub epoch: usize,

    /// Mean loss over all training batches. Lower is better.
    pub train_loss: f64,

    /// Accuracy at the 0.5 threshold, range [0.0, 1.0]
    pub train_acc: f64,

    /// Validation loss, `None` when no validation split is used
    pub val_loss: Option<f64>,

    /// Validation accuracy, `None` when no validation split is used
    pub val_acc: Option<f64>,
}

impl EpochMetrics {
    pub fn new(
        epoch:      usize,
        train_loss: f64,
        train_acc:  f64,
        val_loss:   Option<f64>,
        val_acc:    Option<f64>,
    ) -> Self {
        Self { epoch, train_loss, train_acc, val_loss, val_acc }
    }
}

impl fmt::Display for EpochMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "train_loss={:.4} | train_acc={:.1}%",
            self.train_loss,
            self.train_acc * 100.0
        )?;
        if let (Some(loss), Some(acc)) = (self.val_loss, self.val_acc) {
            write!(f, " | val_loss={:.4} | val_acc={:.1}%", loss, acc * 100.0)?;
        }
        Ok(())
    }
}

/// Logs epoch metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    /// Full path to the CSV file
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a new MetricsLogger.
    /// Writes the CSV header if the file doesn't exist yet.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();

        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create metrics directory '{}'", dir.display()))?;

        let csv_path = dir.join("metrics.csv");

        // Header only for a new file, so runs append to one log
        if !csv_path.exists() {
            let mut wtr = csv::Writer::from_path(&csv_path)
                .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
            wtr.write_record(HEADER)?;
            wtr.flush()?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one epoch's metrics as a new row in the CSV.
    /// `None` validation values become empty fields.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let path = self.csv_path();
        let file = OpenOptions::new()
            .append(true)
            .open(path)
            .with_context(|| format!("Cannot open '{}'", path.display()))?;

        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        wtr.serialize(m)?;
        wtr.flush()?;

        tracing::debug!("Logged epoch {} metrics", m.epoch);
        Ok(())
    }

    /// Return the path to the metrics CSV file
    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_validation_when_present() {
        let m = EpochMetrics::new(1, 0.25, 0.5, Some(0.3), Some(0.75));
        let s = m.to_string();
        assert!(s.contains("train_acc=50.0%"));
        assert!(s.contains("val_acc=75.0%"));

        let m = EpochMetrics::new(1, 0.25, 0.5, None, None);
        assert!(!m.to_string().contains("val_"));
    }

    #[test]
    fn test_logger_writes_header_and_rows() {
        let dir    = tempfile::tempdir().unwrap();
        let logger = MetricsLogger::new(dir.path()).unwrap();
        logger.log(&EpochMetrics::new(1, 0.5, 0.75, None, None)).unwrap();
        logger.log(&EpochMetrics::new(2, 0.25, 1.0, Some(0.5), Some(0.5))).unwrap();

        let text  = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "epoch,train_loss,train_acc,val_loss,val_acc");
        assert_eq!(lines[1], "1,0.5,0.75,,");
        assert_eq!(lines[2], "2,0.25,1.0,0.5,0.5");
    }

    #[test]
    fn test_rows_read_back_through_serde() {
        let dir    = tempfile::tempdir().unwrap();
        let logger = MetricsLogger::new(dir.path()).unwrap();
        let first  = EpochMetrics::new(1, 0.693, 0.5, Some(0.7), Some(0.4));
        let second = EpochMetrics::new(2, 0.41, 0.875, None, None);
        logger.log(&first).unwrap();
        logger.log(&second).unwrap();

        let mut rdr = csv::Reader::from_path(logger.csv_path()).unwrap();
        let back: Vec<EpochMetrics> = rdr.deserialize().map(|r| r.unwrap()).collect();
        assert_eq!(back, vec![first, second]);
    }

    #[test]
    fn test_reopening_does_not_repeat_header() {
        let dir = tempfile::tempdir().unwrap();
        MetricsLogger::new(dir.path()).unwrap()
            .log(&EpochMetrics::new(1, 0.5, 0.5, None, None))
            .unwrap();
        let logger = MetricsLogger::new(dir.path()).unwrap();
        logger.log(&EpochMetrics::new(1, 0.25, 0.75, None, None)).unwrap();

        let text = fs::read_to_string(logger.csv_path()).unwrap();
        assert_eq!(text.matches("epoch,").count(), 1);
        assert_eq!(text.lines().count(), 3);
    }
}
