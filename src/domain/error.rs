// ============================================================
// Layer 3 — Pipeline Errors
// ============================================================
// Every stage-level failure is fatal for the run. Stages return
// these errors with `?`; only the training orchestrator catches
// them and turns them into a log line.

/// Errors raised by the vectorisation pipeline and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The corpus could not be read or a row could not be parsed.
    #[error("ingestion failed: {0}")]
    Ingestion(String),

    /// A cap, length or hyperparameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Two collections that must line up do not. Indicates an
    /// upstream pipeline bug.
    #[error("shape mismatch in {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        context:  &'static str,
        expected: usize,
        actual:   usize,
    },
}

impl From<csv::Error> for PipelineError {
    fn from(e: csv::Error) -> Self {
        PipelineError::Ingestion(e.to_string())
    }
}

/// Result type for pipeline stages.
pub type Result<T> = std::result::Result<T, PipelineError>;
