// ============================================================
// Layer 3 — SmsRecord Domain Type
// ============================================================
// One row of the corpus: the raw message text and its label.
// Records are created by the ingestion collaborator and are
// immutable for the rest of the training run.
//
// Reference: Rust Book §5 (Structs and Methods)

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::PipelineError;

/// The two label categories the classifier distinguishes.
///
/// The numeric value is the one stored in the corpus and the one
/// the model is trained against: 0 = ham, 1 = spam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Ham,
    Spam,
}

impl Label {
    /// Numeric training target for this label.
    pub fn as_target(self) -> u8 {
        match self {
            Label::Ham  => 0,
            Label::Spam => 1,
        }
    }
}

impl TryFrom<i64> for Label {
    type Error = PipelineError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Label::Ham),
            1 => Ok(Label::Spam),
            other => Err(PipelineError::Ingestion(format!(
                "label must be 0 (ham) or 1 (spam), got {other}"
            ))),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Ham  => write!(f, "0 (ham)"),
            Label::Spam => write!(f, "1 (spam)"),
        }
    }
}

/// A labelled SMS message as read from the corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsRecord {
    /// Raw message text, before any tokenisation
    pub text: String,

    /// Ground-truth category
    pub label: Label,
}

impl SmsRecord {
    /// Create a new record. Accepts &str or String for the text.
    ///
    /// Example:
    ///   let rec = SmsRecord::new("WINNER!! Claim your prize", Label::Spam);
    pub fn new(text: impl Into<String>, label: Label) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}
