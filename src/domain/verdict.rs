// ============================================================
// Layer 3 — Verdict Domain Type
// ============================================================
// Maps a predicted spam probability onto a categorical verdict.
//
// The rule is a strict greater-than comparison:
//   probability >  threshold → spam
//   probability <= threshold → ham
//
// Used for human-readable sampling of predictions only, never
// for evaluation metrics.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default decision threshold applied to the sigmoid output.
pub const DEFAULT_THRESHOLD: f32 = 0.5;

/// Categorical outcome for one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Ham,
    Spam,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Ham  => "ham",
            Verdict::Spam => "spam",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Classify a predicted spam probability against `threshold`.
///
/// Equality at the threshold resolves to [`Verdict::Ham`].
pub fn classify(probability: f32, threshold: f32) -> Verdict {
    if probability > threshold {
        Verdict::Spam
    } else {
        Verdict::Ham
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_above_threshold_is_spam() {
        assert_eq!(classify(0.51, 0.5), Verdict::Spam);
    }

    #[test]
    fn test_equal_to_threshold_is_ham() {
        assert_eq!(classify(0.5, 0.5), Verdict::Ham);
    }

    #[test]
    fn test_zero_with_default_threshold_is_ham() {
        assert_eq!(classify(0.0, DEFAULT_THRESHOLD), Verdict::Ham);
    }

    #[test]
    fn test_custom_threshold() {
        assert_eq!(classify(0.8, 0.9), Verdict::Ham);
        assert_eq!(classify(0.95, 0.9), Verdict::Spam);
    }

    #[test]
    fn test_display() {
        assert_eq!(Verdict::Spam.to_string(), "spam");
        assert_eq!(Verdict::Ham.to_string(), "ham");
    }
}
