// ============================================================
// Layer 2 — Classification Reporter
// ============================================================
// Turns raw predictions for a handful of documents into
// human-readable reports: text, true label, verdict.
//
// The verdict is always computed from the *predicted*
// probability against the threshold, never from the true
// label.

use std::fmt;

use crate::domain::record::{Label, SmsRecord};
use crate::domain::verdict::{classify, Verdict, DEFAULT_THRESHOLD};

const SEPARATOR: &str = "-----------------------------";

/// One sampled prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionReport {
    pub text:        String,
    pub label:       Label,
    pub probability: f32,
    pub verdict:     Verdict,
}

impl PredictionReport {
    /// Whether the verdict agrees with the true label.
    pub fn is_correct(&self) -> bool {
        matches!(
            (self.label, self.verdict),
            (Label::Spam, Verdict::Spam) | (Label::Ham, Verdict::Ham)
        )
    }
}

impl fmt::Display for PredictionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Text: {}", self.text)?;
        writeln!(f, "Label: {}", self.label)?;
        writeln!(f, "Prediction: {} (p={:.3})", self.verdict, self.probability)?;
        write!(f, "{SEPARATOR}")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ClassificationReporter {
    threshold: f32,
}

impl Default for ClassificationReporter {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl ClassificationReporter {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn verdict(&self, probability: f32) -> Verdict {
        classify(probability, self.threshold)
    }

    /// Pair each record with its predicted probability.
    /// Extra entries on either side are ignored.
    pub fn report(&self, records: &[SmsRecord], probabilities: &[f32]) -> Vec<PredictionReport> {
        records
            .iter()
            .zip(probabilities)
            .map(|(rec, &p)| PredictionReport {
                text:        rec.text.clone(),
                label:       rec.label,
                probability: p,
                verdict:     self.verdict(p),
            })
            .collect()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_comes_from_probability_not_label() {
        let reporter = ClassificationReporter::default();
        let records  = vec![SmsRecord::new("free prize", Label::Spam)];

        // A ham-looking probability on a spam row must read "ham"
        let reports = reporter.report(&records, &[0.1]);
        assert_eq!(reports[0].verdict, Verdict::Ham);
        assert!(!reports[0].is_correct());
    }

    #[test]
    fn test_custom_threshold() {
        let reporter = ClassificationReporter::new(0.9);
        assert_eq!(reporter.verdict(0.85), Verdict::Ham);
        assert_eq!(reporter.verdict(0.95), Verdict::Spam);
    }

    #[test]
    fn test_display_format() {
        let report = PredictionReport {
            text:        "see you later".to_string(),
            label:       Label::Ham,
            probability: 0.0421,
            verdict:     Verdict::Ham,
        };
        let text = report.to_string();
        assert!(text.starts_with("Text: see you later\n"));
        assert!(text.contains("Label: 0 (ham)"));
        assert!(text.contains("Prediction: ham (p=0.042)"));
        assert!(text.ends_with(SEPARATOR));
    }

    #[test]
    fn test_report_stops_at_shorter_input() {
        let reporter = ClassificationReporter::default();
        let records  = vec![
            SmsRecord::new("a", Label::Ham),
            SmsRecord::new("b", Label::Spam),
        ];
        assert_eq!(reporter.report(&records, &[0.7]).len(), 1);
    }
}
