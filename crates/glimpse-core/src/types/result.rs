//! Combined result of the primary and (optional) fallback passes.

use serde::Serialize;

use super::{DetectedText, Escalation};

/// Result of processing one image.
///
/// Built once by the processor and never mutated. The fallback items are
/// empty unless escalation was triggered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OcrResult {
    primary: Vec<DetectedText>,
    fallback: Vec<DetectedText>,
    escalation: Escalation,
}

impl OcrResult {
    /// Result for an image whose primary detections were sufficient.
    pub fn primary_only(primary: Vec<DetectedText>) -> Self {
        Self {
            primary,
            fallback: Vec::new(),
            escalation: Escalation::skipped(),
        }
    }

    /// Result for an image that was escalated to the fallback provider.
    pub fn escalated(
        primary: Vec<DetectedText>,
        fallback: Vec<DetectedText>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            primary,
            fallback,
            escalation: Escalation::triggered(reason),
        }
    }

    /// Items from the primary provider, in provider order.
    pub fn primary(&self) -> &[DetectedText] {
        &self.primary
    }

    /// Items from the fallback provider, in provider order.
    pub fn fallback(&self) -> &[DetectedText] {
        &self.fallback
    }

    /// The escalation decision.
    pub fn escalation(&self) -> &Escalation {
        &self.escalation
    }

    /// Splits the result into its parts.
    pub fn into_parts(self) -> (Vec<DetectedText>, Vec<DetectedText>, Escalation) {
        (self.primary, self.fallback, self.escalation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_only_has_no_fallback() {
        let result = OcrResult::primary_only(vec![DetectedText::new("OPEN", 0.99)]);
        assert_eq!(result.primary().len(), 1);
        assert!(result.fallback().is_empty());
        assert!(!result.escalation().is_triggered());
    }

    #[test]
    fn test_escalated_keeps_both_sides() {
        let result = OcrResult::escalated(
            vec![DetectedText::new("0PEN", 0.41)],
            vec![DetectedText::new("OPEN", 0.93)],
            "Rekognition confidence below 0.7 (lowest: 0.41)",
        );
        assert_eq!(result.primary()[0].text(), "0PEN");
        assert_eq!(result.fallback()[0].text(), "OPEN");
        assert!(result.escalation().is_triggered());

        let (primary, fallback, escalation) = result.into_parts();
        assert_eq!(primary.len(), 1);
        assert_eq!(fallback.len(), 1);
        assert!(escalation.reason().is_some());
    }
}
