//! A single piece of detected text.

use serde::Serialize;

/// Text detected by a provider together with its normalized confidence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectedText {
    text: String,
    confidence: f64,
}

impl DetectedText {
    /// Creates a detected text item from a confidence on the `[0, 1]` scale.
    ///
    /// Values outside the range are clamped; NaN becomes `0.0`.
    pub fn new(text: impl Into<String>, confidence: f64) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };

        Self {
            text: text.into(),
            confidence,
        }
    }

    /// Creates a detected text item from a confidence on the `[0, 100]` scale.
    pub fn from_percentage(text: impl Into<String>, percentage: f64) -> Self {
        Self::new(text, percentage / 100.0)
    }

    /// Returns the detected text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the confidence in `[0, 1]`.
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Returns `true` if the confidence is strictly below `threshold`.
    pub fn is_below(&self, threshold: f64) -> bool {
        self.confidence < threshold
    }
}
