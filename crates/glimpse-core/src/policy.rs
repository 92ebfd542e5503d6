//! Escalation policy.
//!
//! Deciding whether to ask for a second opinion and explaining why are two
//! separate pure functions, so the trigger and its justification can be
//! checked independently. [`EscalationPolicy`] binds them to a configured
//! threshold and the primary provider's name.

use crate::types::DetectedText;

/// Default confidence below which a primary detection triggers escalation.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Reason used when escalation happened without an empty or low-confidence result.
pub const VERIFICATION_REASON: &str = "Second opinion triggered for verification";

/// Returns `true` if the primary items warrant a second opinion.
///
/// Escalates when nothing was detected or when any item's confidence is
/// strictly below `threshold`.
pub fn should_escalate(items: &[DetectedText], threshold: f64) -> bool {
    items.is_empty() || items.iter().any(|item| item.is_below(threshold))
}

/// Explains why the primary items were escalated.
///
/// The reported minimum is taken over the below-threshold items only.
pub fn reason_for_escalation(items: &[DetectedText], threshold: f64, primary: &str) -> String {
    if items.is_empty() {
        return format!("No text detected by {primary}");
    }

    let lowest = items
        .iter()
        .filter(|item| item.is_below(threshold))
        .map(DetectedText::confidence)
        .reduce(f64::min);

    match lowest {
        Some(lowest) => format!("{primary} confidence below {threshold} (lowest: {lowest:.2})"),
        None => VERIFICATION_REASON.to_owned(),
    }
}

/// Escalation policy bound to a threshold and a primary provider name.
#[derive(Debug, Clone, PartialEq)]
pub struct EscalationPolicy {
    threshold: f64,
    primary: String,
}

impl EscalationPolicy {
    /// Creates a policy for the named primary provider.
    pub fn new(threshold: f64, primary: impl Into<String>) -> Self {
        Self {
            threshold,
            primary: primary.into(),
        }
    }

    /// Returns the configured threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns the primary provider name used in reasons.
    pub fn primary(&self) -> &str {
        &self.primary
    }

    /// See [`should_escalate`].
    pub fn should_escalate(&self, items: &[DetectedText]) -> bool {
        should_escalate(items, self.threshold)
    }

    /// See [`reason_for_escalation`].
    pub fn reason_for_escalation(&self, items: &[DetectedText]) -> String {
        reason_for_escalation(items, self.threshold, &self.primary)
    }
}
