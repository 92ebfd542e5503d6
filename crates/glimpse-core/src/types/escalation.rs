//! Outcome of the escalation decision for one image.

use serde::Serialize;

/// Whether the fallback provider was consulted, and why.
///
/// A reason exists exactly when escalation was triggered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Escalation {
    triggered: bool,
    reason: Option<String>,
}

impl Escalation {
    /// The primary result was good enough; no second opinion.
    pub fn skipped() -> Self {
        Self {
            triggered: false,
            reason: None,
        }
    }

    /// A second opinion was requested for the given reason.
    pub fn triggered(reason: impl Into<String>) -> Self {
        Self {
            triggered: true,
            reason: Some(reason.into()),
        }
    }

    /// Returns `true` if the fallback provider was consulted.
    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    /// Returns the reason for escalation, if it was triggered.
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}
