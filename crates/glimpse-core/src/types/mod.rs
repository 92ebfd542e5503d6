//! Response model shared by the detectors, the processor and the batch runner.
//!
//! Every type here is immutable once built: fields are private and the
//! constructors uphold the invariants (normalized confidence, a reason only
//! when escalation was triggered, no fallback items without escalation).

mod detected;
mod escalation;
mod result;

pub use detected::DetectedText;
pub use escalation::Escalation;
pub use result::OcrResult;
