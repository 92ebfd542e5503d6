//! Prelude for the glimpse-core crate.
//!
//! Re-exports the types most callers need to wire detectors into a processor
//! and run a batch.

pub use crate::batch::{BatchConfig, BatchReport, BatchRunner};
pub use crate::detector::{BoxedDetector, TextDetector};
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::processor::{OcrProcessor, ProcessorConfig};
pub use crate::types::{DetectedText, Escalation, OcrResult};
