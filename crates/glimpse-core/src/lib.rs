#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod batch;
mod detector;
mod error;
mod image;
pub mod policy;
#[doc(hidden)]
pub mod prelude;
mod processor;
pub mod types;

pub use crate::batch::{BatchConfig, BatchOutcome, BatchReport, BatchRunner, ImageReport};
pub use crate::detector::{BoxedDetector, TextDetector};
pub use crate::error::{BoxedError, Error, ErrorKind, Result};
pub use crate::image::{ImageFormat, SUPPORTED_CONTENT_TYPES};
pub use crate::policy::{DEFAULT_CONFIDENCE_THRESHOLD, EscalationPolicy};
pub use crate::processor::{OcrProcessor, ProcessorConfig, ProcessorConfigBuilder};
pub use crate::types::{DetectedText, Escalation, OcrResult};

/// Tracing target for orchestration of a single image.
pub const TRACING_TARGET_PROCESSOR: &str = "glimpse_core::processor";

/// Tracing target for batch runs over a set of images.
pub const TRACING_TARGET_BATCH: &str = "glimpse_core::batch";
