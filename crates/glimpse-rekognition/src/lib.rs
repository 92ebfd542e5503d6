#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for Rekognition detector operations.
pub const TRACING_TARGET_DETECTOR: &str = "glimpse_rekognition::detector";

mod detector;
pub mod model;
#[doc(hidden)]
pub mod prelude;

pub use crate::detector::{PROVIDER_NAME, RekognitionDetector};
