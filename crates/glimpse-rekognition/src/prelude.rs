//! Prelude for the glimpse-rekognition crate
//!
//! This module re-exports the most commonly used types from the crate
//! to provide a convenient single import for users.

pub use crate::detector::RekognitionDetector;
pub use crate::model::{DetectTextRequest, DetectTextResponse, TextDetection, TextType};
