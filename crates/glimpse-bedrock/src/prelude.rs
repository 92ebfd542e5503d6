//! Prelude for the glimpse-bedrock crate
//!
//! This module re-exports the most commonly used types from the crate
//! to provide a convenient single import for users.

pub use crate::config::BedrockConfig;
pub use crate::detector::BedrockDetector;
pub use crate::parse::parse_transcription;
