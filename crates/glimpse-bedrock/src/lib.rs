#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for Bedrock detector operations.
pub const TRACING_TARGET_DETECTOR: &str = "glimpse_bedrock::detector";

mod config;
mod detector;
pub mod model;
pub mod parse;
#[doc(hidden)]
pub mod prelude;

pub use crate::config::{
    BedrockConfig, BedrockConfigBuilder, BedrockConfigBuilderError, DEFAULT_MAX_TOKENS,
    DEFAULT_MODEL_ID, DEFAULT_TEMPERATURE,
};
pub use crate::detector::{BedrockDetector, PROVIDER_NAME, TRANSCRIPTION_PROMPT};
pub use crate::parse::{DEFAULT_FALLBACK_CONFIDENCE, parse_transcription};
