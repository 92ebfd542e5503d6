//! CLI configuration management.
//!
//! This module defines the complete CLI configuration hierarchy:
//!
//! ```text
//! Cli
//! ├── input, output, log_json
//! ├── processor: ProcessorConfig  # Escalation threshold
//! ├── batch: BatchConfig          # Advisory image size
//! ├── bedrock: BedrockConfig      # Fallback model parameters
//! └── aws: AwsArgs                # Region, credentials, endpoints
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.

mod aws;
mod provider;

use std::path::PathBuf;
use std::process;

use anyhow::Context;
pub use aws::AwsArgs;
use clap::Parser;
use glimpse_bedrock::BedrockConfig;
use glimpse_core::{BatchConfig, ProcessorConfig};
pub use provider::create_processor;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "glimpse")]
#[command(about = "Batch OCR with a confidence-based second opinion")]
#[command(version)]
pub struct Cli {
    /// Folder of images to process, or a single image.
    #[arg(default_value = "images")]
    pub input: PathBuf,

    /// Where to write the JSON results.
    #[arg(short, long, env = "OCR_OUTPUT", default_value = "ocr_results.json")]
    pub output: PathBuf,

    /// Emit logs as JSON lines.
    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,

    /// Escalation configuration.
    #[clap(flatten)]
    pub processor: ProcessorConfig,

    /// Batch configuration.
    #[clap(flatten)]
    pub batch: BatchConfig,

    /// Fallback model configuration.
    #[clap(flatten)]
    pub bedrock: BedrockConfig,

    /// AWS region, credentials and endpoints.
    #[clap(flatten)]
    pub aws: AwsArgs,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is loaded before clap parses arguments so values from it
    /// can serve as defaults.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.processor
            .validate()
            .context("invalid processor configuration")?;
        self.bedrock
            .validate()
            .context("invalid Bedrock configuration")?;
        self.aws.validate().context("invalid AWS configuration")?;
        Ok(())
    }

    /// Logs configuration (no sensitive information).
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            "Starting glimpse"
        );

        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            input = %self.input.display(),
            output = %self.output.display(),
            confidence_threshold = self.processor.confidence_threshold,
            max_image_size_mb = self.batch.max_image_size_mb,
            "Run configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            model_id = %self.bedrock.model_id,
            max_tokens = self.bedrock.max_tokens,
            temperature = self.bedrock.temperature,
            "Bedrock configuration"
        );

        self.aws.log();
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
