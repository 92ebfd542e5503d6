//! Processor configuration.

#[cfg(feature = "config")]
use clap::Args;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::policy::DEFAULT_CONFIDENCE_THRESHOLD;

/// Configuration for [`super::OcrProcessor`].
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[builder(
    pattern = "owned",
    setter(into, prefix = "with"),
    build_fn(validate = "Self::validate_config")
)]
pub struct ProcessorConfig {
    /// Confidence below which a primary detection triggers a second opinion.
    ///
    /// Must be within `[0, 1]`.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "CONFIDENCE_THRESHOLD", default_value_t = DEFAULT_CONFIDENCE_THRESHOLD)
    )]
    #[builder(default = "DEFAULT_CONFIDENCE_THRESHOLD")]
    #[serde(default = "default_threshold")]
    pub confidence_threshold: f64,
}

fn default_threshold() -> f64 {
    DEFAULT_CONFIDENCE_THRESHOLD
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
        }
    }
}

impl ProcessorConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ProcessorConfigBuilder {
        ProcessorConfigBuilder::default()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> crate::Result<()> {
        check_threshold(self.confidence_threshold)
            .map_err(|reason| crate::Error::configuration().with_message(reason))
    }
}

impl ProcessorConfigBuilder {
    fn validate_config(&self) -> Result<(), String> {
        match self.confidence_threshold {
            Some(threshold) => check_threshold(threshold),
            None => Ok(()),
        }
    }
}

fn check_threshold(threshold: f64) -> Result<(), String> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(format!(
            "Confidence threshold {threshold} is invalid. Must be between 0.0 and 1.0."
        ))
    }
}
