//! Batch runner configuration.

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Default advisory image size limit in megabytes.
pub const DEFAULT_MAX_IMAGE_SIZE_MB: u64 = 10;

/// Configuration for [`super::BatchRunner`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct BatchConfig {
    /// Advisory size limit for a single image, in megabytes.
    ///
    /// Larger images are still sent to the providers; the runner only
    /// logs a warning so oversized inputs are easy to spot.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "MAX_IMAGE_SIZE_MB", default_value_t = DEFAULT_MAX_IMAGE_SIZE_MB)
    )]
    #[serde(default = "default_max_image_size_mb")]
    pub max_image_size_mb: u64,
}

fn default_max_image_size_mb() -> u64 {
    DEFAULT_MAX_IMAGE_SIZE_MB
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_image_size_mb: DEFAULT_MAX_IMAGE_SIZE_MB,
        }
    }
}

impl BatchConfig {
    /// Returns the advisory limit in bytes.
    pub fn max_image_size_bytes(&self) -> u64 {
        self.max_image_size_mb.saturating_mul(1024 * 1024)
    }
}
