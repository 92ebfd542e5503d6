//! AWS client configuration
//!
//! This module provides configuration structures and builders for the AWS client.

use std::time::Duration;

use derive_builder::Builder;
use url::Url;

use crate::error::{Error, Result};

/// Configuration for the AWS client
///
/// Contains the region, timeouts and an optional endpoint override for
/// compatible gateways or local emulators.
#[derive(Debug, Clone, Builder)]
#[builder(
    name = "AwsBuilder",
    pattern = "owned",
    setter(into, strip_option, prefix = "with"),
    build_fn(validate = "Self::validate_config")
)]
pub struct AwsConfig {
    /// AWS region, e.g. `us-west-2`
    #[builder(default = "AwsConfig::default_region()")]
    pub region: String,
    /// Request timeout duration
    #[builder(default = "Duration::from_secs(60)")]
    pub timeout: Duration,
    /// Connection timeout duration
    #[builder(default = "Duration::from_secs(10)")]
    pub connect_timeout: Duration,
    /// User agent string for requests
    #[builder(default = "AwsConfig::default_user_agent()")]
    pub user_agent: String,
    /// Endpoint override; the regional AWS endpoint is used when unset
    #[builder(setter(custom), default)]
    pub endpoint: Option<Url>,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            region: Self::default_region(),
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
            user_agent: Self::default_user_agent(),
            endpoint: None,
        }
    }
}

impl AwsConfig {
    /// Create a new configuration builder
    pub fn builder() -> AwsBuilder {
        AwsBuilder::default()
    }

    fn default_region() -> String {
        "us-west-2".to_string()
    }

    fn default_user_agent() -> String {
        format!("glimpse-aws/{}", env!("CARGO_PKG_VERSION"))
    }

    /// Resolves the endpoint for a service, honoring the override.
    pub fn endpoint_for(&self, endpoint_prefix: &str) -> Result<Url> {
        match &self.endpoint {
            Some(endpoint) => Ok(endpoint.clone()),
            None => {
                let url = format!("https://{endpoint_prefix}.{}.amazonaws.com", self.region);
                url.parse().map_err(|e| {
                    Error::invalid_config(format!("Invalid endpoint '{url}': {e}"))
                })
            }
        }
    }
}

impl AwsBuilder {
    /// Set an endpoint override
    pub fn with_endpoint(mut self, url: &str) -> Result<Self> {
        let endpoint = url
            .parse()
            .map_err(|e| Error::invalid_config(format!("Invalid endpoint '{}': {}", url, e)))?;
        self.endpoint = Some(Some(endpoint));
        Ok(self)
    }

    fn validate_config(&self) -> std::result::Result<(), String> {
        if let Some(region) = &self.region
            && (region.is_empty()
                || !region
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'))
        {
            return Err(format!("Invalid region '{region}'"));
        }

        if let Some(timeout) = &self.timeout
            && timeout.is_zero()
        {
            return Err("Timeout must be greater than 0".to_string());
        }

        if let Some(connect_timeout) = &self.connect_timeout
            && connect_timeout.is_zero()
        {
            return Err("Connect timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AwsConfig::default();

        assert_eq!(config.region, "us-west-2");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert!(config.endpoint.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = AwsConfig::builder()
            .with_region("eu-central-1")
            .with_timeout(Duration::from_secs(5))
            .build()
            .expect("Valid config");

        assert_eq!(config.region, "eu-central-1");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(
            config.endpoint_for("rekognition").unwrap().as_str(),
            "https://rekognition.eu-central-1.amazonaws.com/"
        );
    }

    #[test]
    fn test_endpoint_override() {
        let config = AwsConfig::builder()
            .with_endpoint("http://localhost:4566")
            .expect("Valid URL")
            .build()
            .expect("Valid config");

        assert_eq!(
            config.endpoint_for("bedrock-runtime").unwrap().as_str(),
            "http://localhost:4566/"
        );
    }

    #[test]
    fn test_invalid_endpoint() {
        assert!(AwsConfig::builder().with_endpoint("not a url").is_err());
    }

    #[test]
    fn test_validation_rejects_bad_region() {
        assert!(AwsConfig::builder().with_region("US West").build().is_err());
        assert!(AwsConfig::builder().with_region("").build().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let result = AwsConfig::builder()
            .with_timeout(Duration::from_secs(0))
            .build();

        assert!(result.is_err());
    }
}
