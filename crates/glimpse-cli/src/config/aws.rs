//! AWS connection configuration.

use std::time::Duration;

use anyhow::{Result as AnyhowResult, anyhow};
use clap::Args;
use glimpse_aws::{AwsConfig, AwsCredentials};

use crate::TRACING_TARGET_CONFIG;

/// AWS region, credentials and endpoint overrides.
///
/// # Environment Variables
///
/// - `AWS_REGION` - Region for both services (default: us-west-2)
/// - `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` - Static credentials
/// - `AWS_SESSION_TOKEN` - Session token for temporary credentials
/// - `REKOGNITION_ENDPOINT`, `BEDROCK_ENDPOINT` - Endpoint overrides
/// - `AWS_TIMEOUT` - Per-request timeout in seconds (default: 60)
#[derive(Debug, Clone, Args)]
pub struct AwsArgs {
    /// AWS region used for Rekognition and Bedrock.
    #[arg(long = "aws-region", env = "AWS_REGION", default_value = "us-west-2")]
    pub region: String,

    /// AWS access key id.
    #[arg(long = "aws-access-key-id", env = "AWS_ACCESS_KEY_ID", hide_env_values = true)]
    pub access_key_id: Option<String>,

    /// AWS secret access key.
    #[arg(long = "aws-secret-access-key", env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub secret_access_key: Option<String>,

    /// AWS session token, for temporary credentials.
    #[arg(long = "aws-session-token", env = "AWS_SESSION_TOKEN", hide_env_values = true)]
    pub session_token: Option<String>,

    /// Endpoint override for Rekognition.
    #[arg(long, env = "REKOGNITION_ENDPOINT")]
    pub rekognition_endpoint: Option<String>,

    /// Endpoint override for the Bedrock runtime.
    #[arg(long, env = "BEDROCK_ENDPOINT")]
    pub bedrock_endpoint: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long = "aws-timeout", env = "AWS_TIMEOUT", default_value_t = 60)]
    pub timeout: u64,
}

impl AwsArgs {
    /// Validates the connection settings.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing, the timeout is out of
    /// range, or an endpoint override is not a valid URL.
    pub fn validate(&self) -> AnyhowResult<()> {
        if self.access_key_id.as_deref().is_none_or(str::is_empty)
            || self.secret_access_key.as_deref().is_none_or(str::is_empty)
        {
            return Err(anyhow!(
                "AWS credentials are required. Set AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY."
            ));
        }

        if self.timeout == 0 || self.timeout > 600 {
            return Err(anyhow!(
                "AWS timeout {} seconds is invalid. Must be between 1 and 600 seconds.",
                self.timeout
            ));
        }

        self.rekognition_config()?;
        self.bedrock_config()?;
        Ok(())
    }

    /// Static credentials from the configured key pair.
    pub fn credentials(&self) -> AwsCredentials {
        let credentials = AwsCredentials::new(
            self.access_key_id.clone().unwrap_or_default(),
            self.secret_access_key.clone().unwrap_or_default(),
        );

        match &self.session_token {
            Some(token) if !token.is_empty() => credentials.with_session_token(token),
            _ => credentials,
        }
    }

    /// Client configuration for Rekognition.
    pub fn rekognition_config(&self) -> AnyhowResult<AwsConfig> {
        self.client_config(self.rekognition_endpoint.as_deref())
    }

    /// Client configuration for the Bedrock runtime.
    pub fn bedrock_config(&self) -> AnyhowResult<AwsConfig> {
        self.client_config(self.bedrock_endpoint.as_deref())
    }

    fn client_config(&self, endpoint: Option<&str>) -> AnyhowResult<AwsConfig> {
        let mut builder = AwsConfig::builder()
            .with_region(self.region.as_str())
            .with_timeout(Duration::from_secs(self.timeout));

        if let Some(endpoint) = endpoint {
            builder = builder.with_endpoint(endpoint)?;
        }

        Ok(builder.build()?)
    }

    /// Logs configuration (no sensitive information).
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            region = %self.region,
            timeout_secs = self.timeout,
            session_token = self.session_token.is_some(),
            rekognition_endpoint = ?self.rekognition_endpoint,
            bedrock_endpoint = ?self.bedrock_endpoint,
            "AWS configuration"
        );
    }
}
