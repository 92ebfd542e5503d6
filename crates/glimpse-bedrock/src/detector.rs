//! Bedrock-backed [`TextDetector`].

use std::time::Instant;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use glimpse_aws::{AwsClient, AwsConfig, AwsCredentials, AwsService, Operation};
use glimpse_core::{DetectedText, ImageFormat, TextDetector};

use crate::model::{InvokeRequest, InvokeResponse};
use crate::parse::parse_transcription;
use crate::{BedrockConfig, TRACING_TARGET_DETECTOR};

/// Provider name used in error messages.
pub const PROVIDER_NAME: &str = "Bedrock";

/// Instruction sent alongside every image.
pub const TRANSCRIPTION_PROMPT: &str = "Please examine the provided image and identify the text shown. After the text, add your confidence level as 'Confidence: X.XX' where X.XX is a decimal between 0.0 and 1.0.";

const SERVICE: AwsService = AwsService::new("bedrock-runtime", "bedrock");

/// Fallback detector asking a vision-language model for a transcription.
///
/// Always yields exactly one item per image.
#[derive(Clone, Debug)]
pub struct BedrockDetector {
    client: AwsClient,
    config: BedrockConfig,
}

impl BedrockDetector {
    /// Creates a detector with its own signed client.
    pub fn new(
        aws: AwsConfig,
        credentials: AwsCredentials,
        config: BedrockConfig,
    ) -> glimpse_core::Result<Self> {
        let client =
            AwsClient::new(aws, credentials, SERVICE).map_err(|e| e.into_core(PROVIDER_NAME))?;
        Self::from_client(client, config)
    }

    /// Wraps an existing client, which must target the Bedrock runtime.
    pub fn from_client(client: AwsClient, config: BedrockConfig) -> glimpse_core::Result<Self> {
        config
            .validate()
            .map_err(|e| e.with_provider(PROVIDER_NAME))?;
        Ok(Self { client, config })
    }

    /// Returns the model configuration.
    pub fn config(&self) -> &BedrockConfig {
        &self.config
    }

    fn operation(&self) -> Operation {
        Operation::rest(["model", self.config.model_id.as_str(), "invoke"])
    }
}

/// Embeds the image as a data URL; unknown formats are labelled JPEG.
fn data_url(image: &[u8]) -> String {
    let mime = ImageFormat::detect(image)
        .unwrap_or(ImageFormat::Jpeg)
        .mime_type();
    format!("data:{mime};base64,{}", STANDARD.encode(image))
}

#[async_trait::async_trait]
impl TextDetector for BedrockDetector {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn detect(&self, image: &[u8]) -> glimpse_core::Result<Vec<DetectedText>> {
        let started_at = Instant::now();
        tracing::debug!(
            target: TRACING_TARGET_DETECTOR,
            model_id = %self.config.model_id,
            image_bytes = image.len(),
            "Requesting transcription via Bedrock"
        );

        let request = InvokeRequest::user_turn(
            TRANSCRIPTION_PROMPT,
            data_url(image),
            self.config.max_tokens,
            self.config.temperature,
        );

        let response: InvokeResponse = self
            .client
            .invoke(&self.operation(), &request)
            .await
            .map_err(|e| e.into_core(PROVIDER_NAME))?;

        let reply = response.into_text().ok_or_else(|| {
            glimpse_core::Error::malformed_response()
                .with_provider(PROVIDER_NAME)
                .with_message("response contained no message content")
        })?;

        let item = parse_transcription(&reply);

        tracing::debug!(
            target: TRACING_TARGET_DETECTOR,
            model_id = %self.config.model_id,
            confidence = item.confidence(),
            text_len = item.text().len(),
            elapsed_ms = started_at.elapsed().as_millis(),
            "Bedrock transcription completed"
        );

        Ok(vec![item])
    }
}
