//! Rekognition-backed [`TextDetector`].

use std::time::Instant;

use glimpse_aws::{AwsClient, AwsConfig, AwsCredentials, AwsService, Operation};
use glimpse_core::{DetectedText, TextDetector};

use crate::TRACING_TARGET_DETECTOR;
use crate::model::{DetectTextRequest, DetectTextResponse};

/// Provider name used in error messages and escalation reasons.
pub const PROVIDER_NAME: &str = "Rekognition";

const SERVICE: AwsService = AwsService::new("rekognition", "rekognition");
const DETECT_TEXT_TARGET: &str = "RekognitionService.DetectText";

/// Primary detector calling Amazon Rekognition `DetectText`.
///
/// # Example
///
/// ```rust,ignore
/// use glimpse_aws::{AwsConfig, AwsCredentials};
/// use glimpse_rekognition::RekognitionDetector;
///
/// let config = AwsConfig::builder().with_region("us-west-2").build()?;
/// let detector = RekognitionDetector::new(config, credentials)?;
/// ```
#[derive(Clone, Debug)]
pub struct RekognitionDetector {
    client: AwsClient,
}

impl RekognitionDetector {
    /// Creates a detector with its own signed client.
    pub fn new(config: AwsConfig, credentials: AwsCredentials) -> glimpse_core::Result<Self> {
        let client =
            AwsClient::new(config, credentials, SERVICE).map_err(|e| e.into_core(PROVIDER_NAME))?;
        Ok(Self::from_client(client))
    }

    /// Wraps an existing client, which must target the Rekognition service.
    pub fn from_client(client: AwsClient) -> Self {
        Self { client }
    }

    /// Returns a reference to the underlying client.
    pub fn client(&self) -> &AwsClient {
        &self.client
    }
}

#[async_trait::async_trait]
impl TextDetector for RekognitionDetector {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn detect(&self, image: &[u8]) -> glimpse_core::Result<Vec<DetectedText>> {
        let started_at = Instant::now();
        tracing::debug!(
            target: TRACING_TARGET_DETECTOR,
            image_bytes = image.len(),
            "Detecting text via Rekognition"
        );

        let request = DetectTextRequest::from_bytes(image);
        let response: DetectTextResponse = self
            .client
            .invoke(&Operation::json_rpc(DETECT_TEXT_TARGET), &request)
            .await
            .map_err(|e| e.into_core(PROVIDER_NAME))?;

        let detections = response.text_detections.len();
        let items = response.into_detected_texts();

        tracing::debug!(
            target: TRACING_TARGET_DETECTOR,
            detections,
            item_count = items.len(),
            elapsed_ms = started_at.elapsed().as_millis(),
            "Rekognition detection completed"
        );

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use glimpse_core::ErrorKind;

    use super::*;

    #[test]
    fn test_detector_name() {
        let detector =
            RekognitionDetector::new(AwsConfig::default(), AwsCredentials::new("AKID", "secret"))
                .unwrap();
        assert_eq!(detector.name(), "Rekognition");
        assert_eq!(
            detector.client().endpoint().as_str(),
            "https://rekognition.us-west-2.amazonaws.com/"
        );
    }

    #[test]
    fn test_missing_credentials_is_configuration_error() {
        let error = RekognitionDetector::new(AwsConfig::default(), AwsCredentials::new("", ""))
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Configuration);
        assert_eq!(error.provider(), Some("Rekognition"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_provider_failure() {
        let config = AwsConfig::builder()
            .with_endpoint("http://127.0.0.1:9")
            .unwrap()
            .build()
            .unwrap();
        let detector =
            RekognitionDetector::new(config, AwsCredentials::new("AKID", "secret")).unwrap();

        let error = detector.detect(b"\x89PNG\r\n\x1a\n").await.unwrap_err();
        assert!(error.kind().is_provider_failure());
        assert_eq!(error.provider(), Some("Rekognition"));
    }
}
