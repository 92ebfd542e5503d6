//! Detection provider interface.

use std::sync::Arc;

use crate::Result;
use crate::types::DetectedText;

/// Type alias for a shared, type-erased detector.
pub type BoxedDetector = Arc<dyn TextDetector>;

/// A text detection provider.
///
/// Given raw image bytes, a detector returns zero or more detected text
/// items with confidence normalized to `[0, 1]`. Implementations must be
/// stateless per call so one instance can serve many images.
///
/// Transport, authentication and malformed-response failures are reported
/// as [`crate::Error`] tagged with the provider name.
#[async_trait::async_trait]
pub trait TextDetector: Send + Sync {
    /// Human-readable provider name, used in escalation reasons and logs.
    fn name(&self) -> &str;

    /// Detects text in the given image.
    async fn detect(&self, image: &[u8]) -> Result<Vec<DetectedText>>;
}

#[async_trait::async_trait]
impl<T> TextDetector for Arc<T>
where
    T: TextDetector + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn detect(&self, image: &[u8]) -> Result<Vec<DetectedText>> {
        (**self).detect(image).await
    }
}
