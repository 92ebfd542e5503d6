//! Mock text detector for testing.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use glimpse_core::{DetectedText, Error, ErrorKind, Result, TextDetector};

/// What a [`MockDetector`] answers for an image.
#[derive(Debug, Clone, PartialEq)]
pub enum MockResponse {
    /// Succeed with these items.
    Items(Vec<DetectedText>),
    /// Fail with an error of this kind and message.
    Fail(ErrorKind, String),
}

impl MockResponse {
    fn to_result(&self, provider: &str) -> Result<Vec<DetectedText>> {
        match self {
            Self::Items(items) => Ok(items.clone()),
            Self::Fail(kind, message) => Err(Error::new(*kind)
                .with_provider(provider)
                .with_message(message.clone())),
        }
    }
}

/// Mock text detector for testing.
///
/// Returns the default response unless the image bytes were scripted with
/// [`MockDetector::respond_to`] or [`MockDetector::fail_on`]. Clones share the
/// call counter.
#[derive(Clone, Debug)]
pub struct MockDetector {
    name: String,
    default: MockResponse,
    scripted: HashMap<Vec<u8>, MockResponse>,
    calls: Arc<AtomicUsize>,
}

impl MockDetector {
    /// Creates a mock that detects nothing.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: MockResponse::Items(Vec::new()),
            scripted: HashMap::new(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Sets the items returned for unscripted images.
    pub fn with_items(mut self, items: Vec<DetectedText>) -> Self {
        self.default = MockResponse::Items(items);
        self
    }

    /// Makes every unscripted image fail.
    pub fn with_failure(mut self, kind: ErrorKind, message: impl Into<String>) -> Self {
        self.default = MockResponse::Fail(kind, message.into());
        self
    }

    /// Scripts the items returned for specific image bytes.
    pub fn respond_to(mut self, image: impl Into<Vec<u8>>, items: Vec<DetectedText>) -> Self {
        self.scripted.insert(image.into(), MockResponse::Items(items));
        self
    }

    /// Scripts a failure for specific image bytes.
    pub fn fail_on(
        mut self,
        image: impl Into<Vec<u8>>,
        kind: ErrorKind,
        message: impl Into<String>,
    ) -> Self {
        self.scripted
            .insert(image.into(), MockResponse::Fail(kind, message.into()));
        self
    }

    /// Number of `detect` calls made so far, across all clones.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl TextDetector for MockDetector {
    fn name(&self) -> &str {
        &self.name
    }

    async fn detect(&self, image: &[u8]) -> Result<Vec<DetectedText>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.scripted
            .get(image)
            .unwrap_or(&self.default)
            .to_result(&self.name)
    }
}
