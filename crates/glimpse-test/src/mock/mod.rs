//! Mock implementations of text detectors for testing.
//!
//! These mocks never touch the network and are useful for unit and
//! integration testing of the processor and batch runner.

mod detector;

pub use detector::{MockDetector, MockResponse};
use glimpse_core::{OcrProcessor, ProcessorConfig};

/// Creates a processor wired to two mock detectors.
///
/// # Panics
///
/// Panics if `threshold` is outside `[0, 1]`.
pub fn mock_processor(primary: MockDetector, fallback: MockDetector, threshold: f64) -> OcrProcessor {
    let config = ProcessorConfig::builder()
        .with_confidence_threshold(threshold)
        .build()
        .expect("mock threshold must be within [0, 1]");
    OcrProcessor::new(primary, fallback, config)
}
