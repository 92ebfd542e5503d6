//! Per-image orchestration of the primary and fallback detectors.

mod config;

use std::fmt;
use std::sync::Arc;

pub use config::{ProcessorConfig, ProcessorConfigBuilder};
use jiff::Timestamp;

use crate::detector::{BoxedDetector, TextDetector};
use crate::policy::EscalationPolicy;
use crate::types::OcrResult;
use crate::{Result, TRACING_TARGET_PROCESSOR};

/// Drives one image through the pipeline.
///
/// The primary detector is always consulted. The fallback detector is only
/// called, with the same raw image bytes, when the escalation policy asks for
/// a second opinion. Errors from either detector are returned as-is: there is
/// no partial result for an image.
#[derive(Clone)]
pub struct OcrProcessor {
    primary: BoxedDetector,
    fallback: BoxedDetector,
    policy: EscalationPolicy,
}

impl fmt::Debug for OcrProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OcrProcessor")
            .field("primary", &self.primary.name())
            .field("fallback", &self.fallback.name())
            .field("policy", &self.policy)
            .finish()
    }
}

impl OcrProcessor {
    /// Creates a processor from a primary and a fallback detector.
    pub fn new<P, F>(primary: P, fallback: F, config: ProcessorConfig) -> Self
    where
        P: TextDetector + 'static,
        F: TextDetector + 'static,
    {
        Self::from_boxed(Arc::new(primary), Arc::new(fallback), config)
    }

    /// Creates a processor from already shared detectors.
    pub fn from_boxed(
        primary: BoxedDetector,
        fallback: BoxedDetector,
        config: ProcessorConfig,
    ) -> Self {
        let policy = EscalationPolicy::new(config.confidence_threshold, primary.name());
        Self {
            primary,
            fallback,
            policy,
        }
    }

    /// Returns the escalation policy in effect.
    pub fn policy(&self) -> &EscalationPolicy {
        &self.policy
    }

    /// Extracts text from one image, escalating to the fallback detector if needed.
    pub async fn process(&self, image: &[u8]) -> Result<OcrResult> {
        let started_at = Timestamp::now();

        let primary = self.primary.detect(image).await?;

        tracing::debug!(
            target: TRACING_TARGET_PROCESSOR,
            provider = self.primary.name(),
            item_count = primary.len(),
            "Primary detection completed"
        );

        if !self.policy.should_escalate(&primary) {
            tracing::debug!(
                target: TRACING_TARGET_PROCESSOR,
                elapsed_ms = Timestamp::now().duration_since(started_at).as_millis(),
                "Primary result accepted"
            );
            return Ok(OcrResult::primary_only(primary));
        }

        let reason = self.policy.reason_for_escalation(&primary);

        tracing::debug!(
            target: TRACING_TARGET_PROCESSOR,
            provider = self.fallback.name(),
            reason = %reason,
            "Requesting second opinion"
        );

        let fallback = self.fallback.detect(image).await?;

        tracing::debug!(
            target: TRACING_TARGET_PROCESSOR,
            provider = self.fallback.name(),
            item_count = fallback.len(),
            elapsed_ms = Timestamp::now().duration_since(started_at).as_millis(),
            "Second opinion completed"
        );

        Ok(OcrResult::escalated(primary, fallback, reason))
    }
}
