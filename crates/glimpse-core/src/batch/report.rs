//! Per-image records and their JSON projection.

use std::path::Path;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::types::{DetectedText, OcrResult};
use crate::{Error, Result};

/// Serializable projection of a successful [`OcrResult`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageReport {
    /// Items from the primary detector.
    #[serde(rename = "rekognition_texts")]
    pub primary_texts: Vec<DetectedText>,
    /// Items from the fallback detector; empty unless a second opinion was taken.
    #[serde(rename = "bedrock_texts")]
    pub fallback_texts: Vec<DetectedText>,
    /// Whether the fallback detector was consulted.
    pub second_opinion_triggered: bool,
    /// Why the fallback detector was consulted; `null` when it was not.
    pub second_opinion_reason: Option<String>,
}

impl From<OcrResult> for ImageReport {
    fn from(result: OcrResult) -> Self {
        let (primary, fallback, escalation) = result.into_parts();
        Self {
            primary_texts: primary,
            fallback_texts: fallback,
            second_opinion_triggered: escalation.is_triggered(),
            second_opinion_reason: escalation.reason().map(str::to_owned),
        }
    }
}

/// Outcome for one image: either a report or the error that stopped it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BatchOutcome {
    Success(ImageReport),
    Failure { error: String },
}

impl BatchOutcome {
    /// Returns `true` if the image was processed successfully.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl From<Result<OcrResult>> for BatchOutcome {
    fn from(result: Result<OcrResult>) -> Self {
        match result {
            Ok(result) => Self::Success(result.into()),
            Err(error) => Self::Failure {
                error: error.to_string(),
            },
        }
    }
}

/// A single image identifier and its outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRecord {
    pub image: String,
    pub outcome: BatchOutcome,
}

/// Results of a batch run, in processing order.
///
/// Serializes as a JSON object keyed by image identifier. Recording the same
/// identifier twice replaces the earlier outcome in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    records: Vec<BatchRecord>,
}

impl BatchReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome for an image.
    pub fn record(&mut self, image: impl Into<String>, outcome: impl Into<BatchOutcome>) {
        let image = image.into();
        let outcome = outcome.into();

        match self.records.iter_mut().find(|record| record.image == image) {
            Some(existing) => existing.outcome = outcome,
            None => self.records.push(BatchRecord { image, outcome }),
        }
    }

    /// Returns the outcome recorded for an image.
    pub fn get(&self, image: &str) -> Option<&BatchOutcome> {
        self.records
            .iter()
            .find(|record| record.image == image)
            .map(|record| &record.outcome)
    }

    /// Iterates over the records in processing order.
    pub fn iter(&self) -> impl Iterator<Item = &BatchRecord> {
        self.records.iter()
    }

    /// Returns the number of images recorded.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no image was recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of images processed successfully.
    pub fn successful(&self) -> usize {
        self.records
            .iter()
            .filter(|record| record.outcome.is_success())
            .count()
    }

    /// Returns the number of images that failed.
    pub fn failed(&self) -> usize {
        self.len() - self.successful()
    }

    /// Renders the report as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the report as JSON to `path`.
    ///
    /// The document is written to a temporary sibling first and then renamed,
    /// so an interrupted run never leaves a truncated report behind.
    pub async fn write_json(&self, path: &Path) -> Result<()> {
        let json = self.to_json_pretty()?;

        let mut staging = path.as_os_str().to_owned();
        staging.push(".tmp");
        let staging = Path::new(&staging);

        tokio::fs::write(staging, json.as_bytes())
            .await
            .map_err(|e| write_error(staging, e))?;
        tokio::fs::rename(staging, path)
            .await
            .map_err(|e| write_error(path, e))?;

        Ok(())
    }
}

fn write_error(path: &Path, error: std::io::Error) -> Error {
    Error::serialization()
        .with_message(format!("failed to write '{}': {error}", path.display()))
        .with_source(error)
}

impl Serialize for BatchReport {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.records.len()))?;
        for record in &self.records {
            map.serialize_entry(&record.image, &record.outcome)?;
        }
        map.end()
    }
}
