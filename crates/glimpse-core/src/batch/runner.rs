//! Sequential batch runner.

use std::path::{Path, PathBuf};

use super::{BatchConfig, BatchReport};
use crate::image::ImageFormat;
use crate::processor::OcrProcessor;
use crate::types::OcrResult;
use crate::{Error, Result, TRACING_TARGET_BATCH};

/// Runs the [`OcrProcessor`] over a set of images.
///
/// Images are processed one at a time. Failures are recorded per image and
/// never abort the run.
#[derive(Debug, Clone)]
pub struct BatchRunner {
    processor: OcrProcessor,
    config: BatchConfig,
}

impl BatchRunner {
    /// Creates a new batch runner.
    pub fn new(processor: OcrProcessor, config: BatchConfig) -> Self {
        Self { processor, config }
    }

    /// Returns the underlying processor.
    pub fn processor(&self) -> &OcrProcessor {
        &self.processor
    }

    /// Lists the supported images in `dir`, sorted by file name.
    ///
    /// Files whose extension is not `.jpg`, `.jpeg` or `.png` (in any case)
    /// are skipped silently.
    ///
    /// # Errors
    ///
    /// Returns an error if `dir` does not exist, is not a directory, or
    /// cannot be listed.
    pub async fn discover(dir: &Path) -> Result<Vec<PathBuf>> {
        let metadata = tokio::fs::metadata(dir).await.map_err(|e| {
            Error::invalid_input()
                .with_message(format!("folder '{}' does not exist", dir.display()))
                .with_source(e)
        })?;

        if !metadata.is_dir() {
            return Err(Error::invalid_input()
                .with_message(format!("'{}' is not a folder", dir.display())));
        }

        let mut entries = tokio::fs::read_dir(dir)
            .await
            .map_err(|e| Error::image_read(dir, e))?;

        let mut images = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| Error::image_read(dir, e))?
        {
            let path = entry.path();
            if ImageFormat::from_path(&path).is_none() {
                continue;
            }

            let is_file = tokio::fs::metadata(&path)
                .await
                .map(|m| m.is_file())
                .unwrap_or(false);
            if is_file {
                images.push(path);
            }
        }

        images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(images)
    }

    /// Processes every supported image in `dir`.
    pub async fn run_directory(&self, dir: &Path) -> Result<BatchReport> {
        let images = Self::discover(dir).await?;

        tracing::info!(
            target: TRACING_TARGET_BATCH,
            folder = %dir.display(),
            image_count = images.len(),
            "Discovered images"
        );

        Ok(self.run(images).await)
    }

    /// Processes the given images in order and collects their outcomes.
    ///
    /// Each image is keyed by its file name.
    pub async fn run<I>(&self, images: I) -> BatchReport
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut report = BatchReport::new();

        for path in images {
            let image = image_key(&path);

            tracing::info!(
                target: TRACING_TARGET_BATCH,
                image = %image,
                "Processing image"
            );

            let result = self.process_path(&path).await;
            match &result {
                Ok(result) => log_result(&image, result),
                Err(error) => {
                    tracing::warn!(
                        target: TRACING_TARGET_BATCH,
                        image = %image,
                        error = %error,
                        "Image processing failed"
                    );
                }
            }

            report.record(image, result);
        }

        tracing::info!(
            target: TRACING_TARGET_BATCH,
            successful = report.successful(),
            failed = report.failed(),
            "Batch completed"
        );

        report
    }

    async fn process_path(&self, path: &Path) -> Result<OcrResult> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| Error::image_read(path, e))?;

        let limit = self.config.max_image_size_bytes();
        if bytes.len() as u64 > limit {
            tracing::warn!(
                target: TRACING_TARGET_BATCH,
                image = %path.display(),
                size_bytes = bytes.len(),
                limit_bytes = limit,
                "Image exceeds the advisory size limit"
            );
        }

        self.processor.process(&bytes).await
    }
}

fn image_key(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn log_result(image: &str, result: &OcrResult) {
    tracing::info!(
        target: TRACING_TARGET_BATCH,
        image = %image,
        primary_items = result.primary().len(),
        fallback_items = result.fallback().len(),
        "Image processed"
    );

    if let Some(reason) = result.escalation().reason() {
        tracing::info!(
            target: TRACING_TARGET_BATCH,
            image = %image,
            reason = %reason,
            "Second opinion triggered"
        );
    }
}
