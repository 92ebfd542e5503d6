#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod telemetry;

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, bail};
use glimpse_core::{BatchRunner, ImageFormat};

use crate::config::{Cli, create_processor};

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "glimpse_cli::startup";
pub const TRACING_TARGET_CONFIG: &str = "glimpse_cli::config";
pub const TRACING_TARGET_RUN: &str = "glimpse_cli::run";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_RUN,
            error = %format!("{error:#}"),
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    telemetry::init_tracing(cli.log_json)?;
    cli.log();
    cli.validate()?;

    let images = collect_images(&cli.input).await?;
    if images.is_empty() {
        tracing::warn!(
            target: TRACING_TARGET_RUN,
            input = %cli.input.display(),
            "No supported images found (expected .jpg, .jpeg or .png)"
        );
        return Ok(());
    }

    tracing::info!(
        target: TRACING_TARGET_RUN,
        image_count = images.len(),
        images = ?images.iter().map(|p| display_name(p)).collect::<Vec<_>>(),
        "Found images to process"
    );

    let processor = create_processor(&cli).context("failed to create detectors")?;
    let runner = BatchRunner::new(processor, cli.batch.clone());
    let report = runner.run(images).await;

    report
        .write_json(&cli.output)
        .await
        .with_context(|| format!("failed to write results to '{}'", cli.output.display()))?;

    tracing::info!(
        target: TRACING_TARGET_RUN,
        output = %cli.output.display(),
        successful = report.successful(),
        failed = report.failed(),
        "Results saved"
    );

    Ok(())
}

/// Resolves the input to the list of images to process.
///
/// A folder yields its supported images sorted by name; a single file is
/// accepted as-is when its extension is supported.
async fn collect_images(input: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let metadata = tokio::fs::metadata(input)
        .await
        .with_context(|| format!("input '{}' does not exist", input.display()))?;

    if metadata.is_dir() {
        return Ok(BatchRunner::discover(input).await?);
    }

    if ImageFormat::from_path(input).is_none() {
        bail!(
            "unsupported image '{}': expected .jpg, .jpeg or .png",
            input.display()
        );
    }

    Ok(vec![input.to_path_buf()])
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
