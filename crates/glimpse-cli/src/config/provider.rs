//! Detector construction.

use anyhow::Context;
use glimpse_bedrock::BedrockDetector;
use glimpse_core::OcrProcessor;
use glimpse_rekognition::RekognitionDetector;

use super::Cli;

/// Creates the processor with Rekognition as primary and Bedrock as fallback.
///
/// # Errors
///
/// Returns an error if either detector cannot be initialized.
pub fn create_processor(cli: &Cli) -> anyhow::Result<OcrProcessor> {
    let credentials = cli.aws.credentials();

    let primary = RekognitionDetector::new(cli.aws.rekognition_config()?, credentials.clone())
        .context("failed to create Rekognition detector")?;

    let fallback = BedrockDetector::new(
        cli.aws.bedrock_config()?,
        credentials,
        cli.bedrock.clone(),
    )
    .context("failed to create Bedrock detector")?;

    Ok(OcrProcessor::new(primary, fallback, cli.processor.clone()))
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_create_processor() {
        let cli = Cli::try_parse_from([
            "glimpse",
            "--aws-access-key-id",
            "AKID",
            "--aws-secret-access-key",
            "secret",
            "--confidence-threshold",
            "0.8",
        ])
        .unwrap();

        let processor = create_processor(&cli).unwrap();
        assert_eq!(processor.policy().primary(), "Rekognition");
        assert_eq!(processor.policy().threshold(), 0.8);
    }
}
