//! End-to-end scenarios over the processor and batch runner.

use std::fs;

use glimpse_core::{BatchConfig, BatchOutcome, BatchRunner, DetectedText, ErrorKind};
use serde_json::json;

use crate::{MockDetector, mock_processor};

fn item(text: &str, confidence: f64) -> DetectedText {
    DetectedText::new(text, confidence)
}

#[tokio::test]
async fn test_low_confidence_word_escalates() {
    let primary = MockDetector::new("Rekognition").with_items(vec![item("GO", 0.95), item("X", 0.4)]);
    let fallback = MockDetector::new("Bedrock").with_items(vec![item("GO X", 0.9)]);
    let processor = mock_processor(primary.clone(), fallback.clone(), 0.7);

    let result = processor.process(b"image").await.unwrap();

    assert!(result.escalation().is_triggered());
    assert_eq!(
        result.escalation().reason(),
        Some("Rekognition confidence below 0.7 (lowest: 0.40)")
    );
    assert_eq!(result.primary(), [item("GO", 0.95), item("X", 0.4)]);
    assert_eq!(result.fallback(), [item("GO X", 0.9)]);
    assert_eq!(primary.calls(), 1);
    assert_eq!(fallback.calls(), 1);
}

#[tokio::test]
async fn test_confident_result_skips_fallback() {
    let primary = MockDetector::new("Rekognition").with_items(vec![item("EXIT", 0.98)]);
    let fallback = MockDetector::new("Bedrock").with_items(vec![item("unused", 0.5)]);
    let processor = mock_processor(primary, fallback.clone(), 0.7);

    let result = processor.process(b"image").await.unwrap();

    assert!(!result.escalation().is_triggered());
    assert_eq!(result.escalation().reason(), None);
    assert!(result.fallback().is_empty());
    assert_eq!(fallback.calls(), 0);
}

#[tokio::test]
async fn test_empty_primary_escalates() {
    let primary = MockDetector::new("Rekognition");
    let fallback = MockDetector::new("Bedrock").with_items(vec![item("faint", 0.85)]);
    let processor = mock_processor(primary, fallback, 0.7);

    let result = processor.process(b"blank").await.unwrap();

    assert_eq!(
        result.escalation().reason(),
        Some("No text detected by Rekognition")
    );
    assert_eq!(result.fallback().len(), 1);
}

#[tokio::test]
async fn test_processing_is_idempotent() {
    let primary = MockDetector::new("Rekognition").with_items(vec![item("A", 0.5)]);
    let fallback = MockDetector::new("Bedrock").with_items(vec![item("A", 0.93)]);
    let processor = mock_processor(primary, fallback, 0.7);

    let first = processor.process(b"same").await.unwrap();
    let second = processor.process(b"same").await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_fallback_failure_fails_the_image() {
    let primary = MockDetector::new("Rekognition").with_items(vec![item("A", 0.2)]);
    let fallback = MockDetector::new("Bedrock").with_failure(ErrorKind::RateLimited, "slow down");
    let processor = mock_processor(primary, fallback, 0.7);

    let error = processor.process(b"image").await.unwrap_err();

    assert_eq!(error.kind(), ErrorKind::RateLimited);
    assert_eq!(error.provider(), Some("Bedrock"));
}

#[tokio::test]
async fn test_batch_isolates_failures() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("1.png"), b"first").unwrap();
    fs::write(dir.path().join("2.png"), b"second").unwrap();
    fs::write(dir.path().join("3.jpg"), b"third").unwrap();
    fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

    let primary = MockDetector::new("Rekognition")
        .with_items(vec![item("OK", 0.99)])
        .fail_on(
            b"second".to_vec(),
            ErrorKind::ExternalError,
            "InvalidImageFormatException: Request has invalid image format",
        );
    let fallback = MockDetector::new("Bedrock");
    let runner = BatchRunner::new(
        mock_processor(primary.clone(), fallback, 0.7),
        BatchConfig::default(),
    );

    let report = runner.run_directory(dir.path()).await.unwrap();

    assert_eq!(report.len(), 3);
    assert_eq!(report.successful(), 2);
    assert_eq!(report.failed(), 1);
    assert_eq!(primary.calls(), 3);

    assert!(report.get("1.png").unwrap().is_success());
    assert!(report.get("3.jpg").unwrap().is_success());
    assert_eq!(
        report.get("2.png"),
        Some(&BatchOutcome::Failure {
            error: "Rekognition external_error: InvalidImageFormatException: Request has invalid image format"
                .to_string()
        })
    );

    let keys: Vec<_> = report.iter().map(|record| record.image.as_str()).collect();
    assert_eq!(keys, ["1.png", "2.png", "3.jpg"]);
}

#[tokio::test]
async fn test_batch_report_file() {
    let dir = tempfile::tempdir().unwrap();
    let images = dir.path().join("images");
    fs::create_dir(&images).unwrap();
    fs::write(images.join("sign.png"), b"sign").unwrap();

    let primary = MockDetector::new("Rekognition").with_items(vec![item("GO", 0.95), item("X", 0.4)]);
    let fallback = MockDetector::new("Bedrock").with_items(vec![item("GO X", 0.9)]);
    let runner = BatchRunner::new(mock_processor(primary, fallback, 0.7), BatchConfig::default());

    let output = dir.path().join("ocr_results.json");
    runner
        .run_directory(&images)
        .await
        .unwrap()
        .write_json(&output)
        .await
        .unwrap();

    let written: serde_json::Value = serde_json::from_slice(&fs::read(&output).unwrap()).unwrap();
    assert_eq!(
        written,
        json!({
            "sign.png": {
                "rekognition_texts": [
                    { "text": "GO", "confidence": 0.95 },
                    { "text": "X", "confidence": 0.4 }
                ],
                "bedrock_texts": [{ "text": "GO X", "confidence": 0.9 }],
                "second_opinion_triggered": true,
                "second_opinion_reason": "Rekognition confidence below 0.7 (lowest: 0.40)"
            }
        })
    );
}

#[tokio::test]
async fn test_unreadable_image_is_recorded() {
    let dir = tempfile::tempdir().unwrap();
    let runner = BatchRunner::new(
        mock_processor(MockDetector::new("Rekognition"), MockDetector::new("Bedrock"), 0.7),
        BatchConfig::default(),
    );

    let report = runner.run(vec![dir.path().join("missing.png")]).await;

    assert_eq!(report.failed(), 1);
    match report.get("missing.png") {
        Some(BatchOutcome::Failure { error }) => assert!(error.starts_with("image_read:")),
        other => panic!("unexpected outcome: {other:?}"),
    }
}
