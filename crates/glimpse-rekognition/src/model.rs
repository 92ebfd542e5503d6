//! Wire types for `RekognitionService.DetectText`.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use glimpse_core::DetectedText;
use serde::{Deserialize, Serialize};

/// Request body for `DetectText`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DetectTextRequest {
    pub image: Image,
}

/// Inline image payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Image {
    /// Base64-encoded image bytes.
    pub bytes: String,
}

impl DetectTextRequest {
    /// Builds a request carrying the raw image bytes inline.
    pub fn from_bytes(image: &[u8]) -> Self {
        Self {
            image: Image {
                bytes: STANDARD.encode(image),
            },
        }
    }
}

/// Granularity of a detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TextType {
    Line,
    Word,
    #[serde(other)]
    Unknown,
}

/// One detection as returned by the service.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TextDetection {
    #[serde(default)]
    pub detected_text: String,
    #[serde(rename = "Type")]
    pub text_type: TextType,
    /// Confidence on a `0..100` scale.
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(default)]
    pub parent_id: Option<u32>,
}

/// Response body for `DetectText`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DetectTextResponse {
    #[serde(default)]
    pub text_detections: Vec<TextDetection>,
    #[serde(default)]
    pub text_model_version: Option<String>,
}

impl DetectTextResponse {
    /// Keeps the word-level detections, in service order, with normalized confidence.
    pub fn into_detected_texts(self) -> Vec<DetectedText> {
        self.text_detections
            .into_iter()
            .filter(|detection| detection.text_type == TextType::Word)
            .map(|detection| DetectedText::from_percentage(detection.detected_text, detection.confidence))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_request_shape() {
        let request = DetectTextRequest::from_bytes(b"abc");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "Image": { "Bytes": "YWJj" } })
        );
    }

    #[test]
    fn test_words_are_kept_and_normalized() {
        let response: DetectTextResponse = serde_json::from_value(json!({
            "TextDetections": [
                { "DetectedText": "STOP HERE", "Type": "LINE", "Confidence": 99.1, "Id": 0 },
                { "DetectedText": "STOP", "Type": "WORD", "Confidence": 87.5, "Id": 1, "ParentId": 0 },
                { "DetectedText": "HERE", "Type": "WORD", "Confidence": 42.0, "Id": 2, "ParentId": 0 }
            ],
            "TextModelVersion": "3.0"
        }))
        .unwrap();

        let items = response.into_detected_texts();

        assert_eq!(
            items,
            vec![
                DetectedText::new("STOP", 0.875),
                DetectedText::new("HERE", 0.42),
            ]
        );
    }

    #[test]
    fn test_empty_response() {
        let response: DetectTextResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.into_detected_texts().is_empty());
    }

    #[test]
    fn test_unknown_type_is_dropped() {
        let response: DetectTextResponse = serde_json::from_value(json!({
            "TextDetections": [
                { "DetectedText": "?", "Type": "PARAGRAPH", "Confidence": 90.0 }
            ]
        }))
        .unwrap();
        assert!(response.into_detected_texts().is_empty());
    }
}
