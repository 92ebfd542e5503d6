//! Turning a free-form model reply into a detected item.

use std::sync::LazyLock;

use glimpse_core::DetectedText;
use regex::Regex;

/// Confidence assigned when the reply carries no usable annotation.
///
/// A tunable policy value, not a measurement.
pub const DEFAULT_FALLBACK_CONFIDENCE: f64 = 0.85;

static CONFIDENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Confidence:\s*(-?[0-9]*\.?[0-9]+)").expect("confidence pattern is valid")
});

/// Parses a transcription reply into exactly one [`DetectedText`].
///
/// When a `Confidence: X.XX` annotation is present its value is clamped to
/// `[0, 1]`, and the annotation plus everything after it is dropped from the
/// text. Otherwise the whole trimmed reply is kept with
/// [`DEFAULT_FALLBACK_CONFIDENCE`].
pub fn parse_transcription(reply: &str) -> DetectedText {
    let annotated = CONFIDENCE.captures(reply).and_then(|captures| {
        let annotation = captures.get(0)?;
        let value = captures.get(1)?.as_str().parse::<f64>().ok()?;
        Some((annotation.start(), value))
    });

    match annotated {
        Some((start, confidence)) => DetectedText::new(reply[..start].trim(), confidence),
        None => DetectedText::new(reply.trim(), DEFAULT_FALLBACK_CONFIDENCE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotated_reply() {
        let item = parse_transcription("HELLO WORLD Confidence: 0.93");
        assert_eq!(item.text(), "HELLO WORLD");
        assert_eq!(item.confidence(), 0.93);
    }

    #[test]
    fn test_unannotated_reply_uses_default() {
        let item = parse_transcription("  EXIT ONLY\n");
        assert_eq!(item.text(), "EXIT ONLY");
        assert_eq!(item.confidence(), DEFAULT_FALLBACK_CONFIDENCE);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        assert_eq!(parse_transcription("A Confidence: 1.50").confidence(), 1.0);

        let negative = parse_transcription("B Confidence: -0.2");
        assert_eq!(negative.confidence(), 0.0);
        assert_eq!(negative.text(), "B");
    }

    #[test]
    fn test_trailing_text_is_dropped() {
        let reply = "Line one\nLine two\n\nConfidence: 0.71\nThe image is slightly blurry.";
        let item = parse_transcription(reply);
        assert_eq!(item.text(), "Line one\nLine two");
        assert_eq!(item.confidence(), 0.71);
    }

    #[test]
    fn test_first_annotation_wins() {
        let item = parse_transcription("X Confidence: 0.4 Confidence: 0.9");
        assert_eq!(item.text(), "X");
        assert_eq!(item.confidence(), 0.4);
    }

    #[test]
    fn test_annotation_without_number_is_kept_as_text() {
        let item = parse_transcription("STOP Confidence: high");
        assert_eq!(item.text(), "STOP Confidence: high");
        assert_eq!(item.confidence(), DEFAULT_FALLBACK_CONFIDENCE);
    }

    #[test]
    fn test_empty_reply() {
        let item = parse_transcription("");
        assert_eq!(item.text(), "");
        assert_eq!(item.confidence(), DEFAULT_FALLBACK_CONFIDENCE);
    }
}
