//! Wire types for the chat-style `InvokeModel` body.

use serde::{Deserialize, Serialize};

/// Request body for `InvokeModel`.
#[derive(Debug, Clone, Serialize)]
pub struct InvokeRequest {
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: f64,
}

/// A single chat message.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub role: &'static str,
    pub content: Vec<ContentPart>,
}

/// One part of a multimodal message.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

/// Inline image reference.
#[derive(Debug, Clone, Serialize)]
pub struct ImageUrl {
    /// `data:<mime>;base64,<payload>`
    pub url: String,
}

impl InvokeRequest {
    /// Builds a single user turn carrying `prompt` and the image data URL.
    pub fn user_turn(prompt: &str, data_url: String, max_tokens: u32, temperature: f64) -> Self {
        Self {
            messages: vec![Message {
                role: "user",
                content: vec![
                    ContentPart::Text {
                        text: prompt.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl { url: data_url },
                    },
                ],
            }],
            max_tokens,
            temperature,
        }
    }
}

/// Response body for `InvokeModel`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvokeResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl InvokeResponse {
    /// Text of the first choice, if the model produced one.
    pub fn into_text(self) -> Option<String> {
        self.choices.into_iter().next()?.message.content
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_request_shape() {
        let request = InvokeRequest::user_turn("Read it.", "data:image/png;base64,AAAA".into(), 1000, 0.1);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "messages": [{
                    "role": "user",
                    "content": [
                        { "type": "text", "text": "Read it." },
                        { "type": "image_url", "image_url": { "url": "data:image/png;base64,AAAA" } }
                    ]
                }],
                "max_tokens": 1000,
                "temperature": 0.1
            })
        );
    }

    #[test]
    fn test_response_text() {
        let response: InvokeResponse = serde_json::from_value(json!({
            "id": "abc",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "HELLO Confidence: 0.9" },
                "finish_reason": "stop"
            }]
        }))
        .unwrap();
        assert_eq!(response.into_text().as_deref(), Some("HELLO Confidence: 0.9"));
    }

    #[test]
    fn test_response_without_choices() {
        let response: InvokeResponse = serde_json::from_value(json!({ "choices": [] })).unwrap();
        assert_eq!(response.into_text(), None);
    }
}
