//! Wire types for Anthropic models served through the Bedrock runtime
//! `InvokeModel` endpoint.

use serde::{Deserialize, Serialize};

pub const ANTHROPIC_VERSION: &str = "bedrock-2023-05-31";
pub const MAX_TOKENS: u64 = 1000;

pub const BEDROCK_REGION: &str = "eu-central-1";
pub const BEDROCK_MODEL_ID: &str = "eu.anthropic.claude-sonnet-4-5-20250929-v1:0";

pub fn default_invoke_url() -> String {
    format!("https://bedrock-runtime.{BEDROCK_REGION}.amazonaws.com/model/{BEDROCK_MODEL_ID}/invoke")
}

// ---------------------------------------------------------------------------
// Request types (what we send TO the vendor)
// ---------------------------------------------------------------------------

/// Output of request translation: system prompt split out, turns converted
/// to content blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedPayload {
    pub system_prompt: Option<String>,
    pub messages: Vec<BedrockMessage>,
    pub max_tokens: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvokeRequest {
    pub anthropic_version: String,
    pub messages: Vec<BedrockMessage>,
    pub max_tokens: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}

impl From<TranslatedPayload> for InvokeRequest {
    fn from(payload: TranslatedPayload) -> Self {
        Self {
            anthropic_version: ANTHROPIC_VERSION.to_string(),
            messages: payload.messages,
            max_tokens: payload.max_tokens,
            system: payload.system_prompt,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BedrockMessage {
    pub role: Role,
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image")]
    Image { source: ImageSource },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSource {
    #[serde(rename = "type")]
    pub source_type: String, // always "base64"
    pub media_type: String,
    pub data: String,
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }

    pub fn base64_image(media_type: impl Into<String>, data: impl Into<String>) -> Self {
        ContentBlock::Image {
            source: ImageSource {
                source_type: "base64".to_string(),
                media_type: media_type.into(),
                data: data.into(),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Response types (what we receive FROM the vendor)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvokeResponse {
    #[serde(default)]
    pub content: Vec<ResponseBlock>,
    #[serde(flatten)]
    pub extra: std::collections::HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseBlock {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub block_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invoke_request_wire_shape() {
        let payload = TranslatedPayload {
            system_prompt: Some("Be brief".to_string()),
            messages: vec![BedrockMessage {
                role: Role::User,
                content: vec![
                    ContentBlock::text("look"),
                    ContentBlock::base64_image("image/png", "QUJD"),
                ],
            }],
            max_tokens: MAX_TOKENS,
        };

        let value = serde_json::to_value(InvokeRequest::from(payload)).unwrap();
        assert_eq!(
            value,
            json!({
                "anthropic_version": "bedrock-2023-05-31",
                "max_tokens": 1000,
                "system": "Be brief",
                "messages": [{
                    "role": "user",
                    "content": [
                        {"type": "text", "text": "look"},
                        {"type": "image", "source": {"type": "base64", "media_type": "image/png", "data": "QUJD"}}
                    ]
                }]
            })
        );
    }

    #[test]
    fn test_system_omitted_when_absent() {
        let payload = TranslatedPayload {
            system_prompt: None,
            messages: Vec::new(),
            max_tokens: MAX_TOKENS,
        };
        let value = serde_json::to_value(InvokeRequest::from(payload)).unwrap();
        assert!(value.get("system").is_none());
    }

    #[test]
    fn test_response_tolerates_extra_fields() {
        let resp: InvokeResponse = serde_json::from_value(json!({
            "id": "msg_1",
            "type": "message",
            "content": [{"type": "text", "text": "hi"}],
            "stop_reason": "end_turn"
        }))
        .unwrap();
        assert_eq!(resp.content[0].text.as_deref(), Some("hi"));
    }
}
