use super::bedrock_types::InvokeResponse;
use super::openai_types::{
    ChatCompletionResponse, ChatUsage, Choice, ChoiceMessage, ModelEntry, ModelList,
};

pub const COMPLETION_ID: &str = "chatcmpl-bedrock";
pub const FIXED_CREATED: u64 = 1_234_567_890;
pub const NO_RESPONSE: &str = "No response";
pub const LISTED_MODEL_ID: &str = "claude-sonnet-4.5";
pub const FALLBACK_MODEL: &str = "claude-sonnet-4";

/// Pull the reply text out of a vendor response. Only the first content
/// block is considered; a missing block or missing text yields `No response`.
pub fn first_block_text(resp: &InvokeResponse) -> String {
    resp.content
        .first()
        .and_then(|block| block.text.clone())
        .unwrap_or_else(|| NO_RESPONSE.to_string())
}

/// Wrap reply text in an `OpenAI` completion object.
/// `model` is echoed from the caller; token counts are placeholders, not measured.
pub fn completion_response(model: &str, content: impl Into<String>) -> ChatCompletionResponse {
    ChatCompletionResponse {
        id: COMPLETION_ID.to_string(),
        object: "chat.completion".to_string(),
        created: FIXED_CREATED,
        model: model.to_string(),
        choices: vec![Choice {
            index: 0,
            message: ChoiceMessage {
                role: "assistant".to_string(),
                content: content.into(),
            },
            finish_reason: "stop".to_string(),
        }],
        usage: ChatUsage {
            prompt_tokens: 10,
            completion_tokens: 20,
            total_tokens: 30,
        },
    }
}

/// The single model advertised on `/v1/models`.
pub fn model_list() -> ModelList {
    ModelList {
        object: "list".to_string(),
        data: vec![ModelEntry {
            id: LISTED_MODEL_ID.to_string(),
            object: "model".to_string(),
            created: FIXED_CREATED,
            owned_by: "anthropic".to_string(),
            permission: Vec::new(),
            root: FALLBACK_MODEL.to_string(),
            parent: None,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::bedrock_types::ResponseBlock;
    use serde_json::json;

    fn response_with(blocks: Vec<ResponseBlock>) -> InvokeResponse {
        InvokeResponse {
            content: blocks,
            ..InvokeResponse::default()
        }
    }

    #[test]
    fn test_first_block_wins() {
        let resp = response_with(vec![
            ResponseBlock {
                block_type: Some("text".to_string()),
                text: Some("first".to_string()),
            },
            ResponseBlock {
                block_type: Some("text".to_string()),
                text: Some("second".to_string()),
            },
        ]);
        assert_eq!(first_block_text(&resp), "first");
    }

    #[test]
    fn test_missing_text_is_sentinel() {
        assert_eq!(first_block_text(&response_with(Vec::new())), "No response");
        assert_eq!(
            first_block_text(&response_with(vec![ResponseBlock::default()])),
            "No response"
        );
    }

    #[test]
    fn test_completion_shape() {
        let value = serde_json::to_value(completion_response("gpt-4o", "hi")).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "chatcmpl-bedrock",
                "object": "chat.completion",
                "created": 1234567890,
                "model": "gpt-4o",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": "hi"},
                    "finish_reason": "stop"
                }],
                "usage": {"prompt_tokens": 10, "completion_tokens": 20, "total_tokens": 30}
            })
        );
    }

    #[test]
    fn test_model_list_has_one_entry() {
        let value = serde_json::to_value(model_list()).unwrap();
        assert_eq!(value["object"], "list");
        assert_eq!(value["data"].as_array().unwrap().len(), 1);
        assert_eq!(value["data"][0]["id"], "claude-sonnet-4.5");
        assert_eq!(value["data"][0]["root"], "claude-sonnet-4");
        assert!(value["data"][0]["parent"].is_null());
        assert_eq!(value["data"][0]["permission"], json!([]));
    }
}
