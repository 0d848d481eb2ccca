//! Translate `OpenAI` Chat Completions messages into a Bedrock Anthropic payload.
//!
//! System messages are folded into one system prompt; user and assistant turns
//! become content-block lists. Individual content items that cannot be
//! expressed (remote image URLs, unknown part types, broken JSON) are dropped
//! without failing the translation.

use super::bedrock_types::{BedrockMessage, ContentBlock, Role, TranslatedPayload, MAX_TOKENS};
use super::openai_types::{ChatContent, ChatMessage, ContentPart, Lenient};

const DATA_IMAGE_PREFIX: &str = "data:image/";

/// Translate an ordered list of chat messages into the vendor payload.
/// Pure function: no I/O, never fails.
pub fn translate(messages: &[Lenient<ChatMessage>]) -> TranslatedPayload {
    let mut system_prompt = String::new();
    let mut translated = Vec::new();

    for msg in messages.iter().filter_map(Lenient::parsed) {
        match msg {
            ChatMessage::System { content } => {
                system_prompt.push_str(system_text(content));
                system_prompt.push('\n');
            }
            ChatMessage::User { content } => translated.push(BedrockMessage {
                role: Role::User,
                content: translate_content(content),
            }),
            ChatMessage::Assistant { content } => translated.push(BedrockMessage {
                role: Role::Assistant,
                content: translate_content(content),
            }),
            ChatMessage::Unknown => {}
        }
    }

    let system_prompt = system_prompt.trim();

    TranslatedPayload {
        system_prompt: (!system_prompt.is_empty()).then(|| system_prompt.to_string()),
        messages: translated,
        max_tokens: MAX_TOKENS,
    }
}

/// Only plain-string content counts for the system role.
fn system_text(content: &ChatContent) -> &str {
    match content {
        ChatContent::Text(text) => text,
        ChatContent::Parts(_) | ChatContent::Other(_) => "",
    }
}

fn translate_content(content: &ChatContent) -> Vec<ContentBlock> {
    match content {
        ChatContent::Text(text) => vec![ContentBlock::text(text.as_str())],
        ChatContent::Parts(parts) => parts
            .iter()
            .filter_map(Lenient::parsed)
            .filter_map(translate_part)
            .collect(),
        ChatContent::Other(_) => Vec::new(),
    }
}

fn translate_part(part: &ContentPart) -> Option<ContentBlock> {
    match part {
        ContentPart::Text { text } => Some(ContentBlock::text(text.as_str())),
        ContentPart::ImageUrl { image_url } => {
            let (media_type, data) = split_data_uri(&image_url.url)?;
            Some(ContentBlock::base64_image(media_type, data))
        }
        ContentPart::Unsupported => None,
    }
}

/// Decompose `data:<mime>;base64,<payload>` into `(mime, payload)`.
///
/// Returns `None` for anything that is not an inline image, including
/// remote `http(s)` URLs and data URIs without a comma.
pub fn split_data_uri(url: &str) -> Option<(&str, &str)> {
    if !url.starts_with(DATA_IMAGE_PREFIX) {
        return None;
    }
    let (header, data) = url.split_once(',')?;
    let after_scheme = header.split_once(':').map_or("", |(_, rest)| rest);
    let media_type = after_scheme.split(';').next().unwrap_or_default();
    Some((media_type, data))
}
