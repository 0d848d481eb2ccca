use crate::config::GatewayConfig;
use crate::credential::Credential;
use crate::error::{GatewayError, Result};
use crate::logging::{LogLevel, SharedLogger};
use crate::translate::bedrock_types::{InvokeRequest, InvokeResponse};
use crate::translate::openai_types::{ChatCompletionResponse, ChatMessage, Lenient};
use crate::translate::request::translate;
use crate::translate::response::{completion_response, first_block_text, FALLBACK_MODEL};
use crate::transport::{VendorCall, VendorTransport};

use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

pub const MISSING_CREDENTIAL_REPLY: &str = "Error: Server API Token is not configured.";

/// Runs one chat-completion exchange against the vendor.
///
/// Vendor and configuration failures are reported as the assistant's reply
/// text inside an otherwise normal completion. Only a body that cannot be
/// read as a request object at all comes back as `Err`.
pub struct GatewayHandler {
    credential: Option<Credential>,
    transport: Arc<dyn VendorTransport>,
    endpoint: String,
    timeout: Duration,
    logger: SharedLogger,
}

impl GatewayHandler {
    pub fn new(
        config: &GatewayConfig,
        credential: Option<Credential>,
        transport: Arc<dyn VendorTransport>,
        logger: SharedLogger,
    ) -> Self {
        Self {
            credential,
            transport,
            endpoint: config.effective_endpoint(),
            timeout: config.timeout(),
            logger,
        }
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    pub async fn handle(&self, body: &[u8]) -> Result<ChatCompletionResponse> {
        let value: Value = match serde_json::from_slice(body) {
            Ok(v) => v,
            Err(e) => {
                self.logger
                    .warn("proxy", format!("Failed to parse request body: {}", e));
                return Ok(completion_response(
                    FALLBACK_MODEL,
                    format!("Error: invalid request body: {}", e),
                ));
            }
        };

        let Value::Object(request) = value else {
            return Err(GatewayError::invalid_request(
                "request body must be a JSON object",
            ));
        };

        let model = request
            .get("model")
            .and_then(Value::as_str)
            .unwrap_or(FALLBACK_MODEL);

        let Some(credential) = self.credential.as_ref() else {
            self.logger.error(
                "proxy",
                "Bearer credential is missing, skipping vendor call",
            );
            return Ok(completion_response(model, MISSING_CREDENTIAL_REPLY));
        };

        let messages = match parse_messages(request.get("messages")) {
            Ok(m) => m,
            Err(e) => {
                self.logger.warn("proxy", e.to_string());
                return Ok(completion_response(model, format!("Error: {}", e)));
            }
        };

        self.logger.info(
            "proxy",
            format!("Request: model={} messages={}", model, messages.len()),
        );

        let reply = self.complete(credential, &messages).await;
        Ok(completion_response(model, reply))
    }

    /// Produce the assistant reply text. Never fails: every failure becomes text.
    async fn complete(&self, credential: &Credential, messages: &[Lenient<ChatMessage>]) -> String {
        let request = InvokeRequest::from(translate(messages));

        match self.call_vendor(credential, request).await {
            Ok(text) => text,
            Err(e) => {
                self.logger
                    .error("proxy", format!("Exception calling Bedrock: {}", e));
                format!("Error: {}", e)
            }
        }
    }

    async fn call_vendor(&self, credential: &Credential, payload: InvokeRequest) -> Result<String> {
        let call = VendorCall {
            url: self.endpoint.clone(),
            authorization: credential.bearer(),
            payload,
            timeout: self.timeout,
        };

        let reply = self.transport.send(call).await?;

        if reply.status != 200 {
            self.logger.log_with_context(
                LogLevel::Warn,
                "proxy",
                format!(
                    "Bedrock API error: {} - {}",
                    reply.status,
                    truncate(&reply.body, 500)
                ),
                serde_json::json!({ "status": reply.status }),
            );
            return Ok(format!("Error calling Bedrock: {}", reply.status));
        }

        let resp: InvokeResponse = serde_json::from_str(&reply.body)?;
        Ok(first_block_text(&resp))
    }
}

/// Absent (or null) `messages` means an empty conversation.
fn parse_messages(raw: Option<&Value>) -> Result<Vec<Lenient<ChatMessage>>> {
    match raw {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(v @ Value::Array(_)) => Ok(Vec::<Lenient<ChatMessage>>::deserialize(v)?),
        Some(_) => Err(GatewayError::invalid_request("messages must be an array")),
    }
}

fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
