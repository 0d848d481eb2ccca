//! API translation between `OpenAI` Chat Completions and Bedrock Anthropic formats.
//!
//! The core of the gateway: converts inbound messages into the vendor payload
//! and vendor replies into completion objects. All translation functions are
//! pure (no I/O).

pub mod bedrock_types;
pub mod openai_types;
pub mod request;
pub mod response;
