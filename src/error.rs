//! Error types for the gateway.

use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GatewayError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Credential error: {message}")]
    Credential { message: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl GatewayError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn credential(msg: impl Into<String>) -> Self {
        Self::Credential {
            message: msg.into(),
        }
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: msg.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GatewayError>;
