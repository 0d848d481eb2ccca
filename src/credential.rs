//! The opaque bearer credential forwarded to the vendor.
//!
//! The raw string is what goes on the wire. Credentials minted for the
//! managed runtime carry a `bedrock-api-key-` prefix followed by a base64
//! blob; that blob is decoded once for diagnostics and otherwise unused.

use crate::error::{GatewayError, Result};
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use std::fmt;

pub const CREDENTIAL_PREFIX: &str = "bedrock-api-key-";

const TOLERANT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Clone)]
pub struct Credential {
    raw: String,
    decoded_target: Option<String>,
}

impl Credential {
    /// Wrap a raw credential string. Empty strings are treated as absent.
    pub fn new(raw: String) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        let decoded_target = decode_embedded_target(&raw).ok();
        Some(Self {
            raw,
            decoded_target,
        })
    }

    /// The undecoded credential, exactly as configured.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.raw)
    }

    pub fn decoded_target(&self) -> Option<&str> {
        self.decoded_target.as_deref()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("raw", &"[REDACTED]")
            .field("decodable", &self.decoded_target.is_some())
            .finish()
    }
}

/// Strip the known prefix and base64-decode the remainder.
/// Padding is optional: any number of trailing `=` is accepted.
pub fn decode_embedded_target(raw: &str) -> Result<String> {
    let encoded = raw.strip_prefix(CREDENTIAL_PREFIX).unwrap_or(raw);
    let bytes = TOLERANT
        .decode(encoded.trim_end_matches('='))
        .map_err(|e| GatewayError::credential(format!("credential is not base64: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| GatewayError::credential(format!("credential is not UTF-8: {e}")))
}
