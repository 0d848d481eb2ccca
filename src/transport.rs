//! The outbound HTTP boundary.
//!
//! The gateway talks to the vendor through [`VendorTransport`] so the request
//! cycle can be exercised without a network.

use crate::error::Result;
use crate::translate::bedrock_types::InvokeRequest;
use async_trait::async_trait;
use std::time::Duration;

/// One outbound vendor call.
#[derive(Debug, Clone)]
pub struct VendorCall {
    pub url: String,
    /// Full `Authorization` header value
    pub authorization: String,
    pub payload: InvokeRequest,
    pub timeout: Duration,
}

/// Raw vendor reply; status and body are interpreted by the caller.
#[derive(Debug, Clone)]
pub struct VendorReply {
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait VendorTransport: Send + Sync {
    async fn send(&self, call: VendorCall) -> Result<VendorReply>;
}

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VendorTransport for ReqwestTransport {
    async fn send(&self, call: VendorCall) -> Result<VendorReply> {
        tracing::debug!(url = %call.url, "Sending invoke request");

        let response = self
            .client
            .post(&call.url)
            .header("Authorization", &call.authorization)
            .header("Content-Type", "application/json")
            .timeout(call.timeout)
            .json(&call.payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(VendorReply { status, body })
    }
}
