//! HTTP transport for resolved requests

use std::time::Duration;

use async_trait::async_trait;

use crate::api::{Method, ResolvedRequest};
use crate::error::Result;

/// Raw transport reply: status plus undecoded body. Interpreting
/// either is the decoder's job, not the transport's.
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Transport boundary between the orchestrator and the network.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the call. GET and DELETE carry no body; POST sends the
    /// JSON body when one is attached.
    async fn send(&self, request: &ResolvedRequest) -> Result<RawResponse>;
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &ResolvedRequest) -> Result<RawResponse> {
        let builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => {
                let builder = self.client.post(&request.url);
                match &request.body {
                    Some(body) => builder.json(body),
                    None => builder,
                }
            }
            Method::Delete => self.client.delete(&request.url),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(RawResponse { status, body })
    }
}
