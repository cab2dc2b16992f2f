use async_trait::async_trait;
use std::time::Duration;

use crate::error::{ConfigError, TransportError};
use crate::transport::{http, Transport, TransportKind, TransportResponse};
use crate::types::ExtractionRequest;

/// The native shell's HTTP bridge: absolute URL, not subject to cross-origin
/// rules, and bounded by a timeout.
pub struct NativeHttpTransport {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl NativeHttpTransport {
    pub fn new(url: String, timeout: Duration) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url,
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl Transport for NativeHttpTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::NativeHttp
    }

    fn endpoint(&self) -> &str {
        &self.url
    }

    async fn post_json(
        &self,
        request: &ExtractionRequest,
        bearer_token: &str,
    ) -> Result<TransportResponse, TransportError> {
        tracing::debug!(url = %self.url, timeout_ms = self.timeout.as_millis() as u64, "Using native HTTP");
        http::post_json(&self.client, &self.url, request, bearer_token, Some(self.timeout)).await
    }
}
