use async_trait::async_trait;

use crate::error::TransportError;
use crate::transport::{http, Transport, TransportKind, TransportResponse};
use crate::types::ExtractionRequest;

/// Production browser builds call the remote API directly, with no explicit timeout.
pub struct DirectTransport {
    client: reqwest::Client,
    url: String,
}

impl DirectTransport {
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }
}

#[async_trait]
impl Transport for DirectTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::Direct
    }

    fn endpoint(&self) -> &str {
        &self.url
    }

    async fn post_json(
        &self,
        request: &ExtractionRequest,
        bearer_token: &str,
    ) -> Result<TransportResponse, TransportError> {
        tracing::debug!(url = %self.url, "Using direct API URL");
        http::post_json(&self.client, &self.url, request, bearer_token, None).await
    }
}
