use async_trait::async_trait;

use crate::error::TransportError;
use crate::transport::{http, Transport, TransportKind, TransportResponse};
use crate::types::ExtractionRequest;

/// Development builds: same-origin proxy path that the dev server forwards to the remote API.
pub struct DevProxyTransport {
    client: reqwest::Client,
    url: String,
}

impl DevProxyTransport {
    pub fn new(origin: &str, proxy_path: &str) -> Self {
        let origin = origin.trim_end_matches('/');
        let url = if proxy_path.starts_with('/') {
            format!("{}{}", origin, proxy_path)
        } else {
            format!("{}/{}", origin, proxy_path)
        };
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }
}

#[async_trait]
impl Transport for DevProxyTransport {
    fn kind(&self) -> TransportKind {
        TransportKind::DevProxy
    }

    fn endpoint(&self) -> &str {
        &self.url
    }

    async fn post_json(
        &self,
        request: &ExtractionRequest,
        bearer_token: &str,
    ) -> Result<TransportResponse, TransportError> {
        tracing::debug!(url = %self.url, "Using development proxy");
        http::post_json(&self.client, &self.url, request, bearer_token, None).await
    }
}
