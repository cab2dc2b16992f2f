//! Testing utilities.
//!
//! [`MockTransport`] stands in for the network: it records every call and
//! answers with a scripted response, so client behavior can be checked
//! without a backend.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::TransportError;
use crate::transport::{Transport, TransportKind, TransportResponse};
use crate::types::ExtractionRequest;

/// Record of one call made through the mock transport.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub ocr_text: String,
    pub bearer_token: String,
}

#[derive(Debug, Clone)]
enum Outcome {
    Respond(TransportResponse),
    Timeout(Duration),
    Connect(String),
}

/// Scripted transport that records its invocations.
#[derive(Debug, Clone)]
pub struct MockTransport {
    kind: TransportKind,
    endpoint: String,
    outcome: Outcome,
    delay: Option<Duration>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockTransport {
    /// A mock of the given kind answering `200 {}` until scripted otherwise.
    pub fn new(kind: TransportKind) -> Self {
        Self {
            kind,
            endpoint: "mock://extract_ticket".to_string(),
            outcome: Outcome::Respond(TransportResponse::new(200, "{}")),
            delay: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Answer every call with `status` and a raw body.
    pub fn with_response(mut self, status: u16, body: impl Into<String>) -> Self {
        self.outcome = Outcome::Respond(TransportResponse::new(status, body));
        self
    }

    /// Answer every call with `status` and a JSON body.
    pub fn with_json(self, status: u16, body: serde_json::Value) -> Self {
        self.with_response(status, body.to_string())
    }

    /// Fail every call as if the request timed out.
    pub fn with_timeout(mut self, after: Duration) -> Self {
        self.outcome = Outcome::Timeout(after);
        self
    }

    /// Fail every call as if the host were unreachable.
    pub fn with_connect_error(mut self, message: impl Into<String>) -> Self {
        self.outcome = Outcome::Connect(message.into());
        self
    }

    /// Sleep before answering. The call is recorded before the sleep.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn kind(&self) -> TransportKind {
        self.kind
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post_json(
        &self,
        request: &ExtractionRequest,
        bearer_token: &str,
    ) -> Result<TransportResponse, TransportError> {
        self.calls.lock().unwrap().push(RecordedCall {
            ocr_text: request.ocr_text.clone(),
            bearer_token: bearer_token.to_string(),
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.outcome {
            Outcome::Respond(response) => Ok(response.clone()),
            Outcome::Timeout(after) => Err(TransportError::Timeout(*after)),
            Outcome::Connect(message) => Err(TransportError::Connect(message.clone())),
        }
    }
}
