use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::config::{ApiKey, ExtractionConfig};
use crate::error::{ConfigError, ExtractError, Result};
use crate::services::display::normalize;
use crate::transport::{select_transport, Transport, TransportKind};
use crate::types::{DisplayField, ExtractionRequest, ExtractionResponse};

/// Longest slice of an error body echoed into logs.
const ERROR_PREVIEW_CHARS: usize = 200;

/// Turns raw OCR text into structured ticket data via the extraction backend.
///
/// The transport is chosen once, when the client is built. Calls share no
/// state, so one client can serve concurrent extractions.
#[derive(Clone)]
pub struct TicketExtractionClient {
    api_key: Option<ApiKey>,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for TicketExtractionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TicketExtractionClient")
            .field("has_api_key", &self.api_key.is_some())
            .field("transport", &self.transport.kind())
            .field("endpoint", &self.transport.endpoint())
            .finish()
    }
}

impl TicketExtractionClient {
    pub fn new(config: &ExtractionConfig) -> std::result::Result<Self, ConfigError> {
        let transport = select_transport(config)?;
        tracing::info!(
            has_api_key = config.api_key.is_some(),
            runtime = %config.runtime,
            "TicketExtractionClient initialized"
        );
        Ok(Self::with_transport(config.api_key.clone(), transport))
    }

    /// Build around an already-chosen transport.
    pub fn with_transport(api_key: Option<ApiKey>, transport: Arc<dyn Transport>) -> Self {
        Self { api_key, transport }
    }

    pub fn transport_kind(&self) -> TransportKind {
        self.transport.kind()
    }

    /// Send `ocr_text` to the backend and return its parsed response.
    ///
    /// Fails with [`ExtractError::Configuration`] when no key is set and with
    /// [`ExtractError::Validation`] when the text is blank; neither touches the
    /// network. Everything that goes wrong afterwards is
    /// [`ExtractError::Extraction`]. Nothing is retried.
    pub async fn extract(&self, ocr_text: &str) -> Result<ExtractionResponse> {
        let api_key = self.api_key.as_ref().ok_or(ExtractError::Configuration)?;
        let request = ExtractionRequest::from_ocr_text(ocr_text)
            .ok_or_else(|| ExtractError::Validation("OCR text is required".to_string()))?;

        tracing::info!(
            url = self.transport.endpoint(),
            transport = ?self.transport.kind(),
            ocr_text_len = request.ocr_text.len(),
            "Calling ticket extraction API"
        );

        let response = self
            .transport
            .post_json(&request, api_key.expose())
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Ticket extraction transport failed");
                ExtractError::from(e)
            })?;

        if !response.is_success() {
            tracing::warn!(
                status = response.status,
                body = %preview(&response.body),
                "Ticket extraction API returned an error"
            );
            return Err(ExtractError::Extraction {
                status: Some(response.status),
                message: format!(
                    "API call failed: {} {} - {}",
                    response.status, response.status_text, response.body
                ),
            });
        }

        let data: ExtractionResponse =
            serde_json::from_str(&response.body).map_err(|e| {
                tracing::warn!(
                    status = response.status,
                    error = %e,
                    body = %preview(&response.body),
                    "Ticket extraction response was not valid JSON"
                );
                ExtractError::Extraction {
                    status: Some(response.status),
                    message: format!("invalid response body: {}", e),
                }
            })?;

        tracing::info!(
            status = response.status,
            ticket_category = ?data.ticket_data.ticket_category,
            has_pcn_number = data.ticket_data.pcn_number.is_some(),
            tokens_used = ?data.llm_tokens_used,
            "Ticket extraction successful"
        );
        Ok(data)
    }

    /// [`extract`](Self::extract), abandoned as soon as `cancel` fires.
    ///
    /// The in-flight request future is dropped on cancellation.
    pub async fn extract_with_cancel(
        &self,
        ocr_text: &str,
        cancel: &CancellationToken,
    ) -> Result<ExtractionResponse> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!("Ticket extraction cancelled");
                Err(ExtractError::Cancelled)
            }
            result = self.extract(ocr_text) => result,
        }
    }

    /// Extract, then flatten into display fields.
    pub async fn extract_display_fields(&self, ocr_text: &str) -> Result<Vec<DisplayField>> {
        let response = self.extract(ocr_text).await?;
        let fields = normalize(&response);
        tracing::debug!(count = fields.len(), "Formatted ticket fields");
        Ok(fields)
    }
}

fn preview(body: &str) -> String {
    body.chars().take(ERROR_PREVIEW_CHARS).collect()
}
