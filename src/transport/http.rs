use std::time::Duration;

use crate::error::TransportError;
use crate::transport::TransportResponse;
use crate::types::ExtractionRequest;

/// POST `request` as JSON with a bearer token and read back status and body.
pub(super) async fn post_json(
    client: &reqwest::Client,
    url: &str,
    request: &ExtractionRequest,
    bearer_token: &str,
    timeout: Option<Duration>,
) -> Result<TransportResponse, TransportError> {
    let response = client
        .post(url)
        .bearer_auth(bearer_token)
        .json(request)
        .send()
        .await
        .map_err(|e| classify(e, timeout))?;

    let status = response.status();
    let body = response.text().await.map_err(|e| classify(e, timeout))?;

    Ok(TransportResponse {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or("").to_string(),
        body,
    })
}

fn classify(err: reqwest::Error, timeout: Option<Duration>) -> TransportError {
    if err.is_timeout() {
        // reqwest only reports a timeout when one was configured.
        return TransportError::Timeout(timeout.unwrap_or_default());
    }
    if err.is_connect() {
        return TransportError::Connect(err.to_string());
    }
    TransportError::Request(err.to_string())
}
