//! Typed errors for the extraction client.

use thiserror::Error;

/// Errors surfaced by [`TicketExtractionClient`](crate::TicketExtractionClient).
#[derive(Debug, Error)]
pub enum ExtractError {
    /// No bearer token configured. Not retryable without reconfiguration.
    #[error("API key not configured")]
    Configuration,

    /// Input rejected before transmission.
    #[error("{0}")]
    Validation(String),

    /// Non-2xx response, transport failure or unreadable body.
    #[error("failed to extract ticket data: {message}")]
    Extraction {
        status: Option<u16>,
        message: String,
    },

    /// The caller cancelled the call before it completed.
    #[error("extraction cancelled")]
    Cancelled,
}

impl ExtractError {
    /// Whether re-submitting the same input may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ExtractError::Extraction { .. } | ExtractError::Cancelled)
    }

    /// HTTP status of a failed extraction, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ExtractError::Extraction { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<TransportError> for ExtractError {
    fn from(err: TransportError) -> Self {
        ExtractError::Extraction {
            status: None,
            message: err.to_string(),
        }
    }
}

/// Failures below the HTTP status line: nothing came back to classify.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("network error: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Request(String),
}

/// Errors building an [`ExtractionConfig`](crate::ExtractionConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("could not read env file {}: {source}", .path.display())]
    EnvFile {
        path: std::path::PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("could not build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;
