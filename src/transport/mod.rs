//! Transport strategies for reaching the extraction backend.
//!
//! The runtime environment decides how the POST leaves the process:
//!
//! - inside a native shell, through the shell's HTTP bridge (no cross-origin
//!   rules, bounded timeout);
//! - in a development build, through the same-origin proxy path;
//! - otherwise, directly to the remote API.
//!
//! [`select_transport`] makes that choice once, at client construction.

mod direct;
mod http;
mod native;
mod proxy;

pub use direct::DirectTransport;
pub use native::NativeHttpTransport;
pub use proxy::DevProxyTransport;

use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::config::ExtractionConfig;
use crate::error::{ConfigError, TransportError};
use crate::types::ExtractionRequest;

/// Where the client is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnvironment {
    NativeShell,
    Development,
    Production,
}

impl fmt::Display for RuntimeEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RuntimeEnvironment::NativeShell => "native",
            RuntimeEnvironment::Development => "development",
            RuntimeEnvironment::Production => "production",
        })
    }
}

impl FromStr for RuntimeEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native" | "native-shell" | "capacitor" => Ok(RuntimeEnvironment::NativeShell),
            "development" | "dev" => Ok(RuntimeEnvironment::Development),
            "production" | "prod" | "browser" => Ok(RuntimeEnvironment::Production),
            other => Err(format!("unknown runtime environment: {}", other)),
        }
    }
}

/// Which concrete strategy a transport implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    NativeHttp,
    DevProxy,
    Direct,
}

/// Raw outcome of one POST: status line and body text, not yet classified.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            status_text: reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("")
                .to_string(),
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one extraction request. Implementations must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    fn kind(&self) -> TransportKind;

    /// URL the request is sent to.
    fn endpoint(&self) -> &str;

    async fn post_json(
        &self,
        request: &ExtractionRequest,
        bearer_token: &str,
    ) -> Result<TransportResponse, TransportError>;
}

/// Pick the transport for `config.runtime`.
pub fn select_transport(config: &ExtractionConfig) -> Result<Arc<dyn Transport>, ConfigError> {
    let transport: Arc<dyn Transport> = match config.runtime {
        RuntimeEnvironment::NativeShell => Arc::new(NativeHttpTransport::new(
            config.api_url.clone(),
            config.native_timeout,
        )?),
        RuntimeEnvironment::Development => Arc::new(DevProxyTransport::new(
            &config.dev_origin,
            &config.proxy_path,
        )),
        RuntimeEnvironment::Production => Arc::new(DirectTransport::new(config.api_url.clone())),
    };
    tracing::debug!(
        runtime = %config.runtime,
        kind = ?transport.kind(),
        url = transport.endpoint(),
        "Selected extraction transport"
    );
    Ok(transport)
}
