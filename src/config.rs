use secrecy::{ExposeSecret, SecretBox};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::transport::RuntimeEnvironment;

pub const DEFAULT_API_URL: &str = "https://api.tixappeal.com/extract_ticket";
pub const DEFAULT_PROXY_PATH: &str = "/api/extract_ticket";
pub const DEFAULT_DEV_ORIGIN: &str = "http://localhost:8080";
/// Bound on the native bridge; mobile networks can hang indefinitely otherwise.
pub const NATIVE_TIMEOUT: Duration = Duration::from_secs(8);

const API_KEY_VARS: &[&str] = &["TIXAPP_API_KEY", "VITE_CURRENT_CUSTOM_API_KEY"];
const RUNTIME_VAR: &str = "TIXAPP_RUNTIME";
const API_URL_VAR: &str = "TIXAPP_API_URL";
const DEV_ORIGIN_VAR: &str = "TIXAPP_DEV_ORIGIN";

/// Bearer token for the extraction backend. Never printed.
pub struct ApiKey(SecretBox<str>);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// Only call this when building the Authorization header.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for ApiKey {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<&str> for ApiKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ApiKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Everything the extraction client needs, passed explicitly at construction.
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    pub api_key: Option<ApiKey>,
    pub runtime: RuntimeEnvironment,
    pub api_url: String,
    pub dev_origin: String,
    pub proxy_path: String,
    pub native_timeout: Duration,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            runtime: RuntimeEnvironment::Production,
            api_url: DEFAULT_API_URL.to_string(),
            dev_origin: DEFAULT_DEV_ORIGIN.to_string(),
            proxy_path: DEFAULT_PROXY_PATH.to_string(),
            native_timeout: NATIVE_TIMEOUT,
        }
    }
}

impl ExtractionConfig {
    pub fn new(api_key: impl Into<ApiKey>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    pub fn with_runtime(mut self, runtime: RuntimeEnvironment) -> Self {
        self.runtime = runtime;
        self
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_dev_origin(mut self, origin: impl Into<String>) -> Self {
        self.dev_origin = origin.into();
        self
    }

    pub fn with_native_timeout(mut self, timeout: Duration) -> Self {
        self.native_timeout = timeout;
        self
    }

    /// Load `.env` from the working directory (if any), then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        env_file_loaded(dotenvy::dotenv(), Path::new(".env"))?;
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env), but `<dir>/.env` takes priority so
    /// installed builds can keep credentials in the app data folder.
    pub fn from_app_data_dir(dir: &Path) -> Result<Self, ConfigError> {
        let env_path = dir.join(".env");
        env_file_loaded(dotenvy::from_path(&env_path), &env_path)?;
        Self::from_env()
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self {
            api_key: API_KEY_VARS.iter().find_map(|name| get(*name)).map(ApiKey::new),
            ..Default::default()
        };

        if let Some(runtime) = get(RUNTIME_VAR) {
            config.runtime = runtime.parse().map_err(|_| ConfigError::InvalidValue {
                name: RUNTIME_VAR,
                value: runtime,
            })?;
        }
        if let Some(url) = get(API_URL_VAR) {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidValue {
                    name: API_URL_VAR,
                    value: url,
                });
            }
            config.api_url = url;
        }
        if let Some(origin) = get(DEV_ORIGIN_VAR) {
            config.dev_origin = origin.trim_end_matches('/').to_string();
        }

        if config.api_key.is_none() {
            tracing::error!("TIXAPP_API_KEY not found in environment");
        }
        tracing::debug!(
            has_api_key = config.api_key.is_some(),
            runtime = %config.runtime,
            "Extraction config loaded"
        );
        Ok(config)
    }
}

/// A missing `.env` is fine; one that exists but cannot be read or parsed is not.
fn env_file_loaded<T>(result: Result<T, dotenvy::Error>, path: &Path) -> Result<bool, ConfigError> {
    match result {
        Ok(_) => Ok(true),
        Err(err) if err.not_found() => Ok(false),
        Err(source) => Err(ConfigError::EnvFile {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Per-user data folder for installed builds (`<data dir>/ticket-scanner`).
pub fn default_app_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("ticket-scanner"))
}
