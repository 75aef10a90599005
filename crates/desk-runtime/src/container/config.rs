//! # Desk Configuration
//!
//! Runtime configuration read from environment variables, plus the
//! per-component configs.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `DESK_BACKEND_URL` | `http://localhost:8000` |
//! | `DESK_API_PREFIX` | `/api/zoho` |
//! | `DESK_SESSION_COOKIE` | unset |
//! | `DESK_REQUEST_TIMEOUT_SECS` | `10` |
//! | `DESK_NOTIFICATION_MS` | `4000` |
//! | `DESK_RECEIPTS_ENDPOINT` | unset (placeholder receipt gateway) |

use std::env;
use std::time::Duration;

use ed_02_resource_sync::SyncConfig;
use ed_03_expense_submission::SubmissionConfig;
use ed_04_receipt_lifecycle::ReceiptConfig;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric variable did not parse.
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
    },

    /// A URL variable is not http(s).
    #[error("{var} must be an http(s) URL, got {value:?}")]
    InvalidUrl {
        /// Variable name.
        var: &'static str,
        /// Raw value.
        value: String,
    },

    /// The session cookie contains characters not allowed in a header.
    #[error("DESK_SESSION_COOKIE is not a valid header value")]
    InvalidCookie,

    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Accounting backend connection.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Scheme, host and port, e.g. `http://localhost:8000`.
    pub base_url: String,
    /// Path prefix of the accounting API, e.g. `/api/zoho`.
    pub api_prefix: String,
    /// `Cookie` header value for the authenticated session.
    pub session_cookie: Option<String>,
    /// Per-request timeout enforced by the HTTP client.
    pub request_timeout_secs: u64,
    /// Full URL of the receipt upload endpoint, if the backend has one.
    pub receipts_endpoint: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            api_prefix: "/api/zoho".to_string(),
            session_cookie: None,
            request_timeout_secs: 10,
            receipts_endpoint: None,
        }
    }
}

impl BackendConfig {
    /// `base_url` + `api_prefix`, without a trailing slash.
    pub fn api_base(&self) -> String {
        let prefix = self.api_prefix.trim_matches('/');
        let base = self.base_url.trim_end_matches('/');
        if prefix.is_empty() {
            base.to_string()
        } else {
            format!("{}/{}", base, prefix)
        }
    }

    /// Per-request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Complete runtime configuration.
#[derive(Debug, Clone)]
pub struct DeskConfig {
    /// Backend connection.
    pub backend: BackendConfig,
    /// How long a notification stays visible.
    pub notification_ms: u64,
    /// Resource sync configuration.
    pub sync: SyncConfig,
    /// Expense submission configuration.
    pub submission: SubmissionConfig,
    /// Receipt lifecycle configuration.
    pub receipts: ReceiptConfig,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            notification_ms: 4000,
            sync: SyncConfig::default(),
            submission: SubmissionConfig::default(),
            receipts: ReceiptConfig::default(),
        }
    }
}

impl DeskConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Create configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let lookup = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        if let Some(url) = lookup("DESK_BACKEND_URL") {
            config.backend.base_url = http_url("DESK_BACKEND_URL", url)?;
        }
        if let Some(prefix) = lookup("DESK_API_PREFIX") {
            config.backend.api_prefix = prefix;
        }
        config.backend.session_cookie = lookup("DESK_SESSION_COOKIE");
        if let Some(secs) = lookup("DESK_REQUEST_TIMEOUT_SECS") {
            config.backend.request_timeout_secs = positive("DESK_REQUEST_TIMEOUT_SECS", secs)?;
        }
        if let Some(ms) = lookup("DESK_NOTIFICATION_MS") {
            config.notification_ms = positive("DESK_NOTIFICATION_MS", ms)?;
        }
        config.backend.receipts_endpoint = lookup("DESK_RECEIPTS_ENDPOINT")
            .map(|url| http_url("DESK_RECEIPTS_ENDPOINT", url))
            .transpose()?;

        Ok(config)
    }

    /// Notification display duration.
    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_ms)
    }

    /// Create a config for testing (smaller values).
    pub fn for_testing() -> Self {
        Self {
            sync: SyncConfig::for_testing(),
            submission: SubmissionConfig::for_testing(),
            receipts: ReceiptConfig::for_testing(),
            ..Self::default()
        }
    }
}

fn positive(var: &'static str, value: String) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(parsed) if parsed > 0 => Ok(parsed),
        _ => Err(ConfigError::InvalidNumber { var, value }),
    }
}

fn http_url(var: &'static str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Err(ConfigError::InvalidUrl { var, value })
    }
}
