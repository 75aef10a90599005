//! # Error Types
//!
//! Defines the error taxonomy every outbound gateway reports through.
//! Local conditions (validation, busy guards) live with the component that
//! raises them.

use thiserror::Error;

/// Failure of a request against the accounting backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The backend answered with a non-2xx status.
    #[error("Remote error (status {status}): {}", .message.as_deref().unwrap_or("no message"))]
    Remote {
        /// HTTP status code.
        status: u16,
        /// The `error` field of the response body, if any.
        message: Option<String>,
    },

    /// The request could not complete (connect, timeout, reset).
    #[error("Network failure: {0}")]
    Network(String),

    /// A 2xx response whose body did not have the expected shape.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl GatewayError {
    /// Remote error without a server message.
    pub fn status(status: u16) -> Self {
        GatewayError::Remote {
            status,
            message: None,
        }
    }

    /// Remote error carrying the server's message.
    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        GatewayError::Remote {
            status,
            message: Some(message.into()),
        }
    }

    /// The server-supplied message, when the backend provided a non-blank one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            GatewayError::Remote {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }

    /// Message to show the user: the server's words verbatim, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message()
            .map(str::to_owned)
            .unwrap_or_else(|| fallback.to_string())
    }
}
