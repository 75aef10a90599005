//! Response bodies of the accounting backend and error mapping.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use shared_types::{Account, Contact, GatewayError};

/// `{message}` returned by the sync triggers.
#[derive(Debug, Default, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// `{error}` returned with non-2xx statuses.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// `{chartofaccounts: [...]}`. A missing or null array means empty.
#[derive(Debug, Default, Deserialize)]
pub struct AccountsBody {
    #[serde(default)]
    pub chartofaccounts: Option<Vec<Account>>,
}

/// `{contacts: [...]}`. A missing or null array means empty.
#[derive(Debug, Default, Deserialize)]
pub struct ContactsBody {
    #[serde(default)]
    pub contacts: Option<Vec<Contact>>,
}

/// Parse a 2xx body.
pub fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, GatewayError> {
    serde_json::from_str(body).map_err(|e| GatewayError::Malformed(e.to_string()))
}

/// Parse a 2xx body that may legitimately be empty.
pub fn parse_optional_body<T: DeserializeOwned + Default>(body: &str) -> Result<T, GatewayError> {
    if body.trim().is_empty() {
        return Ok(T::default());
    }
    parse_body(body)
}

/// Map a non-2xx response to a remote error, keeping the `error` field.
pub fn remote_error(status: u16, body: &str) -> GatewayError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.error);
    GatewayError::Remote { status, message }
}

/// Map a transport failure.
pub fn transport_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Network(format!("request timed out: {}", err))
    } else if err.is_connect() {
        GatewayError::Network(format!("cannot connect: {}", err))
    } else if err.is_decode() {
        GatewayError::Malformed(err.to_string())
    } else {
        GatewayError::Network(err.to_string())
    }
}
