//! # Receipt Lifecycle Configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Receipt lifecycle configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReceiptConfig {
    /// Upper bound for an upload or delete request, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 60,
        }
    }
}

impl ReceiptConfig {
    /// Create a config for testing (smaller values).
    pub fn for_testing() -> Self {
        Self {
            request_timeout_secs: 2,
        }
    }

    /// The request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
