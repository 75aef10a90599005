//! # Resource Sync Configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Resource sync configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Upper bound for each gateway call (trigger or fetch), in seconds.
    ///
    /// A call that exceeds it is treated as a network failure, which also
    /// releases the busy guard.
    pub operation_timeout_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            operation_timeout_secs: 30,
        }
    }
}

impl SyncConfig {
    /// Create a config for testing (smaller values).
    pub fn for_testing() -> Self {
        Self {
            operation_timeout_secs: 2,
        }
    }

    /// The per-call timeout as a `Duration`.
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_secs(self.operation_timeout_secs)
    }
}
