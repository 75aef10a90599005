//! # Expense Submission Configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Expense submission configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubmissionConfig {
    /// Upper bound for the create request, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
        }
    }
}

impl SubmissionConfig {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        assert_eq!(
            SubmissionConfig::default().request_timeout(),
            Duration::from_secs(30)
        );
    }
}
