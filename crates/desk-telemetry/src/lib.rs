//! # Desk Telemetry
//!
//! Logging and metrics for Expense-Desk.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use desk_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_telemetry(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `expense-desk` | Service name in logs |
//! | `DESK_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `DESK_JSON_LOGS` | `false` | JSON lines instead of plain text |

#![warn(missing_docs)]

mod config;
mod logging;
mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{
    gather_metrics, record_expense, record_notification, record_receipt, record_sync,
    register_metrics, EXPENSE_SUBMISSIONS, NOTIFICATIONS, RECEIPT_OPERATIONS, REGISTRY, SYNC_RUNS,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The global subscriber could not be installed.
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    /// A metric could not be registered or encoded.
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Register metrics, then install the log subscriber.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    register_metrics()?;
    init_logging(config)
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_inc_macro() {
        metric_inc!(NOTIFICATIONS, &["info"]);
        assert!(NOTIFICATIONS.with_label_values(&["info"]).get() >= 1.0);
    }
}
