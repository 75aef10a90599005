//! Prometheus metrics for Expense-Desk.
//!
//! All metrics follow the naming convention: `desk_<subject>_total`, with
//! an `outcome` label of `success`, `failure` or `rejected`.

use lazy_static::lazy_static;
use prometheus::{CounterVec, Encoder, Opts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Metrics registry for this process
    pub static ref REGISTRY: Registry = Registry::new();

    /// Sync runs by resource and outcome
    pub static ref SYNC_RUNS: CounterVec = CounterVec::new(
        Opts::new("desk_sync_runs_total", "Resource sync runs by resource and outcome"),
        &["resource", "outcome"]
    ).expect("metric creation failed");

    /// Expense submissions by outcome
    pub static ref EXPENSE_SUBMISSIONS: CounterVec = CounterVec::new(
        Opts::new("desk_expense_submissions_total", "Expense submissions by outcome"),
        &["outcome"]
    ).expect("metric creation failed");

    /// Receipt operations by operation (upload/delete) and outcome
    pub static ref RECEIPT_OPERATIONS: CounterVec = CounterVec::new(
        Opts::new("desk_receipt_operations_total", "Receipt uploads and deletes by outcome"),
        &["operation", "outcome"]
    ).expect("metric creation failed");

    /// Notifications posted by kind
    pub static ref NOTIFICATIONS: CounterVec = CounterVec::new(
        Opts::new("desk_notifications_total", "Notifications posted by kind"),
        &["kind"]
    ).expect("metric creation failed");
}

/// Register all metrics with the registry. Safe to call more than once.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(SYNC_RUNS.clone()),
        Box::new(EXPENSE_SUBMISSIONS.clone()),
        Box::new(RECEIPT_OPERATIONS.clone()),
        Box::new(NOTIFICATIONS.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }
    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn gather_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Count one sync run.
pub fn record_sync(resource: &str, outcome: &str) {
    SYNC_RUNS.with_label_values(&[resource, outcome]).inc();
}

/// Count one expense submission.
pub fn record_expense(outcome: &str) {
    EXPENSE_SUBMISSIONS.with_label_values(&[outcome]).inc();
}

/// Count one receipt operation.
pub fn record_receipt(operation: &str, outcome: &str) {
    RECEIPT_OPERATIONS.with_label_values(&[operation, outcome]).inc();
}

/// Count one notification.
pub fn record_notification(kind: &str) {
    NOTIFICATIONS.with_label_values(&[kind]).inc();
}
