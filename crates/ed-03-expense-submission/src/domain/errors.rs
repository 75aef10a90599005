//! # Domain Errors
//!
//! Error types for Expense Submission.

use shared_types::GatewayError;
use std::fmt;
use thiserror::Error;

use super::draft::DraftField;

/// One failing draft field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The offending field.
    pub field: DraftField,
    /// Why it was rejected.
    pub reason: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.reason)
    }
}

/// Local validation failure; never reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid expense: {}", summary(.errors))]
pub struct ValidationError {
    /// Every failing field, in wire order.
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Whether `field` is among the failures.
    pub fn mentions(&self, field: DraftField) -> bool {
        self.errors.iter().any(|error| error.field == field)
    }
}

fn summary(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Expense submission error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// The draft failed local validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A submission is already in flight.
    #[error("An expense submission is already in progress")]
    InProgress,

    /// No draft field has this name.
    #[error("Unknown draft field: {0}")]
    UnknownField(String),

    /// The backend rejected the create request, or it never completed.
    #[error("Create expense failed: {0}")]
    Gateway(#[from] GatewayError),
}
