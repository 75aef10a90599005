//! # Inbound Ports
//!
//! API trait defining what the expense submission component can do.

use async_trait::async_trait;
use shared_types::Expense;

use crate::domain::{ExpenseDraft, SubmissionError};

/// Expense Submission API - inbound port.
#[async_trait]
pub trait ExpenseSubmissionApi: Send + Sync {
    /// Validate and submit the current draft.
    ///
    /// On success returns the record inserted at the front of the local
    /// expense collection.
    ///
    /// # Errors
    /// - `Validation` if a field is invalid (no request is made)
    /// - `InProgress` if a submission is already in flight
    /// - `Gateway` if the backend rejected the request (draft preserved)
    async fn submit(&self) -> Result<Expense, SubmissionError>;

    /// Update one draft field by its form name.
    fn set_field(&self, field: &str, value: &str) -> Result<(), SubmissionError>;

    /// Snapshot of the draft.
    fn draft(&self) -> ExpenseDraft;

    /// Clear every draft field.
    fn reset_draft(&self);

    /// Whether a submission is in flight.
    fn is_submitting(&self) -> bool;
}
