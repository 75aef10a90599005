//! # Outbound Ports
//!
//! Traits for external dependencies (the accounting backend).

use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::GatewayError;
use std::sync::Arc;
use tokio::sync::Notify;

use crate::domain::ExpenseDraft;

/// Expense gateway - outbound port.
///
/// `POST expenses` with the validated, trimmed draft as the JSON body; any
/// 2xx is success.
#[async_trait]
pub trait ExpenseGateway: Send + Sync {
    /// Create an expense on the backend.
    async fn create_expense(&self, draft: &ExpenseDraft) -> Result<(), GatewayError>;
}

// =============================================================================
// Mock Implementation for Testing
// =============================================================================

/// Scriptable in-memory expense gateway that records every request body.
#[derive(Default)]
pub struct MockExpenseGateway {
    result: Mutex<Option<GatewayError>>,
    requests: Mutex<Vec<ExpenseDraft>>,
    gate: Mutex<Option<Arc<Notify>>>,
}

impl MockExpenseGateway {
    /// Create a gateway that accepts every expense.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent request fail with `error`.
    pub fn fail_with(&self, error: GatewayError) {
        *self.result.lock() = Some(error);
    }

    /// Make every subsequent request succeed.
    pub fn succeed(&self) {
        *self.result.lock() = None;
    }

    /// Hold every subsequent request until the returned `Notify` is signalled.
    pub fn gate(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.gate.lock() = Some(gate.clone());
        gate
    }

    /// Request bodies received so far.
    pub fn requests(&self) -> Vec<ExpenseDraft> {
        self.requests.lock().clone()
    }

    /// Number of requests received.
    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl ExpenseGateway for MockExpenseGateway {
    async fn create_expense(&self, draft: &ExpenseDraft) -> Result<(), GatewayError> {
        self.requests.lock().push(draft.clone());

        let gate = self.gate.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        match self.result.lock().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
