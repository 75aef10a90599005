//! Dashboard summary figures.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Counts and totals shown above the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Accounts synced from the backend.
    pub total_accounts: usize,
    /// Contacts available for expenses.
    pub active_contacts: usize,
    /// Expenses created in this session.
    pub expense_count: usize,
    /// Sum of the amounts of expenses created in this session.
    pub total_amount: Decimal,
    /// Receipts attached in this session.
    pub receipt_count: usize,
}
