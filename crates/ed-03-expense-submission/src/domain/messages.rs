//! User-facing notification texts.

/// Posted after the backend accepted the expense.
pub const EXPENSE_CREATED: &str = "Expense created successfully!";

/// Posted when the backend rejected the expense without a message.
pub const EXPENSE_FAILED: &str = "Failed to create expense";
