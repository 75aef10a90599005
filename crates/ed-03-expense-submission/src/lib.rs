//! # ED-03 Expense Submission
//!
//! Validates and submits a new expense, then inserts it optimistically.
//!
//! **Component ID:** 03
//! **Architecture:** Hexagonal (Ports/Adapters)
//!
//! ## Submission Flow
//!
//! ```text
//! set_field(..) ──→ ExpenseDraft
//!                      │
//!                 submit()
//!                      │
//!            validate (local, no I/O) ──✗──→ ValidationError
//!                      │
//!            in-progress flag ──taken──→ InProgress
//!                      │
//!            ExpenseGateway::create_expense
//!               │                  │
//!            success            failure
//!               │                  │
//!   notify + reset draft    notify server message
//!   + insert_front(local)    (draft preserved)
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! ed-03-expense-submission/
//! ├── domain/          # ExpenseDraft, DraftField, validation, errors
//! ├── ports/           # ExpenseSubmissionApi (inbound) + ExpenseGateway (outbound)
//! ├── application/     # ExpenseSubmissionService
//! └── config.rs        # SubmissionConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use application::ExpenseSubmissionService;
pub use config::SubmissionConfig;
pub use domain::{
    messages, validate, DraftField, ExpenseDraft, FieldError, SubmissionError, ValidatedExpense,
    ValidationError,
};
pub use ports::{ExpenseGateway, ExpenseSubmissionApi, MockExpenseGateway};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
