//! # Ports Layer
//!
//! Inbound API and outbound backend contract for expense submission.

pub mod inbound;
pub mod outbound;

pub use inbound::ExpenseSubmissionApi;
pub use outbound::{ExpenseGateway, MockExpenseGateway};
