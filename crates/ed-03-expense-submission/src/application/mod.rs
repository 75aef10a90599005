//! # Application Layer
//!
//! Service orchestrating validation, submission and the optimistic insert.

pub mod service;

pub use service::ExpenseSubmissionService;
