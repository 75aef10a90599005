//! # Domain Module
//!
//! Core domain types for Resource Sync.

pub mod entities;
pub mod errors;
pub mod messages;

pub use entities::*;
pub use errors::*;
