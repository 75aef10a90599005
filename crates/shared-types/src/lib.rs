//! # Shared Types Crate
//!
//! This crate contains the domain entities held by the dashboard, the
//! resource keys that name each synchronized collection, and the error
//! taxonomy every gateway adapter reports through.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-component types are defined here.
//! - **Wire Fidelity**: Entities deserialize directly from the accounting
//!   backend's payloads (`account_id`, `contact_name`, ...).
//! - **Snapshots, not sharing**: Entities are plain `Clone` values; readers
//!   always receive copies, never references into a store.

pub mod entities;
pub mod errors;
pub mod ids;
pub mod parse;

pub use entities::*;
pub use errors::*;
pub use ids::{is_local_id, local_id, LOCAL_ID_PREFIX};
pub use parse::{max_amount, parse_amount, parse_date, DATE_FORMAT};
