//! # Application Layer
//!
//! Service orchestrating sync cycles and the busy guard that serializes them.

pub mod guard;
pub mod service;

pub use guard::BusyGuard;
pub use service::ResourceSyncService;
