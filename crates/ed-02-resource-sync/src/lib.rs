//! # ED-02 Resource Sync
//!
//! Drives the two-step remote synchronization of each named resource.
//!
//! **Component ID:** 02
//! **Architecture:** Hexagonal (Ports/Adapters)
//!
//! ## Purpose
//!
//! For each resource (`chart_of_accounts`, `contacts`, `receipts`):
//! 1. ask the backend to refresh its copy from the accounting service,
//! 2. refetch the canonical collection,
//! 3. replace the local collection wholesale.
//!
//! ## Guarantees
//!
//! | Guarantee | Mechanism |
//! |-----------|-----------|
//! | One in-flight sync per resource | busy guard, second call rejected with `InProgress` |
//! | Busy flag always released | RAII `BusyGuard`, released on drop (including cancellation) |
//! | Stale-but-available on fetch failure | the store is only touched after a successful fetch |
//! | No stale overwrite | per-resource fetch sequence numbers; older results are discarded |
//! | Independent resources | guards are per key, different keys run concurrently |
//!
//! ## Module Structure
//!
//! ```text
//! ed-02-resource-sync/
//! ├── domain/          # SyncState, SyncReport, RemoteCollection, errors, messages
//! ├── ports/           # ResourceSyncApi (inbound) + SyncGateway (outbound)
//! ├── application/     # ResourceSyncService, BusyGuard
//! └── config.rs        # SyncConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use application::{BusyGuard, ResourceSyncService};
pub use config::SyncConfig;
pub use domain::{messages, RemoteCollection, SyncAck, SyncError, SyncReport, SyncState};
pub use ports::{MockSyncGateway, ResourceSyncApi, SyncGateway};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
