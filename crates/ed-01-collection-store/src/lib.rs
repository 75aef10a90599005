//! # ED-01 Local Collection Store
//!
//! In-memory, ordered collections for everything the dashboard displays.
//!
//! **Component ID:** 01
//! **Architecture:** Plain library, no ports (purely local state)
//!
//! ## Purpose
//!
//! The store exclusively owns the four dashboard collections. Controllers
//! mutate them through three operations and readers only ever receive
//! snapshots:
//!
//! | Operation | Used by | Semantics |
//! |-----------|---------|-----------|
//! | `replace_all` | sync refetch | atomic full replace, order preserved |
//! | `insert_front` | optimistic create | newest first |
//! | `remove_by_id` | optimistic delete | removes exactly one id |
//!
//! ## Module Structure
//!
//! ```text
//! ed-01-collection-store/
//! ├── collection.rs   # Collection<T>: one lock-protected ordered list
//! ├── store.rs        # LocalCollectionStore: the four collections + pickers
//! ├── search.rs       # Case-insensitive search over displayed fields
//! └── stats.rs        # Dashboard summary figures
//! ```

#![warn(clippy::all)]

pub mod collection;
pub mod search;
pub mod stats;
pub mod store;

pub use collection::Collection;
pub use search::Searchable;
pub use stats::DashboardStats;
pub use store::LocalCollectionStore;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
