//! # Desk Runtime Library
//!
//! Wires the dashboard components to the accounting backend. The `desk`
//! binary in `main.rs` is a thin command-line front end over [`Dashboard`].
//!
//! ## Modules
//!
//! - `adapters/` - HTTP and receipt gateways implementing the component ports
//! - `container/` - Configuration and the [`Dashboard`] container

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod container;

pub use adapters::{HttpBackend, HttpReceipts, PlaceholderReceipts, ReceiptBackend};
pub use container::{BackendConfig, ConfigError, Dashboard, DeskConfig, HttpDashboard};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
