//! # Dashboard Container
//!
//! Configuration and the container holding every component with its
//! gateways injected.

pub mod config;
pub mod dashboard;

pub use config::{BackendConfig, ConfigError, DeskConfig};
pub use dashboard::{Dashboard, HttpDashboard};
