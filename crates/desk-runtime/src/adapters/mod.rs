//! # Adapters
//!
//! Outbound port implementations connecting the components to the backend.

pub mod http_backend;
pub mod receipts;
mod wire;

pub use http_backend::HttpBackend;
pub use receipts::{HttpReceipts, PlaceholderReceipts, ReceiptBackend};
