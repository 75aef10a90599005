//! # ED-04 Receipt Lifecycle
//!
//! Upload and delete of receipt attachments over the local receipt collection.
//!
//! **Component ID:** 04
//! **Architecture:** Hexagonal (Ports/Adapters)
//!
//! ## Rules
//!
//! | Operation | Store effect | Notification |
//! |-----------|--------------|--------------|
//! | upload, accepted | receipt inserted at the front | `Receipt uploaded successfully!` |
//! | upload, rejected | none | server message or `Failed to upload receipt` |
//! | delete, known id | receipt removed before the backend call | `Receipt deleted successfully!` |
//! | delete, unknown id | none | `Failed to delete receipt` |
//!
//! Accepted files are images and PDFs. Uploads may overlap; `is_uploading`
//! stays true until the last one settles.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use application::ReceiptLifecycleService;
pub use config::ReceiptConfig;
pub use domain::{
    format_file_size, guess_content_type, is_supported_type, messages, ReceiptError, ReceiptFile,
    ReceiptMetadata, ReceiptUpload, FILE_PART, PDF_MIME,
};
pub use ports::{MockReceiptGateway, ReceiptGateway, ReceiptLifecycleApi};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
