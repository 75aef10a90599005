//! # Domain Errors
//!
//! Error types for Receipt Lifecycle.

use shared_types::GatewayError;
use thiserror::Error;

/// Receipt lifecycle error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReceiptError {
    /// Upload was requested without a file.
    #[error("No file selected")]
    NoFileSelected,

    /// The file is neither an image nor a PDF.
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    /// No local receipt has this id.
    #[error("Receipt not found: {0}")]
    NotFound(String),

    /// The backend rejected the request, or it never completed.
    #[error("Receipt request failed: {0}")]
    Gateway(#[from] GatewayError),
}

impl ReceiptError {
    /// Whether the error was raised before any request was made.
    pub fn is_local(&self) -> bool {
        !matches!(self, ReceiptError::Gateway(_))
    }
}
