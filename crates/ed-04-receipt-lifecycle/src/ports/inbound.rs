//! # Inbound Ports
//!
//! API trait defining what the receipt lifecycle component can do.

use async_trait::async_trait;
use shared_types::Receipt;

use crate::domain::{ReceiptError, ReceiptFile, ReceiptMetadata};

/// Receipt Lifecycle API - inbound port.
#[async_trait]
pub trait ReceiptLifecycleApi: Send + Sync {
    /// Upload `file` with its metadata and insert the receipt locally.
    ///
    /// # Errors
    /// - `NoFileSelected` if `file` is `None`
    /// - `UnsupportedFileType` if the file is neither an image nor a PDF
    /// - `Gateway` if the upload failed (the store is untouched)
    async fn upload(
        &self,
        file: Option<ReceiptFile>,
        metadata: ReceiptMetadata,
    ) -> Result<Receipt, ReceiptError>;

    /// Remove the receipt with `id` locally, then ask the backend to delete it.
    ///
    /// # Errors
    /// - `NotFound` if no local receipt has this id
    async fn delete(&self, id: &str) -> Result<Receipt, ReceiptError>;

    /// Whether any upload is in flight.
    fn is_uploading(&self) -> bool;

    /// Number of uploads in flight.
    fn uploads_in_flight(&self) -> usize;
}
