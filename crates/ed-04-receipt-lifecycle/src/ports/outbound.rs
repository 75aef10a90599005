//! # Outbound Ports
//!
//! Traits for external dependencies (receipt storage backend).

use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::GatewayError;
use std::sync::Arc;
use tokio::sync::Notify;

use crate::domain::ReceiptUpload;

/// Receipt gateway - outbound port.
#[async_trait]
pub trait ReceiptGateway: Send + Sync {
    /// Send the multipart upload.
    async fn upload_receipt(&self, upload: &ReceiptUpload) -> Result<(), GatewayError>;

    /// Delete a receipt on the backend.
    async fn delete_receipt(&self, id: &str) -> Result<(), GatewayError>;
}

// =============================================================================
// Mock Implementation for Testing
// =============================================================================

/// Scriptable in-memory receipt gateway.
#[derive(Default)]
pub struct MockReceiptGateway {
    upload_error: Mutex<Option<GatewayError>>,
    delete_error: Mutex<Option<GatewayError>>,
    uploads: Mutex<Vec<ReceiptUpload>>,
    deletes: Mutex<Vec<String>>,
    upload_gate: Mutex<Option<Arc<Notify>>>,
}

impl MockReceiptGateway {
    /// Create a gateway that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent upload fail with `error`.
    pub fn fail_uploads(&self, error: GatewayError) {
        *self.upload_error.lock() = Some(error);
    }

    /// Make every subsequent delete fail with `error`.
    pub fn fail_deletes(&self, error: GatewayError) {
        *self.delete_error.lock() = Some(error);
    }

    /// Hold every subsequent upload until the returned `Notify` is signalled.
    pub fn gate_uploads(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.upload_gate.lock() = Some(gate.clone());
        gate
    }

    /// Uploads received so far.
    pub fn uploads(&self) -> Vec<ReceiptUpload> {
        self.uploads.lock().clone()
    }

    /// Ids of deletes received so far.
    pub fn deletes(&self) -> Vec<String> {
        self.deletes.lock().clone()
    }
}

#[async_trait]
impl ReceiptGateway for MockReceiptGateway {
    async fn upload_receipt(&self, upload: &ReceiptUpload) -> Result<(), GatewayError> {
        self.uploads.lock().push(upload.clone());

        let gate = self.upload_gate.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        match self.upload_error.lock().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    async fn delete_receipt(&self, id: &str) -> Result<(), GatewayError> {
        self.deletes.lock().push(id.to_string());
        match self.delete_error.lock().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
