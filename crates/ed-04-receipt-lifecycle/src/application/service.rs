//! # Receipt Lifecycle Service
//!
//! Uploads insert only after the gateway accepts. Deletes are optimistic:
//! the local record goes first and the backend delete is best-effort.

use async_trait::async_trait;
use chrono::Utc;
use ed_01_collection_store::LocalCollectionStore;
use shared_notify::NotificationChannel;
use shared_types::{GatewayError, Receipt};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::ReceiptConfig;
use crate::domain::{messages, ReceiptError, ReceiptFile, ReceiptMetadata, ReceiptUpload};
use crate::ports::{ReceiptGateway, ReceiptLifecycleApi};

/// Counts one in-flight upload for as long as it lives.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::AcqRel);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Receipt Lifecycle Service.
pub struct ReceiptLifecycleService<G: ReceiptGateway> {
    config: ReceiptConfig,
    gateway: Arc<G>,
    store: Arc<LocalCollectionStore>,
    notifications: NotificationChannel,
    uploads_in_flight: AtomicUsize,
}

impl<G: ReceiptGateway> ReceiptLifecycleService<G> {
    /// Create a new receipt lifecycle service.
    pub fn new(
        config: ReceiptConfig,
        gateway: Arc<G>,
        store: Arc<LocalCollectionStore>,
        notifications: NotificationChannel,
    ) -> Self {
        Self {
            config,
            gateway,
            store,
            notifications,
            uploads_in_flight: AtomicUsize::new(0),
        }
    }

    async fn timed<F>(&self, call: F) -> Result<(), GatewayError>
    where
        F: Future<Output = Result<(), GatewayError>>,
    {
        match tokio::time::timeout(self.config.request_timeout(), call).await {
            Ok(result) => result,
            Err(_) => Err(GatewayError::Network(format!(
                "request timed out after {}s",
                self.config.request_timeout_secs
            ))),
        }
    }
}

#[async_trait]
impl<G: ReceiptGateway + 'static> ReceiptLifecycleApi for ReceiptLifecycleService<G> {
    async fn upload(
        &self,
        file: Option<ReceiptFile>,
        metadata: ReceiptMetadata,
    ) -> Result<Receipt, ReceiptError> {
        let file = file.ok_or(ReceiptError::NoFileSelected)?;
        if !file.is_supported() {
            debug!(
                "[ed-04] Rejected {} ({})",
                file.filename, file.content_type
            );
            return Err(ReceiptError::UnsupportedFileType(file.content_type));
        }

        let upload = ReceiptUpload { file, metadata };
        let _in_flight = InFlight::enter(&self.uploads_in_flight);
        info!(
            "[ed-04] Uploading {} ({} bytes)",
            upload.file.filename,
            upload.file.size()
        );

        match self.timed(self.gateway.upload_receipt(&upload)).await {
            Ok(()) => {
                self.notifications.success(messages::RECEIPT_UPLOADED);
                let receipt = upload.to_receipt(Utc::now());
                self.store.receipts().insert_front(receipt.clone());
                Ok(receipt)
            }
            Err(source) => {
                warn!("[ed-04] Upload of {} failed: {}", upload.file.filename, source);
                self.notifications
                    .error(source.user_message(messages::RECEIPT_UPLOAD_FAILED));
                Err(ReceiptError::Gateway(source))
            }
        }
    }

    async fn delete(&self, id: &str) -> Result<Receipt, ReceiptError> {
        let Some(removed) = self.store.receipts().remove_by_id(id) else {
            warn!("[ed-04] Delete of unknown receipt {}", id);
            self.notifications.error(messages::RECEIPT_DELETE_FAILED);
            return Err(ReceiptError::NotFound(id.to_string()));
        };
        self.notifications.success(messages::RECEIPT_DELETED);

        // Not rolled back on failure; the local removal stands.
        if let Err(err) = self.timed(self.gateway.delete_receipt(id)).await {
            warn!("[ed-04] Backend delete of {} failed: {}", id, err);
        }
        Ok(removed)
    }

    fn is_uploading(&self) -> bool {
        self.uploads_in_flight() > 0
    }

    fn uploads_in_flight(&self) -> usize {
        self.uploads_in_flight.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockReceiptGateway;
    use shared_notify::NotificationKind;

    struct Harness {
        service: Arc<ReceiptLifecycleService<MockReceiptGateway>>,
        gateway: Arc<MockReceiptGateway>,
        store: Arc<LocalCollectionStore>,
        notifications: NotificationChannel,
    }

    fn harness() -> Harness {
        let gateway = Arc::new(MockReceiptGateway::new());
        let store = Arc::new(LocalCollectionStore::new());
        let notifications = NotificationChannel::new();
        let service = Arc::new(ReceiptLifecycleService::new(
            ReceiptConfig::for_testing(),
            gateway.clone(),
            store.clone(),
            notifications.clone(),
        ));
        Harness {
            service,
            gateway,
            store,
            notifications,
        }
    }

    fn metadata() -> ReceiptMetadata {
        ReceiptMetadata {
            description: "Hotel".to_string(),
            amount: "220.00".to_string(),
            category: "Lodging".to_string(),
        }
    }

    fn receipt(id: &str, filename: &str) -> Receipt {
        Receipt {
            id: id.to_string(),
            filename: filename.to_string(),
            description: None,
            file_size: None,
            upload_date: Utc::now(),
            file_type: None,
        }
    }

    #[tokio::test]
    async fn test_upload_inserts_at_front() {
        let h = harness();
        h.store.receipts().insert_front(receipt("r-old", "old.png"));

        let created = h
            .service
            .upload(Some(ReceiptFile::new("hotel.pdf", vec![7; 300])), metadata())
            .await
            .unwrap();

        let receipts = h.store.receipts().snapshot();
        assert_eq!(receipts.len(), 2);
        assert_eq!(receipts[0], created);
        assert_eq!(created.file_size, Some(300));
        assert_eq!(
            h.notifications.current().unwrap().message,
            "Receipt uploaded successfully!"
        );

        let sent = h.gateway.uploads();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].metadata, metadata());
        assert!(!h.service.is_uploading());
    }

    #[tokio::test]
    async fn test_upload_without_file() {
        let h = harness();
        let err = h.service.upload(None, metadata()).await.unwrap_err();
        assert_eq!(err, ReceiptError::NoFileSelected);
        assert!(err.is_local());
        assert!(h.gateway.uploads().is_empty());
    }

    #[tokio::test]
    async fn test_upload_rejects_unsupported_type() {
        let h = harness();
        let err = h
            .service
            .upload(Some(ReceiptFile::new("notes.txt", vec![1])), metadata())
            .await
            .unwrap_err();
        assert!(matches!(err, ReceiptError::UnsupportedFileType(_)));
        assert!(h.gateway.uploads().is_empty());
        assert!(h.store.receipts().is_empty());
    }

    #[tokio::test]
    async fn test_failed_upload_leaves_store_untouched() {
        let h = harness();
        h.gateway.fail_uploads(GatewayError::status(413));

        let err = h
            .service
            .upload(Some(ReceiptFile::new("scan.png", vec![1; 10])), metadata())
            .await
            .unwrap_err();

        assert!(matches!(err, ReceiptError::Gateway(_)));
        assert!(h.store.receipts().is_empty());
        let shown = h.notifications.current().unwrap();
        assert_eq!(shown.kind, NotificationKind::Error);
        assert_eq!(shown.message, "Failed to upload receipt");
        assert!(!h.service.is_uploading());
    }

    #[tokio::test]
    async fn test_overlapping_uploads_are_counted() {
        let h = harness();
        let gate = h.gateway.gate_uploads();

        let mut tasks = Vec::new();
        for name in ["a.png", "b.png"] {
            let service = h.service.clone();
            tasks.push(tokio::spawn(async move {
                service
                    .upload(Some(ReceiptFile::new(name, vec![1])), ReceiptMetadata::default())
                    .await
            }));
        }
        for _ in 0..100 {
            if h.service.uploads_in_flight() == 2 {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(h.service.uploads_in_flight(), 2);

        gate.notify_waiters();
        for task in tasks {
            task.await.unwrap().unwrap();
        }
        assert!(!h.service.is_uploading());
        assert_eq!(h.store.receipts().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_removes_only_matching_id() {
        let h = harness();
        h.store.receipts().insert_front(receipt("r1", "lunch.jpg"));
        h.store.receipts().insert_front(receipt("r2", "lunch.jpg"));
        h.store.receipts().insert_front(receipt("r3", "taxi.jpg"));

        let removed = h.service.delete("r2").await.unwrap();

        assert_eq!(removed.id, "r2");
        let ids: Vec<_> = h
            .store
            .receipts()
            .snapshot()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["r3", "r1"]);
        assert_eq!(
            h.notifications.current().unwrap().message,
            "Receipt deleted successfully!"
        );
        assert_eq!(h.gateway.deletes(), vec!["r2".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_stays_local_when_backend_fails() {
        let h = harness();
        h.gateway.fail_deletes(GatewayError::status(500));
        h.store.receipts().insert_front(receipt("r1", "lunch.jpg"));

        assert!(h.service.delete("r1").await.is_ok());
        assert!(h.store.receipts().is_empty());
        assert_eq!(
            h.notifications.current().unwrap().kind,
            NotificationKind::Success
        );
    }

    #[tokio::test]
    async fn test_delete_unknown_id() {
        let h = harness();
        h.store.receipts().insert_front(receipt("r1", "lunch.jpg"));

        let err = h.service.delete("missing").await.unwrap_err();

        assert_eq!(err, ReceiptError::NotFound("missing".to_string()));
        assert_eq!(h.store.receipts().len(), 1);
        assert_eq!(
            h.notifications.current().unwrap().message,
            "Failed to delete receipt"
        );
        assert!(h.gateway.deletes().is_empty());
    }
}
