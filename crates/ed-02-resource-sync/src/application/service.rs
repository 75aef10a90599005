//! # Resource Sync Service
//!
//! Application service orchestrating trigger, refetch and local replace.

use async_trait::async_trait;
use chrono::Utc;
use ed_01_collection_store::LocalCollectionStore;
use parking_lot::Mutex;
use shared_notify::NotificationChannel;
use shared_types::{GatewayError, ResourceKey};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::guard::{BusyGuard, SlotTable};
use crate::config::SyncConfig;
use crate::domain::{messages, RemoteCollection, SyncError, SyncReport, SyncState};
use crate::ports::{ResourceSyncApi, SyncGateway};

/// Resource Sync Service - one busy guard and one fetch sequence per resource.
pub struct ResourceSyncService<G: SyncGateway> {
    /// Configuration.
    config: SyncConfig,
    /// Backend collaborator.
    gateway: Arc<G>,
    /// Local collections (replaced on successful fetch).
    store: Arc<LocalCollectionStore>,
    /// User feedback.
    notifications: NotificationChannel,
    /// Busy flags, last sync times and fetch sequence numbers.
    slots: SlotTable,
}

impl<G: SyncGateway> ResourceSyncService<G> {
    /// Create a new resource sync service.
    pub fn new(
        config: SyncConfig,
        gateway: Arc<G>,
        store: Arc<LocalCollectionStore>,
        notifications: NotificationChannel,
    ) -> Self {
        let slots: HashMap<_, _> = ResourceKey::ALL
            .iter()
            .map(|resource| (*resource, Default::default()))
            .collect();

        Self {
            config,
            gateway,
            store,
            notifications,
            slots: Arc::new(Mutex::new(slots)),
        }
    }

    /// Internal: bound a gateway call by the configured timeout.
    async fn timed<T, F>(&self, call: F) -> Result<T, GatewayError>
    where
        F: Future<Output = Result<T, GatewayError>>,
    {
        match tokio::time::timeout(self.config.operation_timeout(), call).await {
            Ok(result) => result,
            Err(_) => Err(GatewayError::Network(format!(
                "request timed out after {}s",
                self.config.operation_timeout_secs
            ))),
        }
    }

    /// Internal: hand out the next fetch sequence number for `resource`.
    fn begin_fetch(&self, resource: ResourceKey) -> u64 {
        let mut slots = self.slots.lock();
        let slot = slots.entry(resource).or_default();
        slot.fetch_issued += 1;
        slot.fetch_issued
    }

    /// Internal: apply a fetched collection unless a newer fetch already won.
    ///
    /// Returns whether the store was replaced.
    fn apply_fetched(
        &self,
        resource: ResourceKey,
        seq: u64,
        collection: RemoteCollection,
    ) -> Result<bool, GatewayError> {
        if !collection.fits(resource) {
            return Err(GatewayError::Malformed(format!(
                "expected {} collection, gateway returned {}",
                resource,
                collection.kind()
            )));
        }
        if collection == RemoteCollection::Unchanged {
            return Ok(false);
        }

        // Held across the replace so the sequence check and the write are atomic.
        let mut slots = self.slots.lock();
        let slot = slots.entry(resource).or_default();
        if seq <= slot.fetch_applied {
            warn!(
                "[ed-02] Discarding stale {} fetch #{} (already applied #{})",
                resource, seq, slot.fetch_applied
            );
            return Ok(false);
        }
        slot.fetch_applied = seq;

        match collection {
            RemoteCollection::Accounts(items) => self.store.accounts().replace_all(items),
            RemoteCollection::Contacts(items) => self.store.contacts().replace_all(items),
            RemoteCollection::Receipts(items) => self.store.receipts().replace_all(items),
            RemoteCollection::Unchanged => {}
        }
        Ok(true)
    }

    /// Internal: size of the local collection backing `resource`.
    fn local_len(&self, resource: ResourceKey) -> usize {
        match resource {
            ResourceKey::ChartOfAccounts => self.store.accounts().len(),
            ResourceKey::Contacts => self.store.contacts().len(),
            ResourceKey::Receipts => self.store.receipts().len(),
        }
    }

    /// Internal: fetch and apply; on failure post the error and keep the cache.
    async fn fetch_and_apply(&self, resource: ResourceKey) -> Result<SyncReport, SyncError> {
        let seq = self.begin_fetch(resource);
        let outcome = self
            .timed(self.gateway.fetch_collection(resource))
            .await
            .and_then(|collection| self.apply_fetched(resource, seq, collection));

        match outcome {
            Ok(applied) => {
                let item_count = self.local_len(resource);
                debug!(
                    "[ed-02] Fetch #{} for {} done ({} items, applied={})",
                    seq, resource, item_count, applied
                );
                Ok(SyncReport {
                    resource,
                    item_count,
                    applied,
                    message: None,
                })
            }
            Err(source) => {
                warn!("[ed-02] Fetch #{} for {} failed: {}", seq, resource, source);
                self.notifications
                    .error(source.user_message(&messages::fetch_failed(resource)));
                Err(SyncError::Fetch { resource, source })
            }
        }
    }
}

#[async_trait]
impl<G: SyncGateway + 'static> ResourceSyncApi for ResourceSyncService<G> {
    async fn sync(&self, resource: ResourceKey) -> Result<SyncReport, SyncError> {
        let Some(guard) = BusyGuard::try_acquire(&self.slots, resource) else {
            debug!("[ed-02] Sync of {} rejected, already in flight", resource);
            return Err(SyncError::InProgress(resource));
        };

        info!("[ed-02] Sync started for {}", resource);
        self.notifications.info(messages::syncing(resource));

        let ack = match self.timed(self.gateway.trigger_sync(resource)).await {
            Ok(ack) => ack,
            Err(source) => {
                warn!("[ed-02] Sync trigger for {} failed: {}", resource, source);
                self.notifications
                    .error(source.user_message(&messages::sync_failed(resource)));
                return Err(SyncError::Trigger { resource, source });
            }
        };

        let report = self.fetch_and_apply(resource).await?;
        guard.mark_synced(Utc::now());

        let message = ack
            .message
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| messages::synced(resource));
        self.notifications.success(message.clone());
        info!(
            "[ed-02] Sync of {} complete ({} items)",
            resource, report.item_count
        );

        Ok(SyncReport {
            message: Some(message),
            ..report
        })
    }

    async fn refresh(&self, resource: ResourceKey) -> Result<SyncReport, SyncError> {
        self.fetch_and_apply(resource).await
    }

    fn is_busy(&self, resource: ResourceKey) -> bool {
        self.slots
            .lock()
            .get(&resource)
            .map(|slot| slot.busy)
            .unwrap_or(false)
    }

    fn sync_state(&self, resource: ResourceKey) -> SyncState {
        let slots = self.slots.lock();
        match slots.get(&resource) {
            Some(slot) => SyncState {
                resource,
                busy: slot.busy,
                last_synced_at: slot.last_synced_at,
            },
            None => SyncState::idle(resource),
        }
    }
}
