//! # Inbound Ports
//!
//! API trait defining what the resource sync component can do.

use async_trait::async_trait;
use shared_types::ResourceKey;

use crate::domain::{SyncError, SyncReport, SyncState};

/// Resource Sync API - inbound port.
#[async_trait]
pub trait ResourceSyncApi: Send + Sync {
    /// Trigger a remote sync of `resource`, then refetch and replace the
    /// local collection.
    ///
    /// # Errors
    /// - `InProgress` if a sync of the same resource is in flight
    /// - `Trigger` if the backend rejected or never answered the trigger
    /// - `Fetch` if the refetch failed (the cached collection is kept)
    async fn sync(&self, resource: ResourceKey) -> Result<SyncReport, SyncError>;

    /// Refetch `resource` without triggering a remote sync.
    ///
    /// Does not take the busy guard.
    async fn refresh(&self, resource: ResourceKey) -> Result<SyncReport, SyncError>;

    /// Whether a sync of `resource` is in flight.
    fn is_busy(&self, resource: ResourceKey) -> bool;

    /// Current state of `resource`.
    fn sync_state(&self, resource: ResourceKey) -> SyncState;

    /// States of every resource, in `ResourceKey::ALL` order.
    fn sync_states(&self) -> Vec<SyncState> {
        ResourceKey::ALL
            .iter()
            .map(|resource| self.sync_state(*resource))
            .collect()
    }
}
