//! # Outbound Ports
//!
//! Traits for external dependencies (the accounting backend).

use async_trait::async_trait;
use parking_lot::Mutex;
use shared_types::{GatewayError, ResourceKey};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Notify;

use crate::domain::{RemoteCollection, SyncAck};

/// Sync gateway - outbound port.
///
/// Backend contract:
///
/// | Resource | Trigger | Fetch |
/// |----------|---------|-------|
/// | chart_of_accounts | `POST sync/chart-of-accounts` → `{message}` | `GET chart-of-accounts` → `{chartofaccounts}` |
/// | contacts | `POST sync/contacts` → `{message}` | `GET contacts` → `{contacts}` |
/// | receipts | adapter-defined | adapter-defined |
#[async_trait]
pub trait SyncGateway: Send + Sync {
    /// Ask the backend to refresh `resource` from the accounting service.
    async fn trigger_sync(&self, resource: ResourceKey) -> Result<SyncAck, GatewayError>;

    /// Fetch the backend's current copy of `resource`.
    async fn fetch_collection(
        &self,
        resource: ResourceKey,
    ) -> Result<RemoteCollection, GatewayError>;
}

// =============================================================================
// Mock Implementation for Testing
// =============================================================================

/// Scriptable in-memory gateway.
///
/// Unscripted triggers succeed without a message and unscripted fetches
/// report `Unchanged`. Gates hold calls in flight until notified.
#[derive(Default)]
pub struct MockSyncGateway {
    triggers: Mutex<HashMap<ResourceKey, Result<SyncAck, GatewayError>>>,
    fetches: Mutex<HashMap<ResourceKey, Result<RemoteCollection, GatewayError>>>,
    trigger_calls: Mutex<HashMap<ResourceKey, usize>>,
    fetch_calls: Mutex<HashMap<ResourceKey, usize>>,
    trigger_gate: Mutex<Option<Arc<Notify>>>,
    fetch_gate: Mutex<Option<Arc<Notify>>>,
}

impl MockSyncGateway {
    /// Create a gateway with no scripted results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the result of every trigger for `resource`.
    pub fn set_trigger(&self, resource: ResourceKey, result: Result<SyncAck, GatewayError>) {
        self.triggers.lock().insert(resource, result);
    }

    /// Script the result of every fetch for `resource`.
    pub fn set_fetch(
        &self,
        resource: ResourceKey,
        result: Result<RemoteCollection, GatewayError>,
    ) {
        self.fetches.lock().insert(resource, result);
    }

    /// Hold every subsequent trigger until the returned `Notify` is signalled.
    pub fn gate_triggers(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.trigger_gate.lock() = Some(gate.clone());
        gate
    }

    /// Hold every subsequent fetch until the returned `Notify` is signalled.
    pub fn gate_fetches(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.fetch_gate.lock() = Some(gate.clone());
        gate
    }

    /// Number of trigger requests issued for `resource`.
    pub fn trigger_calls(&self, resource: ResourceKey) -> usize {
        self.trigger_calls.lock().get(&resource).copied().unwrap_or(0)
    }

    /// Number of fetch requests issued for `resource`.
    pub fn fetch_calls(&self, resource: ResourceKey) -> usize {
        self.fetch_calls.lock().get(&resource).copied().unwrap_or(0)
    }
}

#[async_trait]
impl SyncGateway for MockSyncGateway {
    async fn trigger_sync(&self, resource: ResourceKey) -> Result<SyncAck, GatewayError> {
        *self.trigger_calls.lock().entry(resource).or_insert(0) += 1;

        let gate = self.trigger_gate.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        self.triggers
            .lock()
            .get(&resource)
            .cloned()
            .unwrap_or_else(|| Ok(SyncAck::default()))
    }

    async fn fetch_collection(
        &self,
        resource: ResourceKey,
    ) -> Result<RemoteCollection, GatewayError> {
        *self.fetch_calls.lock().entry(resource).or_insert(0) += 1;

        let gate = self.fetch_gate.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        self.fetches
            .lock()
            .get(&resource)
            .cloned()
            .unwrap_or(Ok(RemoteCollection::Unchanged))
    }
}
