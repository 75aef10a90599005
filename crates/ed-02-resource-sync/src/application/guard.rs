//! # Busy Guard
//!
//! Per-resource in-flight flag with guaranteed release.
//!
//! The flag is cleared in `Drop`, so every exit path of a sync (success,
//! gateway error, timeout, panic, or the future being dropped mid-await)
//! leaves the resource idle.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use shared_types::ResourceKey;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Mutable per-resource bookkeeping.
#[derive(Debug, Default, Clone)]
pub(crate) struct ResourceSlot {
    pub(crate) busy: bool,
    pub(crate) last_synced_at: Option<DateTime<Utc>>,
    /// Sequence number handed to the most recently started fetch.
    pub(crate) fetch_issued: u64,
    /// Sequence number of the fetch whose result is in the store.
    pub(crate) fetch_applied: u64,
}

pub(crate) type SlotTable = Arc<Mutex<HashMap<ResourceKey, ResourceSlot>>>;

/// Proof that the caller owns the sync of one resource.
pub struct BusyGuard {
    slots: SlotTable,
    resource: ResourceKey,
}

impl BusyGuard {
    /// Mark `resource` busy, or return `None` if it already is.
    pub(crate) fn try_acquire(slots: &SlotTable, resource: ResourceKey) -> Option<Self> {
        let mut table = slots.lock();
        let slot = table.entry(resource).or_default();
        if slot.busy {
            return None;
        }
        slot.busy = true;
        debug!("[ed-02] Busy guard acquired for {}", resource);

        Some(Self {
            slots: slots.clone(),
            resource,
        })
    }

    /// The guarded resource.
    pub fn resource(&self) -> ResourceKey {
        self.resource
    }

    /// Record a fully successful sync+fetch cycle.
    pub fn mark_synced(&self, at: DateTime<Utc>) {
        self.slots
            .lock()
            .entry(self.resource)
            .or_default()
            .last_synced_at = Some(at);
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.slots.lock().entry(self.resource).or_default().busy = false;
        debug!("[ed-02] Busy guard released for {}", self.resource);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> SlotTable {
        Arc::new(Mutex::new(HashMap::new()))
    }

    #[test]
    fn test_second_acquire_rejected() {
        let slots = table();
        let guard = BusyGuard::try_acquire(&slots, ResourceKey::Contacts).unwrap();
        assert!(BusyGuard::try_acquire(&slots, ResourceKey::Contacts).is_none());
        drop(guard);
        assert!(BusyGuard::try_acquire(&slots, ResourceKey::Contacts).is_some());
    }

    #[test]
    fn test_keys_are_independent() {
        let slots = table();
        let _contacts = BusyGuard::try_acquire(&slots, ResourceKey::Contacts).unwrap();
        assert!(BusyGuard::try_acquire(&slots, ResourceKey::ChartOfAccounts).is_some());
    }

    #[test]
    fn test_release_on_panic() {
        let slots = table();
        let inner = slots.clone();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _guard = BusyGuard::try_acquire(&inner, ResourceKey::Receipts).unwrap();
            panic!("boom");
        }));
        assert!(result.is_err());
        assert!(!slots.lock()[&ResourceKey::Receipts].busy);
    }

    #[test]
    fn test_mark_synced_records_time() {
        let slots = table();
        let guard = BusyGuard::try_acquire(&slots, ResourceKey::Contacts).unwrap();
        let now = Utc::now();
        guard.mark_synced(now);
        drop(guard);
        assert_eq!(slots.lock()[&ResourceKey::Contacts].last_synced_at, Some(now));
    }
}
