//! # Domain Entities
//!
//! Sync state per resource and the values exchanged with the gateway.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{Account, Contact, Receipt, ResourceKey};

/// Observable sync state of one resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncState {
    /// The resource this state describes.
    pub resource: ResourceKey,
    /// Whether a sync is in flight.
    pub busy: bool,
    /// Completion time of the last fully successful sync.
    pub last_synced_at: Option<DateTime<Utc>>,
}

impl SyncState {
    /// Idle state with no history.
    pub fn idle(resource: ResourceKey) -> Self {
        Self {
            resource,
            busy: false,
            last_synced_at: None,
        }
    }
}

/// Acknowledgement of a sync trigger.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncAck {
    /// The backend's `message` field, shown to the user on success.
    pub message: Option<String>,
}

impl SyncAck {
    /// Acknowledgement carrying a server message.
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

/// A freshly fetched collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RemoteCollection {
    /// The chart of accounts.
    Accounts(Vec<Account>),
    /// All contacts.
    Contacts(Vec<Contact>),
    /// All receipts.
    Receipts(Vec<Receipt>),
    /// The backend keeps no listing for this resource; keep local data.
    Unchanged,
}

impl RemoteCollection {
    /// Whether this collection may be applied to `resource`.
    pub fn fits(&self, resource: ResourceKey) -> bool {
        matches!(
            (self, resource),
            (RemoteCollection::Accounts(_), ResourceKey::ChartOfAccounts)
                | (RemoteCollection::Contacts(_), ResourceKey::Contacts)
                | (RemoteCollection::Receipts(_), ResourceKey::Receipts)
                | (RemoteCollection::Unchanged, _)
        )
    }

    /// Number of records carried, `None` for `Unchanged`.
    pub fn item_count(&self) -> Option<usize> {
        match self {
            RemoteCollection::Accounts(items) => Some(items.len()),
            RemoteCollection::Contacts(items) => Some(items.len()),
            RemoteCollection::Receipts(items) => Some(items.len()),
            RemoteCollection::Unchanged => None,
        }
    }

    /// Short variant name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RemoteCollection::Accounts(_) => "accounts",
            RemoteCollection::Contacts(_) => "contacts",
            RemoteCollection::Receipts(_) => "receipts",
            RemoteCollection::Unchanged => "unchanged",
        }
    }
}

/// Outcome of a successful sync or refresh.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// The resource that was synced.
    pub resource: ResourceKey,
    /// Size of the local collection after the operation.
    pub item_count: usize,
    /// Whether the fetched collection replaced the local one.
    ///
    /// `false` when the backend reported no listing or the result was
    /// superseded by a newer fetch.
    pub applied: bool,
    /// The success message shown to the user (sync only).
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::AccountType;

    #[test]
    fn test_collection_fits_resource() {
        let accounts = RemoteCollection::Accounts(vec![Account::new("1", "Cash", AccountType::Cash)]);
        assert!(accounts.fits(ResourceKey::ChartOfAccounts));
        assert!(!accounts.fits(ResourceKey::Contacts));
        assert!(RemoteCollection::Unchanged.fits(ResourceKey::Receipts));
    }

    #[test]
    fn test_collection_len() {
        assert_eq!(RemoteCollection::Contacts(vec![]).item_count(), Some(0));
        assert_eq!(RemoteCollection::Unchanged.item_count(), None);
    }

    #[test]
    fn test_idle_state() {
        let state = SyncState::idle(ResourceKey::Contacts);
        assert!(!state.busy);
        assert!(state.last_synced_at.is_none());
    }
}
