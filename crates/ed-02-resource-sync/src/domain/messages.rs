//! User-facing notification texts.

use shared_types::ResourceKey;

/// Shown while a sync is in flight.
pub fn syncing(resource: ResourceKey) -> String {
    format!("Syncing {}...", resource.title())
}

/// Shown on success when the backend sent no message.
pub fn synced(resource: ResourceKey) -> String {
    format!("{} synced successfully!", resource.title())
}

/// Shown when the trigger fails without a server message.
pub fn sync_failed(resource: ResourceKey) -> String {
    format!("Failed to sync {}", resource.phrase())
}

/// Shown when the refetch fails without a server message.
pub fn fetch_failed(resource: ResourceKey) -> String {
    format!("Failed to fetch {}", resource.phrase())
}
