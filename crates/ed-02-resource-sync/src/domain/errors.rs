//! # Domain Errors
//!
//! Error types for Resource Sync.

use shared_types::{GatewayError, ResourceKey};
use thiserror::Error;

/// Resource sync error types.
///
/// By the time a caller sees one of these, the matching notification has
/// already been posted; callers only need them for control flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// A sync for this resource is already in flight.
    #[error("Sync already in progress for {0}")]
    InProgress(ResourceKey),

    /// The remote "trigger sync" request failed.
    #[error("Sync trigger failed for {resource}: {source}")]
    Trigger {
        /// The resource being synced.
        resource: ResourceKey,
        /// Underlying gateway failure.
        source: GatewayError,
    },

    /// The refetch of the collection failed; the cached collection is intact.
    #[error("Fetch failed for {resource}: {source}")]
    Fetch {
        /// The resource being fetched.
        resource: ResourceKey,
        /// Underlying gateway failure.
        source: GatewayError,
    },
}

impl SyncError {
    /// The resource the error concerns.
    pub fn resource(&self) -> ResourceKey {
        match self {
            SyncError::InProgress(resource) => *resource,
            SyncError::Trigger { resource, .. } | SyncError::Fetch { resource, .. } => *resource,
        }
    }

    /// Whether the error came from the remote side.
    pub fn is_remote(&self) -> bool {
        !matches!(self, SyncError::InProgress(_))
    }
}
