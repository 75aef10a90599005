//! # Notification Channel
//!
//! Publishing side of the notification slot.

use crate::events::{Notification, NotificationKind};
use crate::subscriber::NotificationSubscription;
use chrono::Utc;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Callback run for every posted notification.
type Hook = Arc<dyn Fn(&Notification) + Send + Sync>;

/// Single-slot, last-write-wins notification channel.
///
/// Cloning is cheap and every clone addresses the same slot, so the channel
/// can be handed to each controller by value.
#[derive(Clone)]
pub struct NotificationChannel {
    /// The slot. `None` means nothing is shown.
    pub(crate) slot: Arc<watch::Sender<Option<Notification>>>,

    /// Last assigned notification id.
    last_id: Arc<AtomicU64>,

    /// Total notifications posted.
    notifications_sent: Arc<AtomicU64>,

    /// Hooks run after each post, outside the slot lock.
    hooks: Arc<RwLock<Vec<Hook>>>,
}

impl NotificationChannel {
    /// Create an empty channel.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            slot: Arc::new(sender),
            last_id: Arc::new(AtomicU64::new(0)),
            notifications_sent: Arc::new(AtomicU64::new(0)),
            hooks: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Run `hook` for every notification posted from now on, including ones
    /// replaced before any subscriber saw them.
    pub fn on_notify<F>(&self, hook: F)
    where
        F: Fn(&Notification) + Send + Sync + 'static,
    {
        self.hooks.write().push(Arc::new(hook));
    }

    /// Replace the current notification unconditionally.
    ///
    /// Returns the id assigned to the new notification.
    pub fn notify(&self, message: impl Into<String>, kind: NotificationKind) -> u64 {
        let message = message.into();
        let mut posted = None;

        // Assign the id under the slot's write lock so ids and slot order agree.
        self.slot.send_modify(|slot| {
            let notification = Notification {
                id: self.last_id.fetch_add(1, Ordering::SeqCst) + 1,
                message,
                kind,
                created_at: Utc::now(),
            };
            posted = Some(notification.clone());
            *slot = Some(notification);
        });
        self.notifications_sent.fetch_add(1, Ordering::Relaxed);

        let Some(posted) = posted else {
            return 0;
        };
        debug!(id = posted.id, kind = %kind, message = %posted.message, "Notification posted");

        let hooks = self.hooks.read().clone();
        for hook in hooks {
            hook(&posted);
        }
        posted.id
    }

    /// Post an informational notification.
    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.notify(message, NotificationKind::Info)
    }

    /// Post a success notification.
    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.notify(message, NotificationKind::Success)
    }

    /// Post an error notification.
    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.notify(message, NotificationKind::Error)
    }

    /// Empty the slot. No-op when nothing is shown.
    pub fn clear(&self) {
        self.slot.send_if_modified(|slot| slot.take().is_some());
    }

    /// Clear the slot only if it still holds notification `id`.
    ///
    /// Returns `true` if the notification was removed.
    pub fn dismiss(&self, id: u64) -> bool {
        self.slot.send_if_modified(|slot| match slot {
            Some(current) if current.id == id => {
                *slot = None;
                true
            }
            _ => false,
        })
    }

    /// Snapshot of the notification currently shown.
    #[must_use]
    pub fn current(&self) -> Option<Notification> {
        self.slot.borrow().clone()
    }

    /// Subscribe to slot changes.
    #[must_use]
    pub fn subscribe(&self) -> NotificationSubscription {
        NotificationSubscription::new(self.slot.subscribe())
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.slot.receiver_count()
    }

    /// Total notifications posted since creation.
    #[must_use]
    pub fn notifications_sent(&self) -> u64 {
        self.notifications_sent.load(Ordering::Relaxed)
    }
}

impl Default for NotificationChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NotificationChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationChannel")
            .field("current", &self.current())
            .field("notifications_sent", &self.notifications_sent())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_channel_is_empty() {
        let channel = NotificationChannel::new();
        assert!(channel.current().is_none());
        assert_eq!(channel.notifications_sent(), 0);
    }

    #[test]
    fn test_notify_without_subscribers() {
        let channel = NotificationChannel::new();
        let id = channel.success("Expense created successfully!");

        let current = channel.current().unwrap();
        assert_eq!(current.id, id);
        assert_eq!(current.kind, NotificationKind::Success);
        assert_eq!(current.message, "Expense created successfully!");
    }

    #[test]
    fn test_last_write_wins() {
        let channel = NotificationChannel::new();
        channel.info("Syncing Contacts...");
        channel.info("Syncing Chart of Accounts...");
        let last = channel.error("Failed to sync contacts");

        let current = channel.current().unwrap();
        assert_eq!(current.id, last);
        assert_eq!(current.message, "Failed to sync contacts");
        assert_eq!(channel.notifications_sent(), 3);
    }

    #[test]
    fn test_ids_increase() {
        let channel = NotificationChannel::new();
        let a = channel.info("a");
        let b = channel.info("b");
        assert!(b > a);
    }

    #[test]
    fn test_clear_and_clear_empty() {
        let channel = NotificationChannel::new();
        channel.clear();
        assert!(channel.current().is_none());

        channel.info("Syncing Receipts...");
        channel.clear();
        assert!(channel.current().is_none());
    }

    #[test]
    fn test_dismiss_only_matching() {
        let channel = NotificationChannel::new();
        let old = channel.info("old");
        let new = channel.success("new");

        assert!(!channel.dismiss(old));
        assert_eq!(channel.current().unwrap().id, new);

        assert!(channel.dismiss(new));
        assert!(channel.current().is_none());
    }

    #[test]
    fn test_clones_share_slot() {
        let channel = NotificationChannel::new();
        let other = channel.clone();
        other.error("boom");
        assert_eq!(channel.current().unwrap().message, "boom");
        assert_eq!(channel.notifications_sent(), 1);
    }

    #[test]
    fn test_hooks_see_replaced_notifications() {
        let channel = NotificationChannel::new();
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = seen.clone();
        channel.on_notify(move |n| sink.lock().push(n.kind));

        channel.info("Syncing Contacts...");
        channel.success("Contacts synced successfully!");

        assert_eq!(
            *seen.lock(),
            vec![NotificationKind::Info, NotificationKind::Success]
        );
    }
}
