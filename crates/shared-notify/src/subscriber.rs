//! # Notification Subscriber
//!
//! Read side of the notification slot, used by the UI layer.

use crate::events::Notification;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// A handle observing the notification slot.
///
/// Only the latest value is ever observable; intermediate notifications
/// replaced before the subscriber looked are not replayed.
pub struct NotificationSubscription {
    receiver: watch::Receiver<Option<Notification>>,
}

impl NotificationSubscription {
    pub(crate) fn new(receiver: watch::Receiver<Option<Notification>>) -> Self {
        Self { receiver }
    }

    /// The value currently in the slot.
    #[must_use]
    pub fn current(&self) -> Option<Notification> {
        self.receiver.borrow().clone()
    }

    /// The value currently in the slot, marking it as seen.
    pub fn mark_seen(&mut self) -> Option<Notification> {
        self.receiver.borrow_and_update().clone()
    }

    /// Whether the slot changed since it was last seen.
    #[must_use]
    pub fn has_changed(&self) -> bool {
        self.receiver.has_changed().unwrap_or(false)
    }

    /// Wait for the next change to the slot.
    ///
    /// # Returns
    ///
    /// - `Some(value)` - The new slot content (`None` inside means cleared)
    /// - `None` - Every channel handle was dropped
    pub async fn changed(&mut self) -> Option<Option<Notification>> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }

    /// Convert into a stream yielding the current value and every change.
    #[must_use]
    pub fn into_stream(self) -> WatchStream<Option<Notification>> {
        WatchStream::new(self.receiver)
    }
}
