//! Auto-dismiss task.
//!
//! Clears each notification once it has been visible for the display
//! duration. A replacement restarts the clock for the new notification.

use crate::channel::NotificationChannel;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Keeps the auto-dismiss task alive. Dropping it stops the task.
pub struct AutoDismissGuard {
    handle: JoinHandle<()>,
}

impl AutoDismissGuard {
    /// Whether the task has stopped.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for AutoDismissGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl NotificationChannel {
    /// Spawn the task that expires notifications after `display_for`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_auto_dismiss(&self, display_for: Duration) -> AutoDismissGuard {
        let channel = self.clone();
        let mut subscription = self.subscribe();

        let handle = tokio::spawn(async move {
            loop {
                let Some(shown) = subscription.mark_seen() else {
                    if subscription.changed().await.is_none() {
                        break;
                    }
                    continue;
                };

                tokio::select! {
                    _ = tokio::time::sleep(display_for) => {
                        if channel.dismiss(shown.id) {
                            debug!(id = shown.id, "Notification expired");
                        }
                    }
                    changed = subscription.changed() => {
                        if changed.is_none() {
                            break;
                        }
                    }
                }
            }
        });

        AutoDismissGuard { handle }
    }
}
