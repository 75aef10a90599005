//! # Shared Notify - Transient Notification Channel
//!
//! Every dashboard component reports its outcome to the user through one
//! shared, single-slot channel.
//!
//! ## Semantics
//!
//! - **Last write wins:** `notify()` replaces whatever is currently shown.
//!   There is no queue; if several events fire inside the display window only
//!   the newest is visible.
//! - **Auto-expiry:** a dismiss task clears the slot after
//!   [`DEFAULT_DISPLAY_DURATION`] unless a newer notification replaced it.
//! - **Idempotent clear:** clearing an empty slot is a no-op.
//!
//! ```text
//! ┌──────────────┐   notify()    ┌───────────────┐  changed()  ┌──────────┐
//! │ Controllers  │ ────────────→ │ watch slot    │ ──────────→ │ UI layer │
//! └──────────────┘               │ Option<Notif> │             └──────────┘
//!                                └───────────────┘
//!                                        ↑ clear after 4s
//!                                ┌───────────────┐
//!                                │ dismiss task  │
//!                                └───────────────┘
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod channel;
pub mod dismiss;
pub mod events;
pub mod subscriber;

pub use channel::NotificationChannel;
pub use dismiss::AutoDismissGuard;
pub use events::{Notification, NotificationKind};
pub use subscriber::NotificationSubscription;

use std::time::Duration;

/// How long a notification stays visible before it auto-clears.
pub const DEFAULT_DISPLAY_DURATION: Duration = Duration::from_millis(4000);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_display_duration() {
        assert_eq!(DEFAULT_DISPLAY_DURATION.as_millis(), 4000);
    }
}
