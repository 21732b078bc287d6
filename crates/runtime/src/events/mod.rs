//! Topic-based event bus for runtime events.
//!
//! Snapshot changes go to [`Topic::Sync`], user-facing notices to
//! [`Topic::Notification`]. The snapshot itself is delivered through the
//! handle's watch channel; events only describe what changed.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{Notification, NotificationLevel, SyncEvent};
