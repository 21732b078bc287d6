//! Utilities for reacting to runtime events inside UI layers.
use runtime::{Event, RefreshScope, SyncEvent};

use crate::message::{MessageEntry, MessageLog};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventImpact {
    pub requires_redraw: bool,
}

impl EventImpact {
    pub const fn none() -> Self {
        Self {
            requires_redraw: false,
        }
    }

    pub const fn redraw() -> Self {
        Self {
            requires_redraw: true,
        }
    }

    /// Redraw if either side asks for it.
    pub fn combine(self, other: Self) -> Self {
        Self {
            requires_redraw: self.requires_redraw || other.requires_redraw,
        }
    }
}

pub trait EventConsumer {
    fn message_log(&self) -> &MessageLog;
    fn message_log_mut(&mut self) -> &mut MessageLog;

    /// Default handling: notifications land in the message log, refreshes
    /// with a non-empty scope request a redraw.
    fn on_event(&mut self, event: &Event) -> EventImpact {
        match event {
            Event::Notification(notification) => {
                self.message_log_mut().push(MessageEntry::from(notification));
                EventImpact::redraw()
            }
            Event::Sync(SyncEvent::Refreshed { scope }) => {
                if scope.intersects(RefreshScope::ALL) {
                    EventImpact::redraw()
                } else {
                    EventImpact::none()
                }
            }
            // The directory refresh that follows carries the visible change.
            Event::Sync(SyncEvent::UserCreated { .. }) => EventImpact::none(),
        }
    }
}
