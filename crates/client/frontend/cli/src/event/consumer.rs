//! Maintains the CLI message log in response to runtime events.
use runtime::{Event, SyncEvent};

use client_frontend_core::{
    event::{EventConsumer, EventImpact},
    message::{MessageEntry, MessageLog},
};

pub struct CliEventConsumer {
    log: MessageLog,
}

impl CliEventConsumer {
    pub fn new(log: MessageLog) -> Self {
        Self { log }
    }
}

impl EventConsumer for CliEventConsumer {
    fn on_event(&mut self, event: &Event) -> EventImpact {
        match event {
            Event::Notification(notification) => {
                tracing::debug!(level = %notification.level, text = %notification.text, "Notification");
                self.log.push(MessageEntry::from(notification));
                EventImpact::redraw()
            }
            Event::Sync(SyncEvent::Refreshed { scope }) if scope.is_empty() => EventImpact::none(),
            Event::Sync(SyncEvent::Refreshed { .. }) => EventImpact::redraw(),
            Event::Sync(SyncEvent::UserCreated { .. }) => EventImpact::none(),
        }
    }

    fn message_log(&self) -> &MessageLog {
        &self.log
    }

    fn message_log_mut(&mut self) -> &mut MessageLog {
        &mut self.log
    }
}

#[cfg(test)]
mod tests {
    use client_frontend_core::MessageLevel;
    use client_gateway_core::UserId;
    use runtime::{Notification, RefreshScope};

    use super::*;

    #[test]
    fn notifications_keep_their_level() {
        let mut consumer = CliEventConsumer::new(MessageLog::new(8));
        consumer.on_event(&Event::Notification(Notification::success("Added \"Ada\"")));
        consumer.on_event(&Event::Notification(Notification::error("Failed to add user")));

        let levels: Vec<_> = consumer.message_log().recent(8).map(|e| e.level).collect();
        assert_eq!(levels, vec![MessageLevel::Error, MessageLevel::Success]);
    }

    #[test]
    fn busy_refresh_redraws_without_logging() {
        let mut consumer = CliEventConsumer::new(MessageLog::new(8));
        let impact = consumer.on_event(&Event::Sync(SyncEvent::Refreshed {
            scope: RefreshScope::BUSY,
        }));

        assert!(impact.requires_redraw);
        assert!(consumer.message_log().is_empty());
    }

    #[test]
    fn created_user_alone_does_not_redraw() {
        let mut consumer = CliEventConsumer::new(MessageLog::new(8));
        let impact = consumer.on_event(&Event::Sync(SyncEvent::UserCreated {
            user_id: UserId::from("u4"),
            name: "Ada".into(),
        }));

        assert_eq!(impact, EventImpact::none());
    }
}
