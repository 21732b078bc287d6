//! Topic-based event bus implementation.

use std::sync::Arc;

use tokio::sync::broadcast;

use super::types::{Notification, SyncEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum Topic {
    /// Snapshot changes
    Sync,
    /// User-facing notices
    Notification,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Sync(SyncEvent),
    Notification(Notification),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Sync(_) => Topic::Sync,
            Event::Notification(_) => Topic::Notification,
        }
    }
}

struct Channels {
    sync: broadcast::Sender<Event>,
    notification: broadcast::Sender<Event>,
}

impl Channels {
    fn get(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Sync => &self.sync,
            Topic::Notification => &self.notification,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Delivery is best-effort: events published while
/// nobody listens are dropped, and slow receivers observe `Lagged`.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                sync: broadcast::channel(capacity).0,
                notification: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels.get(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.get(topic).subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::RefreshScope;

    #[tokio::test]
    async fn subscribers_only_see_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut sync_rx = bus.subscribe(Topic::Sync);
        let mut notice_rx = bus.subscribe(Topic::Notification);

        bus.publish(Event::Notification(Notification::info("Enter a name")));
        bus.publish(Event::Sync(SyncEvent::Refreshed {
            scope: RefreshScope::HISTORY,
        }));

        assert_eq!(
            sync_rx.recv().await.unwrap(),
            Event::Sync(SyncEvent::Refreshed {
                scope: RefreshScope::HISTORY
            })
        );
        assert_eq!(
            notice_rx.recv().await.unwrap(),
            Event::Notification(Notification::info("Enter a name"))
        );
        assert!(sync_rx.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::default();
        bus.publish(Event::Notification(Notification::error("boom")));
    }
}
