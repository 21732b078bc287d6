//! Shared message log primitives for the terminal and future UIs.
use std::collections::VecDeque;

use runtime::{Notification, NotificationLevel};

/// Severity level for UI messages.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl From<NotificationLevel> for MessageLevel {
    fn from(level: NotificationLevel) -> Self {
        match level {
            NotificationLevel::Info => MessageLevel::Info,
            NotificationLevel::Success => MessageLevel::Success,
            NotificationLevel::Error => MessageLevel::Error,
        }
    }
}

/// Snapshot of a single message entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageEntry {
    pub text: String,
    pub level: MessageLevel,
}

impl MessageEntry {
    pub fn new(text: impl Into<String>, level: MessageLevel) -> Self {
        Self {
            text: text.into(),
            level,
        }
    }
}

impl From<&Notification> for MessageEntry {
    fn from(notification: &Notification) -> Self {
        Self::new(notification.text.clone(), notification.level.into())
    }
}

/// Circular buffer of messages displayed to the user.
#[derive(Clone, Debug)]
pub struct MessageLog {
    entries: VecDeque<MessageEntry>,
    capacity: usize,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        let bounded_capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(bounded_capacity),
            capacity: bounded_capacity,
        }
    }

    pub fn push(&mut self, entry: MessageEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn push_text(&mut self, message: impl Into<String>, level: MessageLevel) {
        self.push(MessageEntry::new(message, level));
    }

    /// Newest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &MessageEntry> {
        self.entries.iter().rev().take(limit)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MessageEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oldest_entries_are_evicted() {
        let mut log = MessageLog::new(2);
        log.push_text("one", MessageLevel::Info);
        log.push_text("two", MessageLevel::Info);
        log.push_text("three", MessageLevel::Error);

        let recent: Vec<_> = log.recent(5).map(|e| e.text.as_str()).collect();
        assert_eq!(recent, vec!["three", "two"]);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn notifications_keep_their_level() {
        let entry = MessageEntry::from(&Notification::success("Added \"Alice\""));
        assert_eq!(entry.level, MessageLevel::Success);
        assert_eq!(entry.text, "Added \"Alice\"");
    }
}
