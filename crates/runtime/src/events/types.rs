//! Event types for each topic.

use std::fmt;

use client_gateway_core::UserId;

use crate::state::RefreshScope;

/// State changes published after the snapshot has been updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// Parts of the snapshot replaced by the last applied effect.
    Refreshed { scope: RefreshScope },
    /// The server accepted a new user. Published before the directory is
    /// refreshed, so the user may not be in the snapshot yet.
    UserCreated { user_id: UserId, name: String },
}

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NotificationLevel::Info => "info",
            NotificationLevel::Success => "success",
            NotificationLevel::Error => "error",
        };
        write!(f, "{}", label)
    }
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub text: String,
}

impl Notification {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            text: text.into(),
        }
    }
}
