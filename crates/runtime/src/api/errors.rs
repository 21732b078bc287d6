//! Unified error types surfaced by the runtime API.
//!
//! Wraps gateway failures, rejected intents and worker coordination failures
//! so frontends can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use client_gateway_core::{RequestError, UserId};

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// An intent rejected before any request is sent.
///
/// The display text is what the user sees as an informational notice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Enter a name")]
    EmptyName,

    #[error("Select a user first")]
    NoSelection,

    #[error("Unknown user {0}")]
    UnknownUser(UserId),

    #[error("Page numbers start at 1")]
    InvalidPage,
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("runtime requires a gateway to be configured before building")]
    MissingGateway,

    #[error("sync worker command channel closed")]
    CommandChannelClosed,

    #[error("sync worker command queue is full")]
    CommandQueueFull,

    #[error("sync worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("sync worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

impl RuntimeError {
    /// Text for a user-facing notice, using `fallback` when a request
    /// failure carries no message of its own.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            RuntimeError::Validation(error) => error.to_string(),
            RuntimeError::Request(error) => error.message_or(fallback).to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_server_text() {
        let error = RuntimeError::from(RequestError::status(404, "User not found"));
        assert_eq!(error.user_message("Failed to claim points"), "User not found");

        let error = RuntimeError::from(RequestError::network(""));
        assert_eq!(
            error.user_message("Failed to claim points"),
            "Failed to claim points"
        );
    }

    #[test]
    fn validation_text_is_the_notice() {
        let error = RuntimeError::from(ValidationError::NoSelection);
        assert_eq!(error.user_message("ignored"), "Select a user first");
    }
}
