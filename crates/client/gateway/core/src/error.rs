//! Normalized failure shape for every gateway call.

use thiserror::Error;

/// Where a request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestErrorKind {
    /// The server answered with a non-success status.
    Status(u16),
    /// The request never produced a response.
    Network,
    /// A success response carried a body that could not be decoded.
    Decode,
}

/// Remote failure surfaced to the orchestrator.
///
/// The orchestrator only reads [`RequestError::message`]; the kind exists for
/// logging. An empty message means the server gave no usable text and the
/// caller should substitute its own fallback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.display_message())]
pub struct RequestError {
    kind: RequestErrorKind,
    message: String,
}

impl RequestError {
    pub fn new(kind: RequestErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::new(RequestErrorKind::Status(status), message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(RequestErrorKind::Network, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(RequestErrorKind::Decode, message)
    }

    pub fn kind(&self) -> RequestErrorKind {
        self.kind
    }

    /// Server-provided message, possibly empty.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Message to show the user, falling back when the server gave none.
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        let trimmed = self.message.trim();
        if trimmed.is_empty() { fallback } else { trimmed }
    }

    fn display_message(&self) -> &str {
        self.message_or("request failed")
    }
}

pub type Result<T> = std::result::Result<T, RequestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_used_for_blank_messages() {
        let err = RequestError::status(500, "  ");
        assert_eq!(err.message_or("Failed to add user"), "Failed to add user");
        assert_eq!(err.to_string(), "request failed");
    }

    #[test]
    fn server_message_wins_over_fallback() {
        let err = RequestError::status(409, "Name already taken");
        assert_eq!(err.message_or("Failed to add user"), "Name already taken");
        assert_eq!(err.kind(), RequestErrorKind::Status(409));
    }
}
