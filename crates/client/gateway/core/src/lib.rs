//! Remote data gateway abstraction for the leaderboard client.
//!
//! # Architecture
//!
//! ```text
//! Gateway (composite trait)
//!   ├── DirectoryReader   list users, leaderboard
//!   ├── HistoryReader     paged history, paged per-user history
//!   └── PointsWriter      create user, claim
//! ```
//!
//! Every failure is normalized into [`RequestError`] so callers have exactly
//! one failure contract regardless of transport.
//!
//! # Usage
//!
//! ```ignore
//! use client_gateway_core::{Gateway, HistoryQuery};
//!
//! async fn first_page(gateway: &dyn Gateway) {
//!     let page = gateway.history(HistoryQuery::new(1, 5)).await?;
//! }
//! ```

pub mod error;
pub mod traits;
pub mod types;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::{RequestError, RequestErrorKind, Result};

pub use traits::{DirectoryReader, Gateway, HistoryReader, PointsWriter};

pub use types::{
    ClaimOutcome, ClaimRequest, CreateUserRequest, ErrorBody, HistoryEntry, HistoryPage,
    HistoryQuery, LeaderboardRow, User, UserId,
};

#[cfg(any(test, feature = "mock"))]
pub use mock::{MockGateway, Operation};
