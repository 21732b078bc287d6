//! Gateway abstraction traits.
//!
//! The contract is split the same way the server splits it:
//! - Reads: [`DirectoryReader`] (users, leaderboard) and [`HistoryReader`]
//! - Writes: [`PointsWriter`]
//! - [`Gateway`] composes all of them and is what the runtime depends on

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ClaimOutcome, HistoryPage, HistoryQuery, LeaderboardRow, User, UserId};

/// Idempotent reads of the participant directory.
#[async_trait]
pub trait DirectoryReader: Send + Sync {
    /// All registered users.
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Ranked rows, already ordered by the server.
    async fn leaderboard(&self) -> Result<Vec<LeaderboardRow>>;
}

/// Idempotent paged reads of the claim log.
#[async_trait]
pub trait HistoryReader: Send + Sync {
    /// Global claim history, most recent first.
    async fn history(&self, query: HistoryQuery) -> Result<HistoryPage>;

    /// Claim history restricted to one user.
    async fn user_history(&self, user_id: &UserId, query: HistoryQuery) -> Result<HistoryPage>;
}

/// Mutating calls.
#[async_trait]
pub trait PointsWriter: Send + Sync {
    /// Register a participant. `name` is sent as given.
    async fn create_user(&self, name: &str) -> Result<User>;

    /// Award a server-chosen random value to a user.
    async fn claim(&self, user_id: &UserId) -> Result<ClaimOutcome>;
}

/// Complete remote data gateway.
pub trait Gateway: DirectoryReader + HistoryReader + PointsWriter + Send + Sync {
    /// Implementation name used in logs (e.g. "http", "mock").
    fn name(&self) -> &str;

    /// Where requests are sent.
    fn endpoint(&self) -> &str;
}
