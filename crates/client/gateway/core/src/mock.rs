//! In-memory gateway for tests.
//!
//! Behaves like the real server (dense ranking, most-recent-first history,
//! server-chosen claim values) and additionally lets a test script failures,
//! per-page latency, claim values and a gate that holds claims open.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Semaphore;

use crate::error::{RequestError, Result};
use crate::traits::{DirectoryReader, Gateway, HistoryReader, PointsWriter};
use crate::types::{
    ClaimOutcome, HistoryEntry, HistoryPage, HistoryQuery, LeaderboardRow, User, UserId,
};

/// Gateway operation, used for call accounting and failure scripting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListUsers,
    Leaderboard,
    History,
    UserHistory,
    CreateUser,
    Claim,
}

#[derive(Default)]
struct MockState {
    users: Vec<User>,
    /// Most recent first.
    history: Vec<HistoryEntry>,
    next_user: u64,
    next_claim: u64,
    scripted_points: VecDeque<u8>,
    failures: HashMap<Operation, VecDeque<RequestError>>,
    history_delays: HashMap<u32, Duration>,
    calls: Vec<Operation>,
    history_queries: Vec<HistoryQuery>,
}

/// Mock gateway simulating the leaderboard server in memory.
#[derive(Clone)]
pub struct MockGateway {
    state: Arc<Mutex<MockState>>,
    claim_gate: Option<Arc<Semaphore>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                next_user: 1,
                next_claim: 1,
                ..MockState::default()
            })),
            claim_gate: None,
        }
    }

    /// Seed users named in order; ids are `u1`, `u2`, ...
    pub fn with_users<'a>(self, users: impl IntoIterator<Item = (&'a str, u64)>) -> Self {
        {
            let mut state = self.lock();
            for (name, total_points) in users {
                let id = state.allocate_user_id();
                state.users.push(User {
                    id,
                    name: name.to_string(),
                    total_points,
                });
            }
        }
        self
    }

    /// Append historical claims for `user_id` without going through the
    /// claim path. Totals are credited the same way a claim would.
    pub fn with_claims(self, user_id: &str, points: &[u8]) -> Self {
        {
            let mut state = self.lock();
            let user_id = UserId::from(user_id);
            for &value in points {
                state.record_claim(&user_id, value);
            }
        }
        self
    }

    /// Values returned by subsequent claims, in order. Falls back to 5.
    pub fn script_points(&self, points: impl IntoIterator<Item = u8>) {
        self.lock().scripted_points.extend(points);
    }

    /// Make the next call to `operation` fail with `error`.
    pub fn fail_next(&self, operation: Operation, error: RequestError) {
        self.lock()
            .failures
            .entry(operation)
            .or_default()
            .push_back(error);
    }

    /// Delay every global history read of `page` by `delay`, including reads
    /// scripted to fail.
    pub fn delay_history_page(&self, page: u32, delay: Duration) {
        self.lock().history_delays.insert(page, delay);
    }

    /// Hold every claim until a permit is added to the returned semaphore.
    pub fn gate_claims(mut self) -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        self.claim_gate = Some(Arc::clone(&gate));
        (self, gate)
    }

    /// Every operation invoked so far, in call order.
    pub fn calls(&self) -> Vec<Operation> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self, operation: Operation) -> usize {
        self.lock().calls.iter().filter(|op| **op == operation).count()
    }

    /// Queries received by the global history read, in call order.
    pub fn history_queries(&self) -> Vec<HistoryQuery> {
        self.lock().history_queries.clone()
    }

    pub fn users(&self) -> Vec<User> {
        self.lock().users.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self, operation: Operation) -> Result<()> {
        let mut state = self.lock();
        state.calls.push(operation);
        match state.failures.get_mut(&operation).and_then(VecDeque::pop_front) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MockState {
    fn allocate_user_id(&mut self) -> UserId {
        let id = UserId(format!("u{}", self.next_user));
        self.next_user += 1;
        id
    }

    fn record_claim(&mut self, user_id: &UserId, points: u8) -> Option<u64> {
        let user = self.users.iter_mut().find(|user| &user.id == user_id)?;
        user.total_points += u64::from(points);
        let total = user.total_points;
        let entry = HistoryEntry {
            id: format!("h{}", self.next_claim),
            user_id: user.id.clone(),
            user_name: user.name.clone(),
            points,
            timestamp: Utc::now(),
        };
        self.next_claim += 1;
        self.history.insert(0, entry);
        Some(total)
    }

    fn leaderboard(&self) -> Vec<LeaderboardRow> {
        let mut ordered: Vec<&User> = self.users.iter().collect();
        ordered.sort_by(|a, b| {
            b.total_points
                .cmp(&a.total_points)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.id.cmp(&b.id))
        });

        let mut rows = Vec::with_capacity(ordered.len());
        let mut rank = 0;
        let mut previous = None;
        for user in ordered {
            if previous != Some(user.total_points) {
                rank += 1;
                previous = Some(user.total_points);
            }
            rows.push(LeaderboardRow {
                rank,
                user_id: user.id.clone(),
                name: user.name.clone(),
                total_points: user.total_points,
            });
        }
        rows
    }

    fn page<'a>(entries: impl Iterator<Item = &'a HistoryEntry>, query: HistoryQuery) -> HistoryPage {
        let matching: Vec<&HistoryEntry> = entries.collect();
        HistoryPage {
            total: matching.len() as u64,
            items: matching
                .into_iter()
                .skip(query.offset())
                .take(query.limit as usize)
                .cloned()
                .collect(),
        }
    }
}

#[async_trait]
impl DirectoryReader for MockGateway {
    async fn list_users(&self) -> Result<Vec<User>> {
        self.begin(Operation::ListUsers)?;
        Ok(self.lock().users.clone())
    }

    async fn leaderboard(&self) -> Result<Vec<LeaderboardRow>> {
        self.begin(Operation::Leaderboard)?;
        Ok(self.lock().leaderboard())
    }
}

#[async_trait]
impl HistoryReader for MockGateway {
    async fn history(&self, query: HistoryQuery) -> Result<HistoryPage> {
        let delay = {
            let mut state = self.lock();
            state.history_queries.push(query);
            state.history_delays.get(&query.page).copied()
        };
        let started = self.begin(Operation::History);

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        started?;

        let state = self.lock();
        Ok(MockState::page(state.history.iter(), query))
    }

    async fn user_history(&self, user_id: &UserId, query: HistoryQuery) -> Result<HistoryPage> {
        self.begin(Operation::UserHistory)?;
        let state = self.lock();
        Ok(MockState::page(
            state.history.iter().filter(|entry| &entry.user_id == user_id),
            query,
        ))
    }
}

#[async_trait]
impl PointsWriter for MockGateway {
    async fn create_user(&self, name: &str) -> Result<User> {
        self.begin(Operation::CreateUser)?;
        if name.trim().is_empty() {
            return Err(RequestError::status(400, "Name is required"));
        }

        let mut state = self.lock();
        let user = User {
            id: state.allocate_user_id(),
            name: name.to_string(),
            total_points: 0,
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn claim(&self, user_id: &UserId) -> Result<ClaimOutcome> {
        self.begin(Operation::Claim)?;

        if let Some(gate) = &self.claim_gate {
            let permit = gate
                .acquire()
                .await
                .map_err(|_| RequestError::network("claim gate closed"))?;
            permit.forget();
        }

        let mut state = self.lock();
        let points = state.scripted_points.pop_front().unwrap_or(5);
        let total_points = state
            .record_claim(user_id, points)
            .ok_or_else(|| RequestError::status(404, "User not found"))?;

        tracing::debug!(%user_id, points, total_points, "mock claim recorded");

        Ok(ClaimOutcome {
            user_id: user_id.clone(),
            points,
            total_points,
        })
    }
}

impl Gateway for MockGateway {
    fn name(&self) -> &str {
        "mock"
    }

    fn endpoint(&self) -> &str {
        "memory://leaderboard"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn leaderboard_uses_dense_ranks() {
        let gateway = MockGateway::new().with_users([("Cy", 10), ("Ada", 20), ("Bo", 10)]);

        let rows = gateway.leaderboard().await.unwrap();
        let ranks: Vec<_> = rows.iter().map(|r| (r.rank, r.name.as_str())).collect();
        assert_eq!(ranks, vec![(1, "Ada"), (2, "Bo"), (2, "Cy")]);
    }

    #[tokio::test]
    async fn claims_credit_totals_and_prepend_history() {
        let gateway = MockGateway::new().with_users([("Ada", 0)]);
        gateway.script_points([7, 3]);

        let first = gateway.claim(&UserId::from("u1")).await.unwrap();
        let second = gateway.claim(&UserId::from("u1")).await.unwrap();
        assert_eq!((first.points, first.total_points), (7, 7));
        assert_eq!((second.points, second.total_points), (3, 10));

        let page = gateway.history(HistoryQuery::new(1, 5)).await.unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.items[0].points, 3);
    }

    #[tokio::test]
    async fn history_pages_are_windowed() {
        let gateway = MockGateway::new()
            .with_users([("Ada", 0)])
            .with_claims("u1", &[1, 2, 3, 4, 5, 6, 7]);

        let page = gateway.history(HistoryQuery::new(2, 5)).await.unwrap();
        assert_eq!(page.total, 7);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].points, 2);
    }

    #[tokio::test]
    async fn scripted_failure_is_consumed_once() {
        let gateway = MockGateway::new();
        gateway.fail_next(Operation::ListUsers, RequestError::status(500, "down"));

        assert!(gateway.list_users().await.is_err());
        assert!(gateway.list_users().await.is_ok());
        assert_eq!(gateway.call_count(Operation::ListUsers), 2);
    }

    #[tokio::test]
    async fn claim_for_unknown_user_is_not_found() {
        let gateway = MockGateway::new();
        let err = gateway.claim(&UserId::from("ghost")).await.unwrap_err();
        assert_eq!(err.message(), "User not found");
    }
}
