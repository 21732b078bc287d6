//! Pure refresh rules.
//!
//! [`plan`] maps `(state, intent)` to the ordered effects the sync worker must
//! run; [`apply`] folds the result of one effect back into the state. Neither
//! performs I/O, so every ordering rule is testable without a gateway.

use client_gateway_core::{HistoryPage, HistoryQuery, LeaderboardRow, User, UserId};

use super::pagination::{LimitChangePolicy, PageSize, Pagination};
use super::snapshot::{Busy, RefreshScope, SyncState};
use crate::api::ValidationError;

/// External intents, one per user-facing operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Load every view from scratch.
    Initialize,
    /// Show another history page.
    ChangePage(u32),
    /// Show a different number of history rows per page.
    ChangeLimit(PageSize),
    /// Choose (or clear) the user claims are awarded to.
    Select(Option<UserId>),
    /// Register a participant.
    Add(String),
    /// Award points to the selected user.
    Claim,
}

impl Intent {
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Initialize => "initialize",
            Intent::ChangePage(_) => "change page",
            Intent::ChangeLimit(_) => "change limit",
            Intent::Select(_) => "select",
            Intent::Add(_) => "add user",
            Intent::Claim => "claim",
        }
    }
}

/// One step of a [`Plan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Local: replace the pagination state.
    SetPagination(Pagination),
    /// Local: replace the selection.
    SetSelection(Option<UserId>),
    /// Write: create a user with an already trimmed name.
    CreateUser { name: String },
    /// Write: claim for `user_id`; `display_name` is only used in the
    /// success notification.
    Claim {
        user_id: UserId,
        display_name: String,
    },
    /// Read users and leaderboard concurrently, store both.
    RefreshDirectory,
    /// Read one history page, store it.
    RefreshHistory(HistoryQuery),
    /// Local: select the user returned by the preceding `CreateUser`.
    SelectCreatedUser,
}

impl Effect {
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Effect::CreateUser { .. }
                | Effect::Claim { .. }
                | Effect::RefreshDirectory
                | Effect::RefreshHistory(_)
        )
    }
}

/// Ordered effects for one intent.
///
/// Effects run strictly in order; the first failure aborts the rest and
/// everything already applied stays applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// Flags raised for the whole plan and lowered when it ends.
    pub busy: Busy,
    pub effects: Vec<Effect>,
    /// Shown when a failure carries no server message.
    pub failure_message: &'static str,
}

impl Plan {
    fn new(busy: Busy, effects: Vec<Effect>, failure_message: &'static str) -> Self {
        Self {
            busy,
            effects,
            failure_message,
        }
    }

    /// Nothing to do (e.g. re-selecting the current page).
    pub fn noop() -> Self {
        Self::new(Busy::empty(), Vec::new(), "")
    }

    pub fn is_noop(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn has_remote_effects(&self) -> bool {
        self.effects.iter().any(Effect::is_remote)
    }
}

/// Results of effects, folded in by [`apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Directory {
        users: Vec<User>,
        leaderboard: Vec<LeaderboardRow>,
    },
    History(HistoryPage),
    Pagination(Pagination),
    Selection(Option<UserId>),
}

/// Decide which effects `intent` requires given the current state.
///
/// Validation failures never produce effects, so they never reach the network.
pub fn plan(
    state: &SyncState,
    intent: &Intent,
    policy: LimitChangePolicy,
) -> Result<Plan, ValidationError> {
    match intent {
        Intent::Initialize => {
            let first = state.pagination.first_page();
            Ok(Plan::new(
                Busy::empty(),
                vec![
                    Effect::RefreshDirectory,
                    Effect::RefreshHistory(first.query()),
                    Effect::SetPagination(first),
                ],
                "Failed to load data",
            ))
        }
        Intent::ChangePage(page) => {
            if *page == 0 {
                return Err(ValidationError::InvalidPage);
            }
            let mut next = state.pagination;
            if !next.set_page(*page) {
                return Ok(Plan::noop());
            }
            Ok(history_plan(next))
        }
        Intent::ChangeLimit(limit) => {
            let mut next = state.pagination;
            if !next.set_limit(*limit) {
                return Ok(Plan::noop());
            }
            if policy == LimitChangePolicy::ResetToFirst {
                next = next.first_page();
            }
            Ok(history_plan(next))
        }
        Intent::Select(selection) => {
            if let Some(id) = selection
                && state.user(id).is_none()
            {
                return Err(ValidationError::UnknownUser(id.clone()));
            }
            if state.selection == *selection {
                return Ok(Plan::noop());
            }
            Ok(Plan::new(
                Busy::empty(),
                vec![Effect::SetSelection(selection.clone())],
                "",
            ))
        }
        Intent::Add(name) => {
            let name = name.trim();
            if name.is_empty() {
                return Err(ValidationError::EmptyName);
            }
            Ok(Plan::new(
                Busy::empty(),
                vec![
                    Effect::CreateUser {
                        name: name.to_string(),
                    },
                    Effect::RefreshDirectory,
                    Effect::SelectCreatedUser,
                ],
                "Failed to add user",
            ))
        }
        Intent::Claim => {
            let user_id = state.selection.clone().ok_or(ValidationError::NoSelection)?;
            let display_name = state
                .selected_user()
                .map(|user| user.name.clone())
                .unwrap_or_else(|| "User".to_string());
            let first = state.pagination.first_page();

            // The newest claim must be visible: always land on page 1,
            // whatever page was showing before.
            Ok(Plan::new(
                Busy::CLAIMING,
                vec![
                    Effect::Claim {
                        user_id,
                        display_name,
                    },
                    Effect::RefreshDirectory,
                    Effect::RefreshHistory(first.query()),
                    Effect::SetPagination(first),
                ],
                "Failed to claim points",
            ))
        }
    }
}

// The page only moves once its rows are in hand, so a failed read leaves
// the pager and the rows it shows in agreement.
fn history_plan(next: Pagination) -> Plan {
    Plan::new(
        Busy::empty(),
        vec![
            Effect::RefreshHistory(next.query()),
            Effect::SetPagination(next),
        ],
        "Failed to load history",
    )
}

/// Fold one outcome into the state, returning what changed.
pub fn apply(state: &mut SyncState, outcome: Outcome) -> RefreshScope {
    match outcome {
        Outcome::Directory { users, leaderboard } => {
            let mut scope = RefreshScope::DIRECTORY;
            state.users = users;
            state.leaderboard = leaderboard;

            if let Some(id) = &state.selection
                && state.user(id).is_none()
            {
                state.selection = None;
                scope |= RefreshScope::SELECTION;
            }
            scope
        }
        Outcome::History(page) => {
            state.history = page;
            RefreshScope::HISTORY
        }
        Outcome::Pagination(pagination) => {
            if state.pagination == pagination {
                return RefreshScope::empty();
            }
            state.pagination = pagination;
            RefreshScope::PAGINATION
        }
        Outcome::Selection(selection) => {
            if let Some(id) = &selection
                && state.user(id).is_none()
            {
                tracing::warn!("Ignoring selection of {} which is not in the user list", id);
                return RefreshScope::empty();
            }
            if state.selection == selection {
                return RefreshScope::empty();
            }
            state.selection = selection;
            RefreshScope::SELECTION
        }
    }
}
