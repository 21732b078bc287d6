//! Orchestrator-owned state and change tracking.

use bitflags::bitflags;

use client_gateway_core::{HistoryPage, LeaderboardRow, User, UserId};

use super::pagination::{PageSize, Pagination};

bitflags! {
    /// Operations currently in flight that the UI should reflect.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Busy: u8 {
        /// A claim write and its dependent refreshes are running.
        const CLAIMING        = 0b0000_0001;
        /// A history page read is running.
        const HISTORY_LOADING = 0b0000_0010;
    }
}

bitflags! {
    /// Which parts of [`SyncState`] an update touched.
    ///
    /// Frontends use it to skip redrawing unchanged panels.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct RefreshScope: u32 {
        const USERS       = 0b0000_0001;
        const LEADERBOARD = 0b0000_0010;
        const HISTORY     = 0b0000_0100;
        const SELECTION   = 0b0000_1000;
        const PAGINATION  = 0b0001_0000;
        const BUSY        = 0b0010_0000;

        /// Both lists affected by add and claim.
        const DIRECTORY = Self::USERS.bits() | Self::LEADERBOARD.bits();

        const ALL = Self::DIRECTORY.bits()
                  | Self::HISTORY.bits()
                  | Self::SELECTION.bits()
                  | Self::PAGINATION.bits()
                  | Self::BUSY.bits();
    }
}

/// Everything the presentation layer renders.
///
/// Owned exclusively by the sync worker; frontends receive clones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncState {
    pub users: Vec<User>,
    pub leaderboard: Vec<LeaderboardRow>,
    pub history: HistoryPage,
    /// Always empty or the id of an entry in `users`.
    pub selection: Option<UserId>,
    pub pagination: Pagination,
    pub busy: Busy,
}

impl SyncState {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            pagination: Pagination::new(page_size),
            ..Self::default()
        }
    }

    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|user| &user.id == id)
    }

    pub fn selected_user(&self) -> Option<&User> {
        self.selection.as_ref().and_then(|id| self.user(id))
    }

    pub fn is_claiming(&self) -> bool {
        self.busy.contains(Busy::CLAIMING)
    }

    pub fn is_history_loading(&self) -> bool {
        self.busy.contains(Busy::HISTORY_LOADING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, name: &str) -> User {
        User {
            id: UserId::from(id),
            name: name.to_string(),
            total_points: 0,
        }
    }

    #[test]
    fn selected_user_resolves_through_users() {
        let mut state = SyncState::new(PageSize::Ten);
        state.users = vec![user("u1", "Ada"), user("u2", "Bo")];
        state.selection = Some(UserId::from("u2"));

        assert_eq!(state.selected_user().map(|u| u.name.as_str()), Some("Bo"));
        assert_eq!(state.pagination.limit(), PageSize::Ten);
    }

    #[test]
    fn new_state_is_idle() {
        let state = SyncState::default();
        assert!(!state.is_claiming());
        assert!(!state.is_history_loading());
        assert_eq!(state.pagination.page(), 1);
    }

    #[test]
    fn directory_scope_covers_both_lists() {
        assert!(RefreshScope::DIRECTORY.contains(RefreshScope::USERS));
        assert!(RefreshScope::DIRECTORY.contains(RefreshScope::LEADERBOARD));
        assert!(!RefreshScope::DIRECTORY.intersects(RefreshScope::HISTORY));
    }
}
