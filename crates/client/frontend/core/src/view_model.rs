//! View-model snapshots derived from [`runtime::SyncState`].
//!
//! Everything a renderer needs is precomputed here so widgets stay free of
//! pager arithmetic and enablement rules.
use chrono::Local;
use client_gateway_core::{HistoryEntry, UserId};
use runtime::SyncState;

use crate::message::{MessageEntry, MessageLog};

/// High-level snapshot of the client used by presentation layers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewModel {
    pub header: HeaderView,
    pub controls: ControlsView,
    pub leaderboard: Vec<LeaderboardRowView>,
    pub history: HistoryView,
    pub pager: PagerView,
    pub messages: Vec<MessageEntry>,
}

impl ViewModel {
    pub fn from_snapshot(state: &SyncState, messages: &MessageLog, message_limit: usize) -> Self {
        Self {
            header: HeaderView::from_state(state),
            controls: ControlsView::from_state(state),
            leaderboard: LeaderboardRowView::collect(state),
            history: HistoryView::from_state(state),
            pager: PagerView::from_state(state),
            messages: messages.recent(message_limit).cloned().collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderView {
    pub users: usize,
    /// Server-side count of every claim, not just the visible page.
    pub total_claims: u64,
}

impl HeaderView {
    fn from_state(state: &SyncState) -> Self {
        Self {
            users: state.users.len(),
            total_claims: state.history.total,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControlsView {
    pub selected: Option<UserId>,
    pub selected_name: Option<String>,
    pub claim_label: String,
    pub claim_enabled: bool,
    pub claiming: bool,
}

impl ControlsView {
    pub const HINT: &'static str = "Awards 1–10 points randomly.";

    fn from_state(state: &SyncState) -> Self {
        let selected_name = state.selected_user().map(|user| user.name.clone());
        let claiming = state.is_claiming();
        let claim_label = if claiming {
            "Claiming…".to_string()
        } else {
            format!("Claim for {}", selected_name.as_deref().unwrap_or("User"))
        };

        Self {
            selected: state.selection.clone(),
            claim_enabled: state.selection.is_some() && !claiming,
            selected_name,
            claim_label,
            claiming,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardRowView {
    pub rank: u32,
    pub user_id: UserId,
    pub name: String,
    pub total_points: u64,
    pub selected: bool,
}

impl LeaderboardRowView {
    /// Rows in server order; the client never re-sorts.
    fn collect(state: &SyncState) -> Vec<Self> {
        state
            .leaderboard
            .iter()
            .map(|row| Self {
                rank: row.rank,
                selected: state.selection.as_ref() == Some(&row.user_id),
                user_id: row.user_id.clone(),
                name: row.name.clone(),
                total_points: row.total_points,
            })
            .collect()
    }
}

/// Colour bucket for a claim's `+points` badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BadgeTier {
    /// 8 and above.
    High,
    /// 4 to 7.
    Medium,
    Low,
}

impl BadgeTier {
    pub fn for_points(points: u8) -> Self {
        match points {
            8.. => BadgeTier::High,
            4..=7 => BadgeTier::Medium,
            _ => BadgeTier::Low,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRowView {
    pub user_name: String,
    /// Local time, e.g. `2025-01-02 04:04:05`.
    pub timestamp: String,
    pub points: u8,
    pub badge: BadgeTier,
}

impl From<&HistoryEntry> for HistoryRowView {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            user_name: entry.user_name.clone(),
            timestamp: entry
                .timestamp
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            points: entry.points,
            badge: BadgeTier::for_points(entry.points),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryView {
    pub page: u32,
    pub total_pages: u32,
    pub loading: bool,
    pub rows: Vec<HistoryRowView>,
}

impl HistoryView {
    pub const LOADING_TEXT: &'static str = "Loading…";
    pub const EMPTY_TEXT: &'static str = "No claims yet.";

    fn from_state(state: &SyncState) -> Self {
        Self {
            page: state.pagination.page(),
            total_pages: total_pages(state.history.total, state.pagination.limit().rows()),
            loading: state.is_history_loading(),
            rows: state.history.items.iter().map(HistoryRowView::from).collect(),
        }
    }

    /// `Page p / P`
    pub fn title(&self) -> String {
        format!("Page {} / {}", self.page, self.total_pages)
    }

    /// Placeholder shown instead of rows, if any.
    pub fn placeholder(&self) -> Option<&'static str> {
        if self.loading {
            Some(Self::LOADING_TEXT)
        } else if self.rows.is_empty() {
            Some(Self::EMPTY_TEXT)
        } else {
            None
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PagerView {
    pub page: u32,
    pub total_pages: u32,
    pub total: u64,
    pub per_page: u32,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

impl PagerView {
    pub fn from_state(state: &SyncState) -> Self {
        let page = state.pagination.page();
        let per_page = state.pagination.limit().rows();
        let total = state.history.total;
        let total_pages = total_pages(total, per_page);
        let loading = state.is_history_loading();

        Self {
            page,
            total_pages,
            total,
            per_page,
            prev_enabled: page > 1 && !loading,
            next_enabled: page < total_pages && !loading,
        }
    }

    pub fn prev_page(&self) -> Option<u32> {
        self.prev_enabled.then(|| self.page - 1)
    }

    pub fn next_page(&self) -> Option<u32> {
        self.next_enabled.then(|| self.page + 1)
    }
}

/// `max(1, ceil(total / limit))`
pub fn total_pages(total: u64, limit: u32) -> u32 {
    let limit = u64::from(limit.max(1));
    let pages = total.div_ceil(limit).max(1);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use client_gateway_core::{HistoryPage, LeaderboardRow, User};
    use runtime::{Busy, PageSize};

    use super::*;

    fn state() -> SyncState {
        let mut state = SyncState::new(PageSize::Five);
        state.users = vec![
            User {
                id: UserId::from("u1"),
                name: "Ada".into(),
                total_points: 23,
            },
            User {
                id: UserId::from("u2"),
                name: "Bo".into(),
                total_points: 4,
            },
        ];
        state.leaderboard = vec![
            LeaderboardRow {
                rank: 1,
                user_id: UserId::from("u1"),
                name: "Ada".into(),
                total_points: 23,
            },
            LeaderboardRow {
                rank: 2,
                user_id: UserId::from("u2"),
                name: "Bo".into(),
                total_points: 4,
            },
        ];
        state.history = HistoryPage {
            items: [9u8, 5, 2]
                .iter()
                .enumerate()
                .map(|(i, &points)| HistoryEntry {
                    id: format!("h{i}"),
                    user_id: UserId::from("u1"),
                    user_name: "Ada".into(),
                    points,
                    timestamp: Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap(),
                })
                .collect(),
            total: 12,
        };
        state
    }

    fn view(state: &SyncState) -> ViewModel {
        ViewModel::from_snapshot(state, &MessageLog::new(4), 4)
    }

    #[test]
    fn total_pages_is_at_least_one() {
        assert_eq!(total_pages(0, 5), 1);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(12, 5), 3);
        assert_eq!(total_pages(12, 20), 1);
    }

    #[test]
    fn pager_bounds_follow_page_and_loading() {
        let mut state = state();
        let pager = view(&state).pager;
        assert!(!pager.prev_enabled);
        assert_eq!(pager.next_page(), Some(2));

        state.pagination.set_page(3);
        let pager = view(&state).pager;
        assert_eq!(pager.prev_page(), Some(2));
        assert!(!pager.next_enabled);

        state.pagination.set_page(2);
        state.busy = Busy::HISTORY_LOADING;
        let pager = view(&state).pager;
        assert!(!pager.prev_enabled && !pager.next_enabled);
    }

    #[test]
    fn claim_control_reflects_selection_and_busy() {
        let mut state = state();
        let controls = view(&state).controls;
        assert_eq!(controls.claim_label, "Claim for User");
        assert!(!controls.claim_enabled);

        state.selection = Some(UserId::from("u1"));
        let controls = view(&state).controls;
        assert_eq!(controls.claim_label, "Claim for Ada");
        assert!(controls.claim_enabled);

        state.busy = Busy::CLAIMING;
        let controls = view(&state).controls;
        assert_eq!(controls.claim_label, "Claiming…");
        assert!(!controls.claim_enabled);
    }

    #[test]
    fn badges_are_tiered() {
        let tiers: Vec<_> = view(&state()).history.rows.iter().map(|r| r.badge).collect();
        assert_eq!(
            tiers,
            vec![BadgeTier::High, BadgeTier::Medium, BadgeTier::Low]
        );
        assert_eq!(BadgeTier::for_points(8), BadgeTier::High);
        assert_eq!(BadgeTier::for_points(4), BadgeTier::Medium);
        assert_eq!(BadgeTier::for_points(3), BadgeTier::Low);
    }

    #[test]
    fn header_counts_users_and_all_claims() {
        let header = view(&state()).header;
        assert_eq!(header.users, 2);
        assert_eq!(header.total_claims, 12);
    }

    #[test]
    fn history_placeholder_prefers_loading() {
        let mut state = state();
        assert_eq!(view(&state).history.placeholder(), None);
        assert_eq!(view(&state).history.title(), "Page 1 / 3");

        state.history = HistoryPage::default();
        assert_eq!(view(&state).history.placeholder(), Some("No claims yet."));

        state.busy = Busy::HISTORY_LOADING;
        assert_eq!(view(&state).history.placeholder(), Some("Loading…"));
    }

    #[test]
    fn selected_row_is_marked() {
        let mut state = state();
        state.selection = Some(UserId::from("u2"));
        let rows = view(&state).leaderboard;
        assert!(!rows[0].selected);
        assert!(rows[1].selected);
    }
}
