//! Widget modules for UI rendering.
//!
//! Each widget is a pure function that reads a piece of the ViewModel and
//! renders it to a terminal frame:
//! - Read-only access to ViewModel (immutable)
//! - No side effects or state mutations
//! - Styling comes from [`RatatuiTheme`](super::theme::RatatuiTheme)

pub mod add_user;
pub mod controls;
pub mod footer;
pub mod header;
pub mod history;
pub mod leaderboard;
pub mod messages;
pub mod pager;
