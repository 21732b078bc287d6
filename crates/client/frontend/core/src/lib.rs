//! Cross-frontend primitives for presenting the leaderboard.
//!
//! Houses message logging, event handling, and view-model types that the
//! terminal client and any future graphical client can reuse.
pub mod config;
pub mod event;
pub mod frontend;
pub mod message;
pub mod view_model;

pub use config::{FrontendConfig, MessageConfig};
pub use event::{EventConsumer, EventImpact};
pub use frontend::Frontend;
pub use message::{MessageEntry, MessageLevel, MessageLog};
pub use view_model::{
    BadgeTier, ControlsView, HeaderView, HistoryRowView, HistoryView, LeaderboardRowView,
    PagerView, ViewModel,
};
