//! Runtime orchestration for the leaderboard client.
//!
//! This crate keeps the users list, the leaderboard and the paged claim
//! history consistent with the server. Frontends embed [`Runtime`], dispatch
//! [`Intent`]s through [`RuntimeHandle`] and render the [`SyncState`]
//! snapshots it publishes.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`state`] holds the view state and the pure refresh rules
//! - `workers` keeps the background task internal to the crate
pub mod api;
pub mod events;
pub mod runtime;
pub mod state;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle, ValidationError};
pub use events::{Event, EventBus, Notification, NotificationLevel, SyncEvent, Topic};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use state::{
    Busy, Effect, Intent, LimitChangePolicy, Outcome, PageSize, Pagination, Plan, RefreshScope,
    SyncState,
};
