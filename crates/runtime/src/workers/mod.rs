//! Worker tasks that back the runtime orchestration.
//!
//! The sync worker is the single owner of [`crate::state::SyncState`]; every
//! intent reaches it through the command queue.

mod sync;

pub use sync::{Command, SyncWorker};
