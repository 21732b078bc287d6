//! View state owned by the sync worker and the pure rules that evolve it.

mod pagination;
mod snapshot;
mod transition;

pub use pagination::{LimitChangePolicy, PageSize, Pagination};
pub use snapshot::{Busy, RefreshScope, SyncState};
pub use transition::{Effect, Intent, Outcome, Plan, apply, plan};
