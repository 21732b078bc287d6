//! Public runtime API surface.
//!
//! Gathers the types exposed to frontends so the rest of the crate can stay
//! focused on the worker and the pure refresh rules.

pub mod errors;
pub mod handle;

pub use errors::{Result, RuntimeError, ValidationError};
pub use handle::RuntimeHandle;
