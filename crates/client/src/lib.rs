//! Top-level client orchestrating the Runtime and Frontend layers.
//!
//! # Architecture
//!
//! ```text
//! Client (Top-level container)
//!   ├─→ Runtime (sync worker, snapshot and event bus)
//!   └─→ Frontend (UI layer - CLI, GUI, etc.)
//! ```
//!
//! # Separation of Concerns
//!
//! - **Client**: Composition root, lifecycle management, layer coordination
//! - **Runtime**: Intent sequencing, server reads and writes, event emission
//! - **Frontend**: User interaction, event consumption, rendering (via RuntimeHandle only)

mod builder;

pub use builder::ClientBuilder;

// Re-export Frontend trait from client-frontend-core
pub use client_frontend_core::Frontend;

use anyhow::{Context, Result};
use runtime::Intent;

/// Top-level client container.
///
/// # Lifecycle
///
/// 1. Client::builder() collects the independently built layers
/// 2. Client::run() queues the initial load
/// 3. Client::run() transfers control to frontend (blocking)
/// 4. On frontend exit, the runtime worker drains and stops, or is aborted
///    once its shutdown grace period runs out
pub struct Client {
    runtime: runtime::Runtime,
    frontend: Box<dyn Frontend>,
    initialize: bool,
}

impl Client {
    /// Create a new ClientBuilder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Run the client until the frontend returns.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The runtime stopped before the initial load could be queued
    /// - Frontend execution fails
    /// - The runtime worker panicked
    pub async fn run(self) -> Result<()> {
        let Client {
            runtime,
            mut frontend,
            initialize,
        } = self;

        let handle = runtime.handle();

        // The frontend starts right away and renders the loading state while
        // the initial reads run.
        if initialize {
            handle
                .submit(Intent::Initialize)
                .context("failed to queue initial load")?;
        }

        let frontend_result = frontend.run(handle).await;

        tracing::debug!("Frontend returned, shutting down runtime");
        runtime
            .shutdown()
            .await
            .context("runtime worker did not stop cleanly")?;

        frontend_result
    }
}
