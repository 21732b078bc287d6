//! High-level runtime orchestrator.
//!
//! The runtime owns the sync worker, wires up the command queue, the snapshot
//! watch channel and the event bus, and exposes a builder-based API.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::warn;

use client_gateway_core::Gateway;

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::state::{LimitChangePolicy, PageSize, SyncState};
use crate::workers::{Command, SyncWorker};

/// Runtime configuration shared across the orchestrator and worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Initial history page size.
    pub page_size: PageSize,
    pub limit_change_policy: LimitChangePolicy,
    /// How long [`Runtime::shutdown`] lets queued commands finish before the
    /// worker is aborted.
    pub shutdown_grace: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            event_buffer_size: 100,
            command_buffer_size: 32,
            page_size: PageSize::default(),
            limit_change_policy: LimitChangePolicy::default(),
            shutdown_grace: Duration::from_secs(2),
        }
    }
}

impl RuntimeConfig {
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_limit_change_policy(mut self, policy: LimitChangePolicy) -> Self {
        self.limit_change_policy = policy;
        self
    }

    pub fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.shutdown_grace = grace;
        self
    }
}

/// Main runtime that keeps the leaderboard views in sync with the server
///
/// [`RuntimeHandle`] provides a cloneable façade for frontends.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
    shutdown_grace: Duration,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker stops once every outstanding handle clone is dropped, after
    /// finishing the commands already queued. If that takes longer than the
    /// configured grace period (a hung server, say) the worker is aborted and
    /// whatever is still queued is discarded.
    pub async fn shutdown(self) -> Result<()> {
        let Runtime {
            handle,
            mut worker_handle,
            shutdown_grace,
        } = self;
        drop(handle);

        match tokio::time::timeout(shutdown_grace, &mut worker_handle).await {
            Ok(joined) => joined.map_err(RuntimeError::WorkerJoin),
            Err(_) => {
                warn!(
                    grace_ms = shutdown_grace.as_millis() as u64,
                    "SyncWorker still busy after grace period, aborting"
                );
                worker_handle.abort();
                match worker_handle.await {
                    Err(error) if error.is_cancelled() => Ok(()),
                    joined => joined.map_err(RuntimeError::WorkerJoin),
                }
            }
        }
    }
}

/// Builder for [`Runtime`].
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    gateway: Option<Arc<dyn Gateway>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            gateway: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the required gateway
    pub fn gateway(mut self, gateway: Arc<dyn Gateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    /// Build the runtime and spawn its worker
    ///
    /// Must be called from within a tokio runtime.
    pub fn build(self) -> Result<Runtime> {
        let gateway = self.gateway.ok_or(RuntimeError::MissingGateway)?;

        let (command_tx, command_rx) =
            mpsc::channel::<Command>(self.config.command_buffer_size.max(1));
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let initial_state = SyncState::new(self.config.page_size);
        let (snapshot_tx, snapshot_rx) = watch::channel(initial_state.clone());

        let handle = RuntimeHandle::new(command_tx, event_bus.clone(), snapshot_rx);

        let worker = SyncWorker::new(
            initial_state,
            gateway,
            command_rx,
            snapshot_tx,
            event_bus,
            self.config.limit_change_policy,
        );

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            worker_handle,
            shutdown_grace: self.config.shutdown_grace,
        })
    }
}
