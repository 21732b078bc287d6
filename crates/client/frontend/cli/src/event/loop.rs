//! Event loop orchestrating runtime events, user input, and rendering.
//!
//! This module coordinates three main concerns:
//! - Runtime event consumption and snapshot refreshes
//! - Keyboard input processing
//! - Rendering the latest snapshot

use anyhow::Result;
use runtime::{Event as RuntimeEvent, RuntimeHandle, SyncEvent, SyncState, Topic};
use tokio::{
    sync::{broadcast, broadcast::error::RecvError},
    time::{self, Duration},
};

use crate::{config::CliConfig, input::InputHandler, presentation::terminal::Tui, state::AppState};
use client_frontend_core::{EventConsumer, EventImpact};

const FRAME_INTERVAL_MS: u64 = 16;

/// Event loop owning the latest snapshot and coordinating UI updates.
///
/// The runtime is the single source of truth: the loop never edits the
/// snapshot, it only replaces it with a fresh one whenever a sync event
/// requests a redraw.
pub struct EventLoop<C>
where
    C: EventConsumer,
{
    pub(crate) sync_rx: broadcast::Receiver<RuntimeEvent>,
    pub(crate) notification_rx: broadcast::Receiver<RuntimeEvent>,
    pub(crate) handle: RuntimeHandle,
    pub(crate) input: InputHandler,
    pub(crate) consumer: C,
    pub(crate) app_state: AppState,
    pub(crate) snapshot: SyncState,
    pub(crate) cli_config: CliConfig,
}

impl<C> EventLoop<C>
where
    C: EventConsumer,
{
    /// Subscribes before the first snapshot is taken so no update falls
    /// between the two.
    pub fn new(handle: RuntimeHandle, consumer: C, cli_config: CliConfig) -> Self {
        let sync_rx = handle.subscribe(Topic::Sync);
        let notification_rx = handle.subscribe(Topic::Notification);
        let snapshot = handle.snapshot();

        Self {
            sync_rx,
            notification_rx,
            handle,
            input: InputHandler::new(),
            consumer,
            app_state: AppState::new(),
            snapshot,
            cli_config,
        }
    }

    pub async fn run(mut self, terminal: &mut Tui) -> Result<C> {
        self.render(terminal)?;

        loop {
            tokio::select! {
                result = self.sync_rx.recv() => {
                    if self.handle_runtime_event(result, terminal)? {
                        break;
                    }
                }
                result = self.notification_rx.recv() => {
                    if self.handle_runtime_event(result, terminal)? {
                        break;
                    }
                }
                _ = time::sleep(Duration::from_millis(FRAME_INTERVAL_MS)) => {
                    if self.handle_input_tick(terminal)? {
                        break;
                    }
                }
            }
        }

        Ok(self.consumer)
    }

    /// Handle a runtime event and refresh the snapshot when needed.
    fn handle_runtime_event(
        &mut self,
        result: Result<RuntimeEvent, RecvError>,
        terminal: &mut Tui,
    ) -> Result<bool> {
        match result {
            Ok(event) => {
                let impact = self
                    .consumer
                    .on_event(&event)
                    .combine(self.track_added_user(&event));
                if impact.requires_redraw {
                    self.snapshot = self.handle.snapshot();
                    self.render(terminal)?;
                }
                Ok(false)
            }
            Err(RecvError::Closed) => {
                tracing::warn!("Event stream closed");
                Ok(true)
            }
            Err(RecvError::Lagged(skipped)) => {
                // The snapshot is always current, only intermediate events were lost.
                tracing::warn!("Dropped {} stale events", skipped);
                self.snapshot = self.handle.snapshot();
                self.render(terminal)?;
                Ok(false)
            }
        }
    }

    /// Close the add-user input once the server confirms the name typed there.
    fn track_added_user(&mut self, event: &RuntimeEvent) -> EventImpact {
        match event {
            RuntimeEvent::Sync(SyncEvent::UserCreated { name, .. })
                if self.app_state.user_added(name) =>
            {
                EventImpact::redraw()
            }
            _ => EventImpact::none(),
        }
    }
}
