//! Glue code tying the runtime handle and the terminal UI together.
use anyhow::Result;
use async_trait::async_trait;

use runtime::RuntimeHandle;

use crate::config::CliConfig;
use crate::event::{CliEventConsumer, EventLoop};
use crate::presentation::terminal;
use client_frontend_core::{
    FrontendConfig,
    frontend::Frontend,
    message::{MessageLevel, MessageLog},
};

/// Terminal frontend. Owns no runtime state; everything flows through the
/// [`RuntimeHandle`] passed to [`Frontend::run`].
pub struct CliFrontend {
    frontend_config: FrontendConfig,
    cli_config: CliConfig,
}

impl CliFrontend {
    pub fn new(frontend_config: FrontendConfig, cli_config: CliConfig) -> Self {
        Self {
            frontend_config,
            cli_config,
        }
    }
}

#[async_trait]
impl Frontend for CliFrontend {
    async fn run(&mut self, handle: RuntimeHandle) -> Result<()> {
        tracing::info!("CLI frontend starting...");

        let mut messages = MessageLog::new(self.frontend_config.messages.capacity);
        messages.push_text(
            "Select a user, award random points, and see the leaderboard update instantly.",
            MessageLevel::Info,
        );

        let consumer = CliEventConsumer::new(messages);
        let event_loop = EventLoop::new(handle, consumer, self.cli_config.clone());

        let mut terminal = terminal::init()?;
        let _guard = terminal::TerminalGuard;

        let _consumer = event_loop.run(&mut terminal).await?;

        terminal::restore()?;
        tracing::info!("CLI frontend exiting");

        Ok(())
    }
}
