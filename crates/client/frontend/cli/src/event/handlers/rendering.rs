//! Rendering handlers.

use anyhow::Result;
use client_frontend_core::{EventConsumer, view_model::ViewModel};

use super::super::EventLoop;
use crate::presentation::{terminal::Tui, ui};

impl<C> EventLoop<C>
where
    C: EventConsumer,
{
    /// Render the current snapshot.
    pub(in crate::event) fn render(&mut self, terminal: &mut Tui) -> Result<()> {
        let message_panel_height = self.cli_config.ui.message_panel_height;
        let view_model = ViewModel::from_snapshot(
            &self.snapshot,
            self.consumer.message_log(),
            message_panel_height as usize,
        );

        let ctx = ui::RenderContext {
            view_model: &view_model,
            app_state: &self.app_state,
            message_panel_height,
        };

        ui::render_with_view_model(terminal, &ctx)
    }
}
