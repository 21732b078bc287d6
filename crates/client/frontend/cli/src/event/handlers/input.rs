//! Input handling.

use anyhow::Result;
use client_frontend_core::{EventConsumer, MessageLevel};
use crossterm::event::{self as term_event, Event as TermEvent, KeyEvent, KeyEventKind};
use runtime::{Intent, RuntimeError};
use tokio::time::Duration;

use super::super::EventLoop;
use crate::{input::KeyAction, presentation::terminal::Tui};

impl<C> EventLoop<C>
where
    C: EventConsumer,
{
    /// Poll for keyboard input and handle UI interactions.
    pub(in crate::event) fn handle_input_tick(&mut self, terminal: &mut Tui) -> Result<bool> {
        if !term_event::poll(Duration::from_millis(0))? {
            return Ok(false);
        }

        match term_event::read()? {
            TermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                self.handle_key_press(key, terminal)
            }
            TermEvent::Resize(_, _) => {
                self.render(terminal)?;
                Ok(false)
            }
            _ => Ok(false),
        }
    }

    /// Handle key press and dispatch to appropriate handler.
    pub(in crate::event) fn handle_key_press(
        &mut self,
        key: KeyEvent,
        terminal: &mut Tui,
    ) -> Result<bool> {
        match self.input.handle_key(key, &mut self.app_state, &self.snapshot) {
            KeyAction::Quit => {
                self.consumer
                    .message_log_mut()
                    .push_text("Quitting...", MessageLevel::Info);
                self.render(terminal)?;
                Ok(true)
            }
            KeyAction::Submit(intent) => {
                let quit = self.submit(intent);
                self.render(terminal)?;
                Ok(quit)
            }
            KeyAction::Redraw => {
                self.render(terminal)?;
                Ok(false)
            }
            KeyAction::None => Ok(false),
        }
    }

    /// Hand the intent to the runtime without waiting for its outcome.
    ///
    /// Outcomes arrive later as snapshot refreshes and notifications.
    fn submit(&mut self, intent: Intent) -> bool {
        tracing::debug!(intent = intent.label(), "Submitting intent");

        match self.handle.submit(intent) {
            Ok(()) => false,
            Err(RuntimeError::CommandQueueFull) => {
                self.consumer
                    .message_log_mut()
                    .push_text("Still working, try again", MessageLevel::Warning);
                false
            }
            Err(error) => {
                tracing::error!("Runtime unavailable: {}", error);
                true
            }
        }
    }
}
