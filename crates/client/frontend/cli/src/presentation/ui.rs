//! UI rendering with the ViewModel.
//!
//! This module provides the main render entry point that composes all widgets
//! to create the complete terminal UI.
use anyhow::Result;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::{
    presentation::{terminal::Tui, theme::RatatuiTheme, widgets},
    state::AppState,
};
use client_frontend_core::view_model::ViewModel;

/// Rendering context containing all state and configuration needed for UI rendering.
pub struct RenderContext<'a> {
    pub view_model: &'a ViewModel,
    pub app_state: &'a AppState,
    pub message_panel_height: u16,
}

/// Render the terminal UI.
pub fn render_with_view_model(terminal: &mut Tui, ctx: &RenderContext) -> Result<()> {
    let theme = RatatuiTheme;

    terminal.draw(|frame| render_dashboard(frame, ctx, &theme))?;

    Ok(())
}

/// Header on top, leaderboard and history side by side, then the add-user
/// input, messages and key hints.
fn render_dashboard(frame: &mut Frame, ctx: &RenderContext, theme: &RatatuiTheme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                            // Header
            Constraint::Min(8),                               // Boards
            Constraint::Length(3),                            // Add user
            Constraint::Length(ctx.message_panel_height + 2), // Messages
            Constraint::Length(1),                            // Footer
        ])
        .split(frame.area());

    widgets::header::render(frame, chunks[0], &ctx.view_model.header, theme);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(columns[0]);

    widgets::controls::render(frame, left[0], &ctx.view_model.controls, theme);
    widgets::leaderboard::render(frame, left[1], &ctx.view_model.leaderboard, theme);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(columns[1]);

    widgets::history::render(frame, right[0], &ctx.view_model.history, theme);
    widgets::pager::render(frame, right[1], &ctx.view_model.pager, theme);

    widgets::add_user::render(frame, chunks[2], ctx.app_state.input(), theme);

    widgets::messages::render(
        frame,
        chunks[3],
        &ctx.view_model.messages,
        ctx.message_panel_height,
        theme,
    );

    widgets::footer::render(frame, chunks[4], ctx.app_state, theme);
}
