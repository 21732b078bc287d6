//! Header widget displaying the title and aggregate counters.

use client_frontend_core::view_model::HeaderView;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::presentation::theme::RatatuiTheme;

pub const TITLE: &str = "Claim Points & Dynamic Ranking";

/// Render the header panel with user and claim totals.
pub fn render(frame: &mut Frame, area: Rect, header: &HeaderView, theme: &RatatuiTheme) {
    let text = vec![Line::from(vec![
        Span::styled("Users: ", theme.style_label()),
        Span::styled(header.users.to_string(), theme.style_value()),
        Span::raw(" | "),
        Span::styled("Total Claims: ", theme.style_label()),
        Span::styled(
            header.total_claims.to_string(),
            Style::default().fg(Color::LightGreen),
        ),
    ])];

    let paragraph = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                TITLE,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    frame.render_widget(paragraph, area);
}
