//! Ranked user table in server order.

use client_frontend_core::view_model::LeaderboardRowView;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph, Row, Table},
};

use crate::presentation::theme::RatatuiTheme;

pub const EMPTY_TEXT: &str = "No data";

pub fn render(frame: &mut Frame, area: Rect, rows: &[LeaderboardRowView], theme: &RatatuiTheme) {
    let block = Block::default().borders(Borders::ALL).title("Leaderboard");

    if rows.is_empty() {
        let placeholder = Paragraph::new(EMPTY_TEXT)
            .style(theme.style_placeholder())
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let body = rows.iter().map(|row| {
        let style = if row.selected {
            theme.style_selected()
        } else {
            Style::default()
        };
        Row::new(vec![
            format!("#{}", row.rank),
            row.name.clone(),
            row.total_points.to_string(),
        ])
        .style(style)
    });

    let table = Table::new(
        body,
        [
            Constraint::Length(6),
            Constraint::Min(10),
            Constraint::Length(12),
        ],
    )
    .header(
        Row::new(vec!["Rank", "Name", "Total Points"])
            .style(theme.style_label().add_modifier(Modifier::BOLD)),
    )
    .block(block);

    frame.render_widget(table, area);
}
