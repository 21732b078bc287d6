//! Paged claim feed with tiered point badges.

use client_frontend_core::view_model::HistoryView;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::presentation::theme::RatatuiTheme;

pub fn render(frame: &mut Frame, area: Rect, history: &HistoryView, theme: &RatatuiTheme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Recent Claims")
        .title(Line::from(history.title()).alignment(Alignment::Right));

    if let Some(placeholder) = history.placeholder() {
        let paragraph = Paragraph::new(placeholder)
            .style(theme.style_placeholder())
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = history
        .rows
        .iter()
        .map(|row| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("+{:<3}", row.points), theme.style_badge(row.badge)),
                Span::raw(row.user_name.clone()),
                Span::styled(format!("  {}", row.timestamp), theme.style_label()),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
