//! Prev/Next controls and page counters under the history feed.

use client_frontend_core::view_model::PagerView;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::presentation::theme::RatatuiTheme;

pub fn render(frame: &mut Frame, area: Rect, pager: &PagerView, theme: &RatatuiTheme) {
    let line = Line::from(vec![
        Span::styled("‹ Prev", theme.style_control(pager.prev_enabled)),
        Span::raw("   "),
        Span::styled("Total: ", theme.style_label()),
        Span::styled(pager.total.to_string(), theme.style_value()),
        Span::raw("  "),
        Span::styled("Per page: ", theme.style_label()),
        Span::styled(pager.per_page.to_string(), theme.style_value()),
        Span::raw("   "),
        Span::styled("Next ›", theme.style_control(pager.next_enabled)),
    ]);

    let paragraph = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}
