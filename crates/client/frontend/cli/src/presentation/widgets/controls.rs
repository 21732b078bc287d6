//! Selection and claim controls.

use client_frontend_core::view_model::ControlsView;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::presentation::theme::RatatuiTheme;

pub fn render(frame: &mut Frame, area: Rect, controls: &ControlsView, theme: &RatatuiTheme) {
    let selected = match &controls.selected_name {
        Some(name) => Span::styled(name.clone(), theme.style_value()),
        None => Span::styled("Select user...", theme.style_placeholder()),
    };

    let text = vec![
        Line::from(vec![Span::styled("User: ", theme.style_label()), selected]),
        Line::from(Span::styled(
            format!("[c] {}", controls.claim_label),
            theme.style_control(controls.claim_enabled),
        )),
        Line::from(Span::styled(ControlsView::HINT, theme.style_placeholder())),
    ];

    let paragraph = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Select user & claim points"),
    );

    frame.render_widget(paragraph, area);
}
