//! Single-line input for creating a user.

use ratatui::{
    Frame,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::presentation::theme::RatatuiTheme;

pub const PLACEHOLDER: &str = "Enter user name";

/// `input` is `Some` while the user is typing.
pub fn render(frame: &mut Frame, area: Rect, input: Option<&str>, theme: &RatatuiTheme) {
    let line = match input {
        Some("") => Line::from(Span::styled(PLACEHOLDER, theme.style_placeholder())),
        Some(text) => Line::from(text.to_string()),
        None => Line::from(Span::styled("Press [a] to add a user", theme.style_label())),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Add user")
        .border_style(theme.style_control(input.is_some()));

    frame.render_widget(Paragraph::new(line).block(block), area);

    if let Some(text) = input {
        let offset = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(offset)
            .min(area.right().saturating_sub(2));
        frame.set_cursor_position(Position::new(x, area.y + 1));
    }
}
