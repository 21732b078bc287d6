//! Key hints for the current mode.

use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{presentation::theme::RatatuiTheme, state::AppState};

const NORMAL_HINTS: &[(&str, &str)] = &[
    ("↑/↓", "select"),
    ("c", "claim"),
    ("a", "add user"),
    ("←/→", "page"),
    ("r", "rows per page"),
    ("q", "quit"),
];

const INPUT_HINTS: &[(&str, &str)] = &[("Enter", "add"), ("Esc", "cancel")];

pub fn render(frame: &mut Frame, area: Rect, app_state: &AppState, theme: &RatatuiTheme) {
    let hints = if app_state.is_adding() {
        INPUT_HINTS
    } else {
        NORMAL_HINTS
    };

    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(format!(" {key} "), theme.style_control(true)),
                Span::styled(format!("{label} "), theme.style_label()),
            ]
        })
        .collect();

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
