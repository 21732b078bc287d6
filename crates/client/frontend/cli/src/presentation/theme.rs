//! Ratatui styling for the terminal UI.
//!
//! Widgets ask the theme for styles instead of hard-coding colours so the
//! palette stays consistent across panels.

use client_frontend_core::{message::MessageLevel, view_model::BadgeTier};
use ratatui::style::{Color, Modifier, Style};

/// Ratatui-specific theme.
pub struct RatatuiTheme;

impl RatatuiTheme {
    pub fn new() -> Self {
        Self
    }

    pub fn style_message(&self, level: MessageLevel) -> Style {
        match level {
            MessageLevel::Info => Style::default().fg(Color::White),
            MessageLevel::Success => Style::default().fg(Color::LightGreen),
            MessageLevel::Warning => Style::default().fg(Color::Yellow),
            MessageLevel::Error => Style::default().fg(Color::LightRed),
        }
    }

    pub fn style_badge(&self, tier: BadgeTier) -> Style {
        let color = match tier {
            BadgeTier::High => Color::LightGreen,
            BadgeTier::Medium => Color::Yellow,
            BadgeTier::Low => Color::Gray,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    /// Style for a key-driven control such as the claim button or pager arrows.
    pub fn style_control(&self, enabled: bool) -> Style {
        if enabled {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    pub fn style_selected(&self) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn style_label(&self) -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn style_value(&self) -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn style_placeholder(&self) -> Style {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC)
    }
}

impl Default for RatatuiTheme {
    fn default() -> Self {
        Self::new()
    }
}
