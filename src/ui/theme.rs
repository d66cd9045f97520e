//! Colour handling and text styles used across the UI.

use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};

use crate::config::LineStyle;

/// Parse a CSS-ish colour (`#rgb`, `#rrggbb`, or a named colour) into a
/// terminal colour.
pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        if hex.len() == 3 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
            return Color::from_str(&format!("#{expanded}")).ok();
        }
    }
    Color::from_str(value).ok()
}

/// Connector glyph for a line style.
pub fn line_glyph(style: LineStyle) -> &'static str {
    match style {
        LineStyle::Solid => "│",
        LineStyle::Dashed => "╎",
        LineStyle::Dotted => "┊",
    }
}

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── tree view ──────────────────────────────────────────────
    pub fn dir_style() -> Style {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    }

    pub fn file_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn selected_style() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    /// Marker beside items that are currently open.
    pub fn open_marker_style() -> Style {
        Style::default().fg(Color::Green)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn tabs_style() -> Style {
        Style::default().fg(Color::Yellow)
    }
}
