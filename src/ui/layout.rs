//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Tree pane, an open-items line, and a bottom status bar.
pub struct AppLayout {
    pub tree_area: Rect,
    pub tabs_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // tree pane
                Constraint::Length(1), // open items
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            tree_area: chunks[0],
            tabs_area: chunks[1],
            status_area: chunks[2],
        }
    }
}
