//! Custom Ratatui widget that renders a [`DirTree`] with depth-coloured
//! connector lines.
//!
//! The widget reads the same [`MemoryDocument`] the focus controller marks:
//! titles are dimmed only while the focus-mode root class is present and the
//! row lacks the focused class, the way the generated stylesheet behaves in
//! a browser.  Connector colours follow the depth rules, including the
//! `MAX_DEPTH` cap.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, StatefulWidget, Widget},
};

use crate::app::document::MemoryDocument;
use crate::app::state::OpenItems;
use crate::config::FocusConfig;
use crate::core::depth_style::{FOCUSED_CLASS, FOCUS_MODE_CLASS, MAX_DEPTH};
use crate::core::tree::DirTree;

use super::theme::{line_glyph, parse_color, Theme};

/// Used when a configured colour cannot be shown in the terminal.
const FALLBACK_COLOR: Color = Color::DarkGray;

// ───────────────────────────────────────── state ─────────────

/// Persistent state for the tree widget (selected index, scroll offset).
#[derive(Debug, Default)]
pub struct TreeWidgetState {
    /// Index into the *visible* flat list that is currently highlighted.
    pub selected: usize,
    /// Vertical scroll offset (first visible row).
    pub offset: usize,
}

impl TreeWidgetState {
    pub fn select_next(&mut self, max: usize) {
        if max > 0 && self.selected < max - 1 {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Ensure the selected row is visible within the viewport of `height` rows.
    pub fn clamp_scroll(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + height {
            self.offset = self.selected - height + 1;
        }
    }
}

// ───────────────────────────────────────── row pieces ────────

/// One connector per enclosing children container.  Level `k` uses
/// `colors[k mod len]`; levels at or past [`MAX_DEPTH`] match the deepest
/// rule and reuse its colour.
pub fn connector_spans(depth: usize, config: &FocusConfig) -> Vec<Span<'static>> {
    let glyph = line_glyph(config.line_style);
    (0..depth)
        .map(|level| {
            let styled = level.min(MAX_DEPTH - 1);
            let color = parse_color(config.color_for_depth(styled)).unwrap_or(FALLBACK_COLOR);
            Span::styled(format!("{glyph} "), Style::default().fg(color))
        })
        .collect()
}

/// Style of a row title given the document's focus marks.
pub fn title_style(document: &MemoryDocument, config: &FocusConfig, path: &str, is_dir: bool) -> Style {
    let base = if is_dir {
        Theme::dir_style()
    } else {
        Theme::file_style()
    };
    if !document.has_root_class(FOCUS_MODE_CLASS) {
        return base;
    }
    if document.path_has_class(path, FOCUSED_CLASS) {
        base.add_modifier(Modifier::BOLD)
    } else {
        let dim = parse_color(&config.unfocused_color).unwrap_or(FALLBACK_COLOR);
        Style::default().fg(dim)
    }
}

// ───────────────────────────────────────── widget ────────────

/// The tree widget itself — created fresh each frame.
pub struct TreeWidget<'a> {
    tree: &'a DirTree,
    document: &'a MemoryDocument,
    config: &'a FocusConfig,
    open: Option<&'a OpenItems>,
    block: Option<Block<'a>>,
}

impl<'a> TreeWidget<'a> {
    pub fn new(tree: &'a DirTree, document: &'a MemoryDocument, config: &'a FocusConfig) -> Self {
        Self {
            tree,
            document,
            config,
            open: None,
            block: None,
        }
    }

    /// Mark rows that are open in the workspace.
    pub fn open_items(mut self, open: &'a OpenItems) -> Self {
        self.open = Some(open);
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn line_for(&self, node_id: usize, is_selected: bool) -> Line<'a> {
        let node = self.tree.get(node_id);
        let meta = &node.meta;

        let mut spans = connector_spans(node.depth(), self.config);
        let icon = match (meta.is_dir, node.expanded) {
            (true, true) => "▾ ",
            (true, false) => "▸ ",
            (false, _) => "  ",
        };
        let style = if is_selected {
            Theme::selected_style()
        } else {
            title_style(self.document, self.config, &meta.id, meta.is_dir)
        };
        spans.push(Span::styled(format!("{icon}{}", meta.name), style));

        if let Some(open) = self.open {
            if open.active() == Some(meta.id.as_str()) {
                spans.push(Span::styled(" ◉", Theme::open_marker_style()));
            } else if open.contains(&meta.id) {
                spans.push(Span::styled(" ○", Theme::open_marker_style()));
            }
        }
        Line::from(spans)
    }
}

impl StatefulWidget for TreeWidget<'_> {
    type State = TreeWidgetState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        // Resolve the inner area (inside the optional block border).
        let inner = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };

        let rows = self.tree.visible_nodes();
        state.clamp_scroll(inner.height as usize);

        let visible_rows = rows
            .iter()
            .enumerate()
            .skip(state.offset)
            .take(inner.height as usize);

        for (i, (row_idx, &node_id)) in visible_rows.enumerate() {
            let y = inner.y + i as u16;
            let line = self.line_for(node_id, row_idx == state.selected);
            buf.set_line(inner.x, y, &line, inner.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::depth_style::apply_focus;
    use crate::core::focus::resolve;
    use crate::core::tree::tests::sample_tree;

    fn two_colour_config() -> FocusConfig {
        FocusConfig {
            colors: vec!["#111111".into(), "#222222".into()],
            ..FocusConfig::default()
        }
    }

    #[test]
    fn connectors_cycle_palette() {
        let spans = connector_spans(3, &two_colour_config());
        let colours: Vec<Option<Color>> = spans.iter().map(|s| s.style.fg).collect();
        assert_eq!(
            colours,
            vec![
                Some(Color::Rgb(0x11, 0x11, 0x11)),
                Some(Color::Rgb(0x22, 0x22, 0x22)),
                Some(Color::Rgb(0x11, 0x11, 0x11)),
            ]
        );
        assert_eq!(spans[0].content, "│ ");
    }

    #[test]
    fn levels_past_max_depth_reuse_deepest_colour() {
        let config = FocusConfig {
            colors: vec!["#111111".into(), "#222222".into(), "#333333".into()],
            ..FocusConfig::default()
        };
        let spans = connector_spans(MAX_DEPTH + 2, &config);
        assert_eq!(spans.len(), MAX_DEPTH + 2);
        // Depth 9 lands on colors[0] of a three-colour palette.
        let deepest = Some(Color::Rgb(0x11, 0x11, 0x11));
        assert_eq!(spans[MAX_DEPTH - 1].style.fg, deepest);
        assert_eq!(spans[MAX_DEPTH].style.fg, deepest);
        assert_eq!(spans[MAX_DEPTH + 1].style.fg, deepest);
        assert_eq!(spans[MAX_DEPTH].content, spans[0].content);
    }

    #[test]
    fn dashed_lines_use_dashed_glyph() {
        let config = FocusConfig {
            line_style: crate::config::LineStyle::Dashed,
            ..FocusConfig::default()
        };
        assert_eq!(connector_spans(1, &config)[0].content, "╎ ");
    }

    #[test]
    fn titles_dim_only_in_focus_mode() {
        let mut doc = MemoryDocument::new();
        doc.set_marked_paths(["A", "E.md"]);
        let mut config = FocusConfig {
            unfocused_color: "#010101".into(),
            ..FocusConfig::default()
        };
        apply_focus(&resolve(["A"]), &config, &mut doc);

        let dim = Style::default().fg(Color::Rgb(1, 1, 1));
        assert_eq!(title_style(&doc, &config, "E.md", false), dim);
        assert_eq!(
            title_style(&doc, &config, "A", true),
            Theme::dir_style().add_modifier(Modifier::BOLD)
        );

        config.enable_focus = false;
        apply_focus(&resolve(["A"]), &config, &mut doc);
        assert_eq!(title_style(&doc, &config, "E.md", false), Theme::file_style());
    }

    #[test]
    fn renders_coloured_connectors_into_buffer() {
        let mut tree = sample_tree();
        let leaf = tree.find("A/B/C.md").unwrap();
        tree.reveal(leaf);
        let mut doc = MemoryDocument::new();
        doc.set_marked_paths(
            tree.visible_nodes()
                .into_iter()
                .map(|id| tree.get(id).meta.id.clone()),
        );
        let config = two_colour_config();

        let area = Rect::new(0, 0, 20, 5);
        let mut buf = Buffer::empty(area);
        let mut state = TreeWidgetState::default();
        TreeWidget::new(&tree, &doc, &config).render(area, &mut buf, &mut state);

        // Row 2 is A/B/C.md at depth 2: two connectors.
        assert_eq!(buf[(0, 2)].symbol(), "│");
        assert_eq!(buf[(0, 2)].fg, Color::Rgb(0x11, 0x11, 0x11));
        assert_eq!(buf[(2, 2)].symbol(), "│");
        assert_eq!(buf[(2, 2)].fg, Color::Rgb(0x22, 0x22, 0x22));
        // Row 0 is the top-level folder: no connector.
        assert_eq!(buf[(0, 0)].symbol(), "▾");
    }
}
