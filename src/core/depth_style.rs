//! Depth-indexed connector styling and focus marking.
//!
//! [`build_depth_stylesheet`] turns the palette into one rule per nesting
//! level; [`apply_focus`] pushes a resolved [`FocusedSet`] onto a
//! [`DocumentSurface`] as classes.  The stylesheet is always regenerated in
//! full and swapped wholesale by the caller.

use std::fmt::Write as _;

use crate::config::FocusConfig;

use super::focus::FocusedSet;
use super::surface::DocumentSurface;

/// Number of nesting levels that get their own rule.  Deeper containers
/// have no rule at their exact level.
pub const MAX_DEPTH: usize = 10;

/// Class marking a children container.
pub const CHILDREN_CLASS: &str = "tree-item-children";

/// Class marking the title row that carries the path marker.
pub const TITLE_CLASS: &str = "tree-item-title";

/// Global state class on the root element while focus mode is on.
pub const FOCUS_MODE_CLASS: &str = "rainbow-tree-focus-mode";

/// Per-element class for members of the focused set.
pub const FOCUSED_CLASS: &str = "is-focused";

/// Custom property holding the unfocused title colour.
pub const UNFOCUSED_COLOR_VAR: &str = "--rainbow-tree-unfocused-color";

/// Static rules that consume the generated custom property.  Only active
/// while [`FOCUS_MODE_CLASS`] is on the root.
pub const FOCUS_BASE_CSS: &str = "\
.rainbow-tree-focus-mode .tree-item-title:not(.is-focused) {
  color: var(--rainbow-tree-unfocused-color);
}
.rainbow-tree-focus-mode .tree-item-title.is-focused {
  font-weight: 600;
}
";

/// Selector matching a children container nested exactly `depth` levels
/// below the top-level one.
///
/// Depth 0 is `.tree-item-children`, depth 2 is
/// `.tree-item-children .tree-item-children .tree-item-children`.
pub fn nesting_selector(depth: usize) -> String {
    let fragment = format!(".{CHILDREN_CLASS} ");
    let mut selector = fragment.repeat(depth);
    selector.push('.');
    selector.push_str(CHILDREN_CLASS);
    selector
}

/// Generate the full depth stylesheet for `config`.
///
/// Deterministic: identical configs give byte-identical output.
pub fn build_depth_stylesheet(config: &FocusConfig) -> String {
    let mut css = String::new();
    for depth in 0..MAX_DEPTH {
        // Writing into a `String` cannot fail.
        let _ = writeln!(
            css,
            "{} {{ border-left: 1px {} {}; }}",
            nesting_selector(depth),
            config.line_style.css(),
            config.color_for_depth(depth),
        );
    }
    let _ = writeln!(
        css,
        ":root {{ {UNFOCUSED_COLOR_VAR}: {}; }}",
        config.unfocused_color
    );
    css
}

/// Mark the surface according to `focused`.
///
/// The focus-mode root class follows `config.enable_focus`; each path-marked
/// element gets [`FOCUSED_CLASS`] iff its path is in the set.  Elements are
/// independent of each other, and re-applying the same inputs is a no-op.
pub fn apply_focus<D: DocumentSurface + ?Sized>(
    focused: &FocusedSet,
    config: &FocusConfig,
    surface: &mut D,
) {
    surface.set_root_class(FOCUS_MODE_CLASS, config.enable_focus);

    let elements = surface.marked_elements();
    let mut marked = 0usize;
    for (id, path) in &elements {
        let on = focused.contains(path);
        marked += usize::from(on);
        surface.set_element_class(*id, FOCUSED_CLASS, on);
    }
    tracing::trace!(
        elements = elements.len(),
        focused = marked,
        focus_mode = config.enable_focus,
        "applied focus"
    );
}
