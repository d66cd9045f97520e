//! Standalone HTML rendering of a marked tree.
//!
//! The page nests one `.tree-item-children` container per folder level, so
//! the generated depth selectors match exactly as they would in a live
//! file explorer.  Classes come straight from the [`MemoryDocument`].

use std::fmt::Write as _;

use crate::app::document::MemoryDocument;
use crate::core::depth_style::{CHILDREN_CLASS, FOCUS_BASE_CSS, TITLE_CLASS};
use crate::core::tree::{DirTree, NodeId};

/// Escape text for use in element content and quoted attributes.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the whole tree as an HTML page.
///
/// Every attached stylesheet in `document` is emitted after the static
/// focus rules; the body carries the document's root classes.
pub fn render_page(tree: &DirTree, document: &MemoryDocument, title: &str) -> String {
    let mut html = String::new();
    let _ = writeln!(html, "<!DOCTYPE html>");
    let _ = writeln!(html, "<html>\n<head>\n<meta charset=\"utf-8\">");
    let _ = writeln!(html, "<title>{}</title>", escape(title));
    let _ = writeln!(html, "<style>\n{FOCUS_BASE_CSS}</style>");
    for css in document.styles() {
        let _ = writeln!(html, "<style>\n{css}</style>");
    }
    let body_classes: Vec<&str> = document.root_classes().collect();
    let _ = writeln!(html, "</head>\n<body class=\"{}\">", body_classes.join(" "));
    let _ = writeln!(html, "<div class=\"tree-root\">");
    for &child in &tree.get(tree.root).children {
        render_node(tree, document, child, &mut html);
    }
    let _ = writeln!(html, "</div>\n</body>\n</html>");
    html
}

fn render_node(tree: &DirTree, document: &MemoryDocument, id: NodeId, html: &mut String) {
    let node = tree.get(id);
    let meta = &node.meta;
    let kind = if meta.is_dir { "nav-folder" } else { "nav-file" };

    let mut classes = vec![TITLE_CLASS];
    if let Some(el) = document.element_for_path(&meta.id) {
        classes.extend(el.classes.iter().map(String::as_str));
    }

    let _ = writeln!(html, "<div class=\"tree-item {kind}\">");
    let _ = writeln!(
        html,
        "<div class=\"{}\" data-path=\"{}\">{}</div>",
        classes.join(" "),
        escape(&meta.id),
        escape(&meta.name),
    );
    if meta.is_dir && !node.children.is_empty() {
        let _ = writeln!(html, "<div class=\"{CHILDREN_CLASS}\">");
        for &child in &node.children {
            render_node(tree, document, child, html);
        }
        let _ = writeln!(html, "</div>");
    }
    let _ = writeln!(html, "</div>");
}
