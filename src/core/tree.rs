//! In-memory tree that mirrors the browsed directory layout.
//!
//! The [`TreeNode`] is the fundamental unit – it holds the identifier of a
//! single entry and links to its children via indices into an arena (the
//! [`DirTree`] struct).  Using an arena avoids recursive `Box` allocations
//! and keeps borrowing trivial.

use std::path::{Path, PathBuf};

use super::focus::PATH_SEPARATOR;

// ───────────────────────────────────────── node metadata ─────

/// What we keep per entry.
#[derive(Debug, Clone)]
pub struct EntryMeta {
    /// Root-relative identifier, segments joined by `/`.  Empty for the root.
    pub id: String,
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

impl EntryMeta {
    /// Metadata for `path`, identified relative to `root`.
    pub fn from_path(root: &Path, path: &Path) -> std::io::Result<Self> {
        let meta = std::fs::metadata(path)?;
        Ok(Self {
            id: identifier_for(root, path),
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path: path.to_path_buf(),
            is_dir: meta.is_dir(),
        })
    }
}

/// Build the `/`-joined identifier of `path` relative to `root`.
///
/// Platform separators never leak into identifiers.
pub fn identifier_for(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let mut id = String::new();
    for component in rel.components() {
        if !id.is_empty() {
            id.push(PATH_SEPARATOR);
        }
        id.push_str(&component.as_os_str().to_string_lossy());
    }
    id
}

// ───────────────────────────────────────── tree node ─────────

/// Index into [`DirTree::nodes`].
pub type NodeId = usize;

/// A single node in the arena-allocated tree.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub meta: EntryMeta,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Whether this node is expanded in the UI (only meaningful for dirs).
    pub expanded: bool,
    /// Distance from the root (0 = root).
    pub level: usize,
}

impl TreeNode {
    /// Nesting depth as styled: 0 for the root's direct children.
    pub fn depth(&self) -> usize {
        self.level.saturating_sub(1)
    }
}

// ───────────────────────────────────────── arena tree ────────

/// Arena-backed directory tree.
#[derive(Debug, Clone)]
pub struct DirTree {
    pub nodes: Vec<TreeNode>,
    pub root: NodeId,
}

impl DirTree {
    /// Create a new tree with a single, expanded root node.
    pub fn new(root_meta: EntryMeta) -> Self {
        let root = TreeNode {
            meta: root_meta,
            parent: None,
            children: Vec::new(),
            expanded: true,
            level: 0,
        };
        Self {
            nodes: vec![root],
            root: 0,
        }
    }

    /// Add a child under `parent_id` and return its [`NodeId`].
    pub fn add_child(&mut self, parent_id: NodeId, meta: EntryMeta) -> NodeId {
        let level = self.nodes[parent_id].level + 1;
        let id = self.nodes.len();
        self.nodes.push(TreeNode {
            meta,
            parent: Some(parent_id),
            children: Vec::new(),
            expanded: false,
            level,
        });
        self.nodes[parent_id].children.push(id);
        id
    }

    /// Node ids currently visible (every ancestor expanded), in display
    /// order.  The root itself is not listed.
    pub fn visible_nodes(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        for &child in &self.nodes[self.root].children {
            self.collect_visible(child, &mut out);
        }
        out
    }

    fn collect_visible(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        let node = &self.nodes[id];
        if node.expanded {
            for &child in &node.children {
                self.collect_visible(child, out);
            }
        }
    }

    /// Toggle the expanded state of a node (only if it is a directory).
    pub fn toggle_expand(&mut self, id: NodeId) {
        if self.nodes[id].meta.is_dir {
            self.nodes[id].expanded = !self.nodes[id].expanded;
        }
    }

    /// Expand `id` and every ancestor so it becomes visible.
    pub fn reveal(&mut self, id: NodeId) {
        let mut cursor = self.nodes[id].parent;
        while let Some(parent) = cursor {
            self.nodes[parent].expanded = true;
            cursor = self.nodes[parent].parent;
        }
    }

    /// Look a node up by identifier.
    pub fn find(&self, identifier: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.parent.is_some() && n.meta.id == identifier)
    }

    pub fn get(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id]
    }
}
