//! Filesystem traversal — walk directories and populate a [`DirTree`].
//!
//! The walker respects `.gitignore` rules via the [`ignore`] crate and caps
//! the depth to keep things snappy.  Nothing here ever writes to disk.

use std::path::Path;

use ignore::WalkBuilder;

use super::tree::{DirTree, EntryMeta, NodeId};

/// Configuration knobs for the traversal.
#[derive(Debug, Clone)]
pub struct WalkConfig {
    /// Maximum depth to descend below the root.
    pub max_depth: usize,
    /// Respect `.gitignore` files.
    pub respect_gitignore: bool,
    /// Show hidden (dot-prefixed) entries.
    pub show_hidden: bool,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            max_depth: 12,
            respect_gitignore: true,
            show_hidden: false,
        }
    }
}

/// Build a [`DirTree`] rooted at `root` using the given config.
///
/// Directories are sorted before files; within each group entries are sorted
/// alphabetically (case-insensitive).
pub fn build_tree(root: &Path, config: &WalkConfig) -> anyhow::Result<DirTree> {
    let root_meta = EntryMeta::from_path(root, root)?;
    if !root_meta.is_dir {
        anyhow::bail!("{} is not a directory", root.display());
    }
    let mut tree = DirTree::new(root_meta);

    let root_id = tree.root;
    populate_children(&mut tree, root, root_id, root, config, 0)?;
    tracing::info!(root = %root.display(), nodes = tree.nodes.len(), "built tree");

    Ok(tree)
}

/// Recursively populate children for `parent_id`.
fn populate_children(
    tree: &mut DirTree,
    root: &Path,
    parent_id: NodeId,
    dir: &Path,
    config: &WalkConfig,
    current_depth: usize,
) -> anyhow::Result<()> {
    if current_depth >= config.max_depth {
        return Ok(());
    }

    let walker = WalkBuilder::new(dir)
        .max_depth(Some(1)) // only immediate children
        .hidden(!config.show_hidden)
        .git_ignore(config.respect_gitignore)
        .require_git(false)
        .build();

    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for entry in walker.flatten() {
        let path = entry.path();
        // WalkBuilder yields the directory itself first.
        if path == dir {
            continue;
        }
        // Lossy names could collide, and identifiers must stay unique.
        if entry.file_name().to_str().is_none() {
            tracing::warn!(path = %path.display(), "skipping entry with non-UTF-8 name");
            continue;
        }

        match EntryMeta::from_path(root, path) {
            Ok(meta) if meta.is_dir => dirs.push(meta),
            Ok(meta) => files.push(meta),
            Err(err) => tracing::debug!(path = %path.display(), %err, "skipping entry"),
        }
    }

    dirs.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    files.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

    for meta in dirs {
        let child_path = meta.path.clone();
        let child_id = tree.add_child(parent_id, meta);
        populate_children(tree, root, child_id, &child_path, config, current_depth + 1)?;
    }
    for meta in files {
        tree.add_child(parent_id, meta);
    }

    Ok(())
}
