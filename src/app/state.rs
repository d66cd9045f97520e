//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::path::PathBuf;

use crate::config::FocusConfig;
use crate::core::tree::{DirTree, NodeId};
use crate::ui::tree_widget::TreeWidgetState;

use super::controller::FocusController;
use super::document::MemoryDocument;
use super::event::{HostEvent, Workspace};

// ───────────────────────────────────────── open items ────────

/// Items the user has opened, oldest first.  The last one is active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenItems {
    items: Vec<String>,
}

impl OpenItems {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut open = Self::default();
        for item in items {
            open.open(item.into());
        }
        open
    }

    /// Open `id`, or make it active again if it is already open.
    pub fn open(&mut self, id: String) {
        self.items.retain(|i| *i != id);
        self.items.push(id);
    }

    /// Close `id`.  Returns whether it was open.
    pub fn close(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i != id);
        self.items.len() != before
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|i| i == id)
    }

    pub fn active(&self) -> Option<&str> {
        self.items.last().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Workspace for OpenItems {
    fn open_identifiers(&self) -> Vec<String> {
        self.items.clone()
    }
}

// ───────────────────────────────────────── app state ─────────

/// Top-level application state.
pub struct AppState {
    /// The directory tree data.
    pub tree: DirTree,
    /// Widget-level state (selection, scroll).
    pub tree_state: TreeWidgetState,
    /// The browsed directory (the tree root).
    pub cwd: PathBuf,
    pub workspace: OpenItems,
    /// One element per visible row, marked by the controller.
    pub document: MemoryDocument,
    pub controller: FocusController,
    /// Latest settings chosen by the user.  Runs ahead of the controller's
    /// copy until the queued `SettingsChanged` is dispatched.
    pub settings: FocusConfig,
    /// Where settings changes are persisted.
    pub config_path: PathBuf,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(cwd: PathBuf, tree: DirTree, config: FocusConfig, config_path: PathBuf) -> Self {
        Self {
            tree,
            tree_state: TreeWidgetState::default(),
            cwd,
            workspace: OpenItems::default(),
            document: MemoryDocument::new(),
            controller: FocusController::new(config.clone()),
            settings: config,
            config_path,
            should_quit: false,
            status_message: None,
        }
    }

    /// The flattened rows the tree view shows.
    pub fn visible_rows(&self) -> Vec<NodeId> {
        self.tree.visible_nodes()
    }

    /// The node under the cursor, if any.
    pub fn selected_node(&self) -> Option<NodeId> {
        self.visible_rows().get(self.tree_state.selected).copied()
    }

    /// Put the cursor on `node` if it is visible.
    pub fn select_node(&mut self, node: NodeId) {
        if let Some(row) = self.visible_rows().iter().position(|&id| id == node) {
            self.tree_state.selected = row;
        }
    }

    /// Rebuild one document element per visible row.
    fn sync_layout(&mut self) {
        let rows = self.visible_rows();
        self.document
            .set_marked_paths(rows.iter().map(|&id| self.tree.get(id).meta.id.as_str()));
        let max = rows.len().saturating_sub(1);
        self.tree_state.selected = self.tree_state.selected.min(max);
    }

    pub fn activate(&mut self) {
        self.sync_layout();
        self.controller.activate(&mut self.document, &self.workspace);
    }

    pub fn deactivate(&mut self) {
        self.controller.deactivate(&mut self.document);
    }

    /// Feed a host signal through to the controller.
    pub fn dispatch(&mut self, event: HostEvent) {
        if event == HostEvent::LayoutChanged {
            self.sync_layout();
        }
        self.controller
            .dispatch(event, &mut self.document, &self.workspace);
    }

    pub fn config(&self) -> &FocusConfig {
        self.controller.config()
    }
}
