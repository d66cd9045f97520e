//! In-memory [`DocumentSurface`] — the element model behind the tree view
//! and the HTML export.
//!
//! Each visible tree row is one element carrying its identifier as the path
//! marker.  When the layout changes the elements are rebuilt; root classes
//! and attached styles survive.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::core::surface::{DocumentSurface, ElementId, StyleHandle};

/// A single element: optional path marker plus its class list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub path: Option<String>,
    pub classes: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryDocument {
    root_classes: BTreeSet<String>,
    elements: Vec<Element>,
    by_path: HashMap<String, ElementId>,
    /// Attached stylesheets keyed by handle, in attach order.
    styles: BTreeMap<u64, String>,
    next_style: u64,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element, optionally carrying a path marker.
    pub fn add_element(&mut self, path: Option<&str>) -> ElementId {
        let id = self.elements.len();
        if let Some(path) = path {
            self.by_path.insert(path.to_string(), id);
        }
        self.elements.push(Element {
            path: path.map(str::to_string),
            classes: BTreeSet::new(),
        });
        id
    }

    /// Replace every element with a fresh, unclassed one per path.
    pub fn set_marked_paths<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.elements.clear();
        self.by_path.clear();
        for path in paths {
            self.add_element(Some(path.as_ref()));
        }
    }

    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id]
    }

    pub fn element_for_path(&self, path: &str) -> Option<&Element> {
        self.by_path.get(path).map(|&id| &self.elements[id])
    }

    pub fn path_has_class(&self, path: &str, class: &str) -> bool {
        self.element_for_path(path)
            .is_some_and(|e| e.classes.contains(class))
    }

    pub fn has_root_class(&self, class: &str) -> bool {
        self.root_classes.contains(class)
    }

    pub fn root_classes(&self) -> impl Iterator<Item = &str> {
        self.root_classes.iter().map(String::as_str)
    }

    /// Attached stylesheet texts, oldest first.
    pub fn styles(&self) -> impl Iterator<Item = &str> {
        self.styles.values().map(String::as_str)
    }

    pub fn style_count(&self) -> usize {
        self.styles.len()
    }
}

impl DocumentSurface for MemoryDocument {
    fn attach_style(&mut self, css: &str) -> StyleHandle {
        let raw = self.next_style;
        self.next_style += 1;
        self.styles.insert(raw, css.to_string());
        StyleHandle::new(raw)
    }

    fn replace_style(&mut self, handle: &StyleHandle, css: &str) {
        match self.styles.get_mut(&handle.raw()) {
            Some(text) => {
                text.clear();
                text.push_str(css);
            }
            None => tracing::warn!(handle = handle.raw(), "replacing a detached style"),
        }
    }

    fn detach_style(&mut self, handle: StyleHandle) {
        self.styles.remove(&handle.raw());
    }

    fn set_root_class(&mut self, class: &str, on: bool) {
        if on {
            self.root_classes.insert(class.to_string());
        } else {
            self.root_classes.remove(class);
        }
    }

    fn marked_elements(&self) -> Vec<(ElementId, String)> {
        self.elements
            .iter()
            .enumerate()
            .filter_map(|(id, e)| e.path.clone().map(|p| (id, p)))
            .collect()
    }

    fn set_element_class(&mut self, element: ElementId, class: &str, on: bool) {
        let Some(el) = self.elements.get_mut(element) else {
            return;
        };
        if on {
            el.classes.insert(class.to_string());
        } else {
            el.classes.remove(class);
        }
    }
}
