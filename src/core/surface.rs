//! The element surface the focus styling is applied to.
//!
//! The core never touches a concrete document.  It talks to a
//! [`DocumentSurface`] that owns style resources, root-level state classes,
//! and the elements carrying a path marker.  The terminal front end and the
//! HTML exporter both drive an in-memory implementation; tests do too.

/// Opaque element index handed out by a surface.
pub type ElementId = usize;

/// Ownership token for one attached stylesheet.
///
/// Deliberately neither `Clone` nor `Copy`: whoever holds the handle owns the
/// resource, and [`DocumentSurface::detach_style`] consumes it.
#[derive(Debug, PartialEq, Eq)]
pub struct StyleHandle(u64);

impl StyleHandle {
    /// Surfaces mint handles; nothing else should.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// A document-like target for stylesheets and state classes.
pub trait DocumentSurface {
    /// Attach a new style resource holding `css`.
    fn attach_style(&mut self, css: &str) -> StyleHandle;

    /// Replace the full text of an attached style resource.
    fn replace_style(&mut self, handle: &StyleHandle, css: &str);

    /// Remove a style resource.
    fn detach_style(&mut self, handle: StyleHandle);

    /// Add (`on = true`) or remove a class on the global root element.
    fn set_root_class(&mut self, class: &str, on: bool);

    /// Every element that carries a path marker, with its path.
    fn marked_elements(&self) -> Vec<(ElementId, String)>;

    /// Add or remove a class on a single element.
    fn set_element_class(&mut self, element: ElementId, class: &str, on: bool);
}
