//! Core algorithms – focus resolution, depth styling, and the tree model.
//!
//! Nothing in this module depends on any TUI or rendering crate.  The
//! styling code reaches the outside world only through
//! [`surface::DocumentSurface`].

pub mod depth_style;
pub mod focus;
pub mod fs;
pub mod surface;
pub mod tree;
