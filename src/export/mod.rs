//! Non-interactive output formats.

pub mod html;
