//! Application orchestration — focus lifecycle, state, events, and input.

pub mod controller;
pub mod document;
pub mod event;
pub mod handler;
pub mod settings;
pub mod state;
