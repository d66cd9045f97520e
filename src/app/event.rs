//! Event plumbing between the host workspace and the focus controller.
//!
//! Host signals are plain [`HostEvent`] values.  Terminal input and host
//! signals share one channel so the main loop sees them strictly in order.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

use crate::config::FocusConfig;

/// Signals the controller reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// The set of open items (or which one is active) changed.
    ActiveItemChanged,
    /// Elements were added or removed from the visible layout.
    LayoutChanged,
    /// New configuration snapshot to regenerate styles from.
    SettingsChanged(FocusConfig),
}

/// Source of the currently open leaf identifiers.
pub trait Workspace {
    fn open_identifiers(&self) -> Vec<String>;
}

impl Workspace for Vec<String> {
    fn open_identifiers(&self) -> Vec<String> {
        self.clone()
    }
}

/// Everything the main loop consumes.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Host(HostEvent),
}

/// Spawns a blocking task that polls the terminal and forwards key presses
/// and resizes into `tx`.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<AppEvent>, poll_rate: Duration) {
    tokio::task::spawn_blocking(move || {
        loop {
            if tx.is_closed() {
                break;
            }
            if !event::poll(poll_rate).unwrap_or(false) {
                continue;
            }
            let app_event = match event::read() {
                Ok(CtEvent::Key(k)) if k.kind == KeyEventKind::Press => AppEvent::Key(k),
                Ok(CtEvent::Resize(_, _)) => AppEvent::Host(HostEvent::LayoutChanged),
                Ok(_) => continue,
                Err(err) => {
                    tracing::warn!(%err, "terminal read failed");
                    continue;
                }
            };
            if tx.send(app_event).is_err() {
                break; // receiver dropped
            }
        }
    });
}
