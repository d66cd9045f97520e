//! Keyboard input handling.
//!
//! Handlers mutate [`AppState`] directly for navigation and emit
//! [`HostEvent`]s for anything the focus controller must see.  The events go
//! back through the main loop's channel so they are processed in order.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc::UnboundedSender;

use super::event::{AppEvent, HostEvent};
use super::settings::SettingsItem;
use super::state::AppState;

/// Handle a single key press.
pub fn handle_key(state: &mut AppState, key: KeyEvent, events: &UnboundedSender<AppEvent>) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let row_count = state.visible_rows().len();
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => state.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => state.tree_state.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => state.tree_state.select_next(row_count),
        KeyCode::Right | KeyCode::Char('l') => expand_selected(state, events),
        KeyCode::Left | KeyCode::Char('h') => collapse_selected(state, events),
        KeyCode::Enter => activate_selected(state, events),
        KeyCode::Char('x') => close_selected(state, events),
        KeyCode::Char(c) => {
            if let Some(item) = SettingsItem::for_key(c) {
                change_setting(state, item, events);
            }
        }
        _ => {}
    }
}

fn emit(events: &UnboundedSender<AppEvent>, event: HostEvent) {
    if events.send(AppEvent::Host(event)).is_err() {
        tracing::debug!("event loop gone, dropping host event");
    }
}

fn expand_selected(state: &mut AppState, events: &UnboundedSender<AppEvent>) {
    let Some(node) = state.selected_node() else {
        return;
    };
    let n = state.tree.get(node);
    if n.meta.is_dir && !n.expanded {
        state.tree.toggle_expand(node);
        emit(events, HostEvent::LayoutChanged);
    }
}

/// Collapse an expanded folder, or move to the parent folder otherwise.
fn collapse_selected(state: &mut AppState, events: &UnboundedSender<AppEvent>) {
    let Some(node) = state.selected_node() else {
        return;
    };
    let n = state.tree.get(node);
    if n.meta.is_dir && n.expanded {
        state.tree.toggle_expand(node);
        emit(events, HostEvent::LayoutChanged);
    } else if let Some(parent) = n.parent.filter(|&p| p != state.tree.root) {
        state.select_node(parent);
    }
}

/// Folders toggle; files become the active open item.
fn activate_selected(state: &mut AppState, events: &UnboundedSender<AppEvent>) {
    let Some(node) = state.selected_node() else {
        return;
    };
    let meta = &state.tree.get(node).meta;
    if meta.is_dir {
        state.tree.toggle_expand(node);
        emit(events, HostEvent::LayoutChanged);
        return;
    }
    let id = meta.id.clone();
    state.status_message = Some(format!("Opened {id}"));
    state.workspace.open(id);
    emit(events, HostEvent::ActiveItemChanged);
}

fn close_selected(state: &mut AppState, events: &UnboundedSender<AppEvent>) {
    let Some(node) = state.selected_node() else {
        return;
    };
    let id = &state.tree.get(node).meta.id;
    if state.workspace.close(id) {
        state.status_message = Some(format!("Closed {id}"));
        emit(events, HostEvent::ActiveItemChanged);
    }
}

/// Apply a setting on top of the latest user settings, persist it, then hand
/// the new snapshot to the controller.
///
/// Builds on `state.settings` rather than the controller's config so presses
/// queued ahead of their `SettingsChanged` events compose.
fn change_setting(state: &mut AppState, item: &SettingsItem, events: &UnboundedSender<AppEvent>) {
    item.apply(&mut state.settings);
    let config = state.settings.clone();
    state.status_message = Some(match config.save(&state.config_path) {
        Ok(()) => format!("{}: {}", item.label(), item.value(&config)),
        Err(err) => {
            tracing::warn!(%err, "could not save settings");
            format!("{}: {} (not saved: {err})", item.label(), item.value(&config))
        }
    });
    emit(events, HostEvent::SettingsChanged(config));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crossterm::event::KeyEventKind;
    use tokio::sync::mpsc;

    use crate::config::{FocusConfig, LineStyle};
    use crate::core::depth_style::{FOCUSED_CLASS, FOCUS_MODE_CLASS};
    use crate::core::tree::tests::sample_tree;

    fn press(code: KeyCode) -> KeyEvent {
        let mut key = KeyEvent::new(code, KeyModifiers::NONE);
        key.kind = KeyEventKind::Press;
        key
    }

    /// Feed keys, then drain and dispatch every host event they produced,
    /// exactly like the main loop does.
    fn run(state: &mut AppState, keys: &[KeyCode]) {
        let (tx, mut rx) = mpsc::unbounded_channel();
        for &code in keys {
            handle_key(state, press(code), &tx);
            while let Ok(event) = rx.try_recv() {
                if let AppEvent::Host(host) = event {
                    state.dispatch(host);
                }
            }
        }
    }

    fn state_in(dir: &tempfile::TempDir) -> AppState {
        let mut state = AppState::new(
            PathBuf::from("."),
            sample_tree(),
            FocusConfig::default(),
            dir.path().join("config.json"),
        );
        state.activate();
        state
    }

    #[test]
    fn opening_a_file_focuses_its_ancestors() {
        let tmp = tempfile::tempdir().expect("tmp dir");
        let mut state = state_in(&tmp);

        // A (expand) → A/B (expand) → A/B/C.md (open)
        run(
            &mut state,
            &[KeyCode::Right, KeyCode::Down, KeyCode::Right, KeyCode::Down, KeyCode::Enter],
        );

        assert_eq!(state.workspace.active(), Some("A/B/C.md"));
        for path in ["A", "A/B", "A/B/C.md"] {
            assert!(state.document.path_has_class(path, FOCUSED_CLASS), "{path}");
        }
        assert!(!state.document.path_has_class("A/D.md", FOCUSED_CLASS));
        assert!(!state.document.path_has_class("E.md", FOCUSED_CLASS));

        run(&mut state, &[KeyCode::Char('x')]);
        assert!(state.controller.focused().is_empty());
        assert!(!state.document.path_has_class("A", FOCUSED_CLASS));
    }

    #[test]
    fn left_moves_to_parent_then_collapses() {
        let tmp = tempfile::tempdir().expect("tmp dir");
        let mut state = state_in(&tmp);
        run(&mut state, &[KeyCode::Right, KeyCode::Down, KeyCode::Left]);

        let a = state.tree.find("A").unwrap();
        assert_eq!(state.selected_node(), Some(a));
        run(&mut state, &[KeyCode::Left]);
        assert!(!state.tree.get(a).expanded);
        assert!(state.document.element_for_path("A/B").is_none());
    }

    #[test]
    fn focus_toggle_is_persisted_and_applied() {
        let tmp = tempfile::tempdir().expect("tmp dir");
        let mut state = state_in(&tmp);
        assert!(state.document.has_root_class(FOCUS_MODE_CLASS));

        run(&mut state, &[KeyCode::Char('f')]);
        assert!(!state.config().enable_focus);
        assert!(!state.document.has_root_class(FOCUS_MODE_CLASS));
        assert_eq!(state.document.style_count(), 1);

        let saved = FocusConfig::load_from(&state.config_path).unwrap();
        assert!(!saved.enable_focus);
    }

    #[test]
    fn queued_setting_presses_compose() {
        let tmp = tempfile::tempdir().expect("tmp dir");
        let mut state = state_in(&tmp);
        let (tx, mut rx) = mpsc::unbounded_channel();

        // Both presses land before either SettingsChanged is dispatched.
        handle_key(&mut state, press(KeyCode::Char('f')), &tx);
        handle_key(&mut state, press(KeyCode::Char('f')), &tx);
        handle_key(&mut state, press(KeyCode::Char('s')), &tx);
        while let Ok(AppEvent::Host(host)) = rx.try_recv() {
            state.dispatch(host);
        }

        assert!(state.config().enable_focus);
        assert_eq!(state.config().line_style, LineStyle::Dashed);
        assert!(state.document.has_root_class(FOCUS_MODE_CLASS));
        let saved = FocusConfig::load_from(&state.config_path).unwrap();
        assert!(saved.enable_focus);
        assert_eq!(saved.line_style, LineStyle::Dashed);
    }

    #[test]
    fn quit_keys() {
        let tmp = tempfile::tempdir().expect("tmp dir");
        let mut state = state_in(&tmp);
        run(&mut state, &[KeyCode::Char('q')]);
        assert!(state.should_quit);
    }
}
