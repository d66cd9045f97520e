//! A file-tree browser with per-depth rainbow connector lines and an
//! active-path focus mode.
//!
//! Run the binary to browse a directory interactively.
//! Run with `--css` to print the depth stylesheet, or `--html` to export the
//! marked tree as a standalone page.

mod app;
mod config;
mod core;
mod export;
mod ui;

use std::io::{self, stderr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use crate::app::{
    controller::FocusController,
    document::MemoryDocument,
    event::{spawn_event_reader, AppEvent},
    handler, settings,
    state::{AppState, OpenItems},
};
use crate::config::FocusConfig;
use crate::core::{depth_style::build_depth_stylesheet, fs::WalkConfig, tree::DirTree};
use crate::ui::{layout::AppLayout, theme::Theme, tree_widget::TreeWidget};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Rainbow-lined tree browser with active-path focus")]
struct Cli {
    /// Directory to open (defaults to `.`).
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Item to treat as open, `/`-separated and relative to PATH.  Repeatable;
    /// the last one is active.
    #[arg(long = "open", value_name = "ID")]
    open: Vec<String>,

    /// Print the depth stylesheet for the current settings and exit.
    #[arg(long)]
    css: bool,

    /// Print the marked tree as an HTML page and exit.
    #[arg(long, conflicts_with = "css")]
    html: bool,

    /// Maximum tree depth.
    #[arg(long, default_value_t = 12)]
    depth: usize,

    /// Show hidden (dot) files.
    #[arg(long)]
    hidden: bool,

    /// Settings file (defaults to `$XDG_CONFIG_HOME/rainbow-tree/config.json`).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

// ───────────────────────────────────────── export ────────────

/// Mark every node of `tree` against `open` and render it as HTML.
fn export_html(root: &Path, tree: &DirTree, config: FocusConfig, open: &[String]) -> String {
    let mut document = MemoryDocument::new();
    document.set_marked_paths(
        tree.nodes
            .iter()
            .filter(|n| n.parent.is_some())
            .map(|n| n.meta.id.as_str()),
    );

    let mut controller = FocusController::new(config);
    controller.activate(&mut document, &OpenItems::new(open.iter().cloned()));
    let title = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());
    let page = export::html::render_page(tree, &document, &title);
    controller.deactivate(&mut document);
    page
}

// ───────────────────────────────────────── drawing ───────────

fn draw(frame: &mut Frame, state: &mut AppState) {
    let layout = AppLayout::from_area(frame.area());

    let tree_block = Block::default()
        .title(format!(" {} ", state.cwd.display()))
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_style(Theme::border_style());

    let tree_widget = TreeWidget::new(&state.tree, &state.document, state.controller.config())
        .open_items(&state.workspace)
        .block(tree_block);
    frame.render_stateful_widget(tree_widget, layout.tree_area, &mut state.tree_state);

    let mut tabs: Vec<Span> = vec![Span::raw(" open: ")];
    if state.workspace.is_empty() {
        tabs.push(Span::raw("(none)"));
    }
    for (i, id) in state.workspace.iter().enumerate() {
        if i > 0 {
            tabs.push(Span::raw(" │ "));
        }
        let style = if state.workspace.active() == Some(id) {
            Theme::tabs_style().add_modifier(Modifier::BOLD)
        } else {
            Theme::tabs_style()
        };
        tabs.push(Span::styled(id.to_string(), style));
    }
    frame.render_widget(Paragraph::new(Line::from(tabs)), layout.tabs_area);

    let status_text = match &state.status_message {
        Some(msg) => msg.clone(),
        None => format!(
            "{} | ⏎ open | x close | q quit",
            settings::summary(state.controller.config())
        ),
    };
    let status = Paragraph::new(status_text).style(Theme::status_bar_style());
    frame.render_widget(status, layout.status_area);
}

// ───────────────────────────────────────── interactive ───────

/// Handle `first` and everything queued behind it, including host events
/// the handler emits along the way, so a frame never shows the tree ahead
/// of its focus marks.
fn process_events(
    state: &mut AppState,
    first: AppEvent,
    rx: &mut mpsc::UnboundedReceiver<AppEvent>,
    tx: &mpsc::UnboundedSender<AppEvent>,
) {
    let mut next = Some(first);
    while let Some(event) = next {
        match event {
            AppEvent::Key(key) => {
                state.status_message = None;
                handler::handle_key(state, key, tx);
            }
            AppEvent::Host(host) => state.dispatch(host),
        }
        if state.should_quit {
            return;
        }
        next = rx.try_recv().ok();
    }
}

async fn run_interactive(
    root: PathBuf,
    mut tree: DirTree,
    config: FocusConfig,
    config_path: PathBuf,
    open: &[String],
) -> Result<()> {
    for id in open {
        if let Some(node) = tree.find(id) {
            tree.reveal(node);
        }
    }
    let mut state = AppState::new(root, tree, config, config_path);
    for id in open {
        state.workspace.open(id.clone());
    }
    state.activate();
    if let Some(active) = state.workspace.active().and_then(|id| state.tree.find(id)) {
        state.select_node(active);
    }

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    // ── event loop ────────────────────────────────────────────
    // Terminal input and host signals share one channel, so every event
    // reaches the controller in arrival order.
    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();
    spawn_event_reader(tx.clone(), Duration::from_millis(100));

    loop {
        terminal.draw(|frame| draw(frame, &mut state))?;

        let Some(event) = rx.recv().await else {
            break;
        };
        process_events(&mut state, event, &mut rx, &tx);

        if state.should_quit {
            break;
        }
    }
    drop(rx);
    state.deactivate();

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr only; `RUST_LOG` selects the level.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(config::config_path);
    let focus_config = FocusConfig::load(&config_path);

    // ── stylesheet-only mode ──────────────────────────────────
    if cli.css {
        print!("{}", build_depth_stylesheet(&focus_config));
        return Ok(());
    }

    // ── build tree ────────────────────────────────────────────
    let root = cli.path.canonicalize()?;
    let walk_config = WalkConfig {
        max_depth: cli.depth,
        show_hidden: cli.hidden,
        ..WalkConfig::default()
    };
    let tree = core::fs::build_tree(&root, &walk_config)?;
    for id in &cli.open {
        if tree.find(id).is_none() {
            tracing::warn!(id = %id, "open item is not in the tree");
        }
    }

    if cli.html {
        print!("{}", export_html(&root, &tree, focus_config, &cli.open));
        return Ok(());
    }

    run_interactive(root, tree, focus_config, config_path, &cli.open).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn css_and_html_conflict() {
        assert!(Cli::try_parse_from(["rainbow-tree", "--css", "--html"]).is_err());
        let cli = Cli::try_parse_from(["rainbow-tree", "--open", "a/b.md", "--open", "c.md"]).unwrap();
        assert_eq!(cli.open, vec!["a/b.md", "c.md"]);
    }

    #[test]
    fn expanded_rows_are_marked_before_the_next_frame() {
        use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
        use crate::core::depth_style::FOCUSED_CLASS;

        let tmp = tempfile::tempdir().expect("tmp dir");
        std::fs::create_dir_all(tmp.path().join("notes")).unwrap();
        std::fs::write(tmp.path().join("notes/today.md"), "x").unwrap();
        let tree = core::fs::build_tree(tmp.path(), &WalkConfig::default()).unwrap();

        let mut state = AppState::new(
            tmp.path().to_path_buf(),
            tree,
            FocusConfig::default(),
            tmp.path().join("config.json"),
        );
        state.workspace.open("notes/today.md".into());
        state.activate();
        assert!(state.document.element_for_path("notes/today.md").is_none());

        let (tx, mut rx) = mpsc::unbounded_channel();
        let right = AppEvent::Key(KeyEvent::new(KeyCode::Right, KeyModifiers::NONE));
        process_events(&mut state, right, &mut rx, &tx);

        assert!(state.document.path_has_class("notes/today.md", FOCUSED_CLASS));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn export_marks_open_path() {
        let tmp = tempfile::tempdir().expect("tmp dir");
        std::fs::create_dir_all(tmp.path().join("notes")).unwrap();
        std::fs::write(tmp.path().join("notes/today.md"), "x").unwrap();
        std::fs::write(tmp.path().join("other.md"), "x").unwrap();

        let tree = core::fs::build_tree(tmp.path(), &WalkConfig::default()).unwrap();
        let page = export_html(
            tmp.path(),
            &tree,
            FocusConfig::default(),
            &["notes/today.md".to_string()],
        );
        assert!(page.contains(r#"class="tree-item-title is-focused" data-path="notes""#));
        assert!(page.contains(r#"class="tree-item-title is-focused" data-path="notes/today.md""#));
        assert!(page.contains(r#"class="tree-item-title" data-path="other.md""#));
        assert!(page.contains("rainbow-tree-focus-mode"));
    }
}
