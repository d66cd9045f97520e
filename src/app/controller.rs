//! Lifecycle owner for the depth stylesheet and the focused set.
//!
//! [`FocusController`] holds the only [`StyleHandle`] and the current
//! [`FocusedSet`].  Hosts drive it through [`activate`](FocusController::activate),
//! [`deactivate`](FocusController::deactivate) and [`dispatch`](FocusController::dispatch);
//! the surface it paints on is always passed in, never stored.

use crate::config::FocusConfig;
use crate::core::depth_style::{apply_focus, build_depth_stylesheet, FOCUS_MODE_CLASS};
use crate::core::focus::{resolve, FocusedSet};
use crate::core::surface::{DocumentSurface, StyleHandle};

use super::event::{HostEvent, Workspace};

#[derive(Debug)]
pub struct FocusController {
    config: FocusConfig,
    focused: FocusedSet,
    /// `Some` exactly between `activate` and `deactivate`.
    style: Option<StyleHandle>,
}

impl FocusController {
    pub fn new(config: FocusConfig) -> Self {
        Self {
            config,
            focused: FocusedSet::new(),
            style: None,
        }
    }

    pub fn config(&self) -> &FocusConfig {
        &self.config
    }

    pub fn focused(&self) -> &FocusedSet {
        &self.focused
    }

    pub fn is_active(&self) -> bool {
        self.style.is_some()
    }

    /// Attach the depth stylesheet and mark the initial focus set.
    pub fn activate<D, W>(&mut self, surface: &mut D, workspace: &W)
    where
        D: DocumentSurface + ?Sized,
        W: Workspace + ?Sized,
    {
        if self.is_active() {
            tracing::debug!("already active");
            return;
        }
        let css = build_depth_stylesheet(&self.config);
        self.style = Some(surface.attach_style(&css));
        self.refocus(surface, workspace);
        tracing::info!(
            palette = self.config.colors.len(),
            focus_mode = self.config.enable_focus,
            "activated"
        );
    }

    /// Detach the stylesheet and clear the focus-mode root class.
    ///
    /// Safe to call whether or not focus mode was ever enabled.
    pub fn deactivate<D>(&mut self, surface: &mut D)
    where
        D: DocumentSurface + ?Sized,
    {
        if let Some(handle) = self.style.take() {
            surface.detach_style(handle);
        }
        surface.set_root_class(FOCUS_MODE_CLASS, false);
        self.focused = FocusedSet::new();
        tracing::info!("deactivated");
    }

    /// Re-resolve from the workspace and re-mark the surface.
    pub fn open_items_changed<D, W>(&mut self, surface: &mut D, workspace: &W)
    where
        D: DocumentSurface + ?Sized,
        W: Workspace + ?Sized,
    {
        if self.is_active() {
            self.refocus(surface, workspace);
        }
    }

    /// Visible elements changed; new ones need their marks.
    pub fn layout_changed<D, W>(&mut self, surface: &mut D, workspace: &W)
    where
        D: DocumentSurface + ?Sized,
        W: Workspace + ?Sized,
    {
        self.open_items_changed(surface, workspace);
    }

    /// Swap in `config`, regenerate the stylesheet in place and re-apply
    /// focus so nothing lags behind the new settings.
    pub fn settings_changed<D>(&mut self, surface: &mut D, config: FocusConfig)
    where
        D: DocumentSurface + ?Sized,
    {
        self.config = config;
        let Some(handle) = &self.style else {
            return;
        };
        let css = build_depth_stylesheet(&self.config);
        surface.replace_style(handle, &css);
        apply_focus(&self.focused, &self.config, surface);
        tracing::debug!("regenerated depth stylesheet");
    }

    /// Route a host signal to the matching entry point.
    pub fn dispatch<D, W>(&mut self, event: HostEvent, surface: &mut D, workspace: &W)
    where
        D: DocumentSurface + ?Sized,
        W: Workspace + ?Sized,
    {
        match event {
            HostEvent::ActiveItemChanged => self.open_items_changed(surface, workspace),
            HostEvent::LayoutChanged => self.layout_changed(surface, workspace),
            HostEvent::SettingsChanged(config) => self.settings_changed(surface, config),
        }
    }

    fn refocus<D, W>(&mut self, surface: &mut D, workspace: &W)
    where
        D: DocumentSurface + ?Sized,
        W: Workspace + ?Sized,
    {
        self.focused = resolve(workspace.open_identifiers());
        apply_focus(&self.focused, &self.config, surface);
    }
}
