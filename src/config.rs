//! User configuration — palette, line style, focus mode, and persistence.
//!
//! Settings are stored as JSON at
//! `$XDG_CONFIG_HOME/rainbow-tree/config.json` (default
//! `~/.config/rainbow-tree/config.json`).  Loading merges the stored values
//! over the defaults, so a partial file is never an error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

// ───────────────────────────────────────── palettes ──────────

/// The built-in palette used when nothing is configured yet.
pub const DEFAULT_COLORS: &[&str] = &[
    "#e06c75", "#e5c07b", "#98c379", "#56b6c2", "#61afef", "#c678dd", "#d19a66",
];

/// Presets offered by the palette cycle key, in display order.
pub const PALETTE_PRESETS: &[(&str, &[&str])] = &[
    ("Rainbow", DEFAULT_COLORS),
    (
        "Pastel",
        &["#ffb3ba", "#ffdfba", "#ffffba", "#baffc9", "#bae1ff"],
    ),
    ("Ocean", &["#0b3954", "#087e8b", "#5bc0be", "#bfd7ea"]),
    ("Mono", &["#8a8a8a"]),
];

pub const DEFAULT_UNFOCUSED_COLOR: &str = "#5c6370";

// ───────────────────────────────────────── line style ────────

/// How connector lines are stroked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl LineStyle {
    pub const ALL: &[LineStyle] = &[LineStyle::Solid, LineStyle::Dashed, LineStyle::Dotted];

    /// CSS `border-style` keyword.
    pub fn css(self) -> &'static str {
        match self {
            LineStyle::Solid => "solid",
            LineStyle::Dashed => "dashed",
            LineStyle::Dotted => "dotted",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LineStyle::Solid => "Solid",
            LineStyle::Dashed => "Dashed",
            LineStyle::Dotted => "Dotted",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

// ───────────────────────────────────────── config ────────────

/// Errors raised while reading or writing the settings file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The persisted styling record.
///
/// Field names match the on-disk JSON (`colors`, `unfocusedColor`,
/// `enableFocus`, `lineStyle`).  Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FocusConfig {
    /// Connector colours, indexed cyclically by nesting depth.  Never empty
    /// once loaded.
    pub colors: Vec<String>,
    /// Title colour for everything outside the focused set.
    pub unfocused_color: String,
    /// Gates the focus-mode root class.
    pub enable_focus: bool,
    pub line_style: LineStyle,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            colors: default_colors(),
            unfocused_color: DEFAULT_UNFOCUSED_COLOR.to_string(),
            enable_focus: true,
            line_style: LineStyle::default(),
        }
    }
}

fn default_colors() -> Vec<String> {
    DEFAULT_COLORS.iter().map(|c| (*c).to_string()).collect()
}

impl FocusConfig {
    /// Colour for a nesting depth: `colors[depth mod len]`.
    pub fn color_for_depth(&self, depth: usize) -> &str {
        &self.colors[depth % self.colors.len()]
    }

    /// Name of the preset matching the current palette, if any.
    pub fn palette_name(&self) -> &'static str {
        PALETTE_PRESETS
            .iter()
            .find(|(_, colors)| self.colors.iter().map(String::as_str).eq(colors.iter().copied()))
            .map_or("Custom", |(name, _)| name)
    }

    /// Switch to the preset after the current one (custom palettes restart
    /// at the first preset).
    pub fn cycle_palette(&mut self) {
        let next = PALETTE_PRESETS
            .iter()
            .position(|(name, _)| *name == self.palette_name())
            .map_or(0, |idx| (idx + 1) % PALETTE_PRESETS.len());
        self.colors = PALETTE_PRESETS[next]
            .1
            .iter()
            .map(|c| (*c).to_string())
            .collect();
    }

    /// Parse a stored record, filling gaps with defaults.
    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        let mut config: Self = serde_json::from_str(s)?;
        config.ensure_palette();
        Ok(config)
    }

    /// An empty palette would make the depth mapping undefined; fall back to
    /// the built-in one.
    fn ensure_palette(&mut self) {
        if self.colors.is_empty() {
            tracing::warn!("configured palette is empty, using the default palette");
            self.colors = default_colors();
        }
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from `path`, falling back to defaults on any problem.
    pub fn load(path: &Path) -> Self {
        match Self::load_from(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(%err, "ignoring unusable config file");
                Self::default()
            }
        }
    }

    /// Strict variant of [`load`](Self::load).  A missing file is not an
    /// error and yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Persist current config to `path`.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json + "\n").map_err(io_err)?;
        tracing::debug!(path = %path.display(), "saved config");
        Ok(())
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/rainbow-tree/config.json`).
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("rainbow-tree").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config = FocusConfig::from_json(r#"{ "enableFocus": false }"#).unwrap();
        assert!(!config.enable_focus);
        assert_eq!(config.colors, default_colors());
        assert_eq!(config.unfocused_color, DEFAULT_UNFOCUSED_COLOR);
        assert_eq!(config.line_style, LineStyle::Solid);
    }

    #[test]
    fn empty_palette_falls_back_to_default() {
        let config = FocusConfig::from_json(r#"{ "colors": [] }"#).unwrap();
        assert_eq!(config.colors, default_colors());
    }

    #[test]
    fn field_names_match_stored_record() {
        let config = FocusConfig {
            colors: vec!["#111".into()],
            unfocused_color: "#999".into(),
            enable_focus: true,
            line_style: LineStyle::Dotted,
        };
        let json: serde_json::Value = serde_json::to_value(&config).unwrap();
        assert_eq!(json["colors"][0], "#111");
        assert_eq!(json["unfocusedColor"], "#999");
        assert_eq!(json["enableFocus"], true);
        assert_eq!(json["lineStyle"], "dotted");
    }

    #[test]
    fn color_for_depth_cycles() {
        let config = FocusConfig {
            colors: vec!["#111".into(), "#222".into()],
            ..FocusConfig::default()
        };
        assert_eq!(config.color_for_depth(0), "#111");
        assert_eq!(config.color_for_depth(1), "#222");
        assert_eq!(config.color_for_depth(2), "#111");
        assert_eq!(config.color_for_depth(11), "#222");
    }

    #[test]
    fn palette_cycle_walks_presets_and_wraps() {
        let mut config = FocusConfig::default();
        assert_eq!(config.palette_name(), "Rainbow");
        for &(name, _) in PALETTE_PRESETS.iter().skip(1) {
            config.cycle_palette();
            assert_eq!(config.palette_name(), name);
        }
        config.cycle_palette();
        assert_eq!(config.palette_name(), "Rainbow");

        config.colors = vec!["#123456".into()];
        assert_eq!(config.palette_name(), "Custom");
        config.cycle_palette();
        assert_eq!(config.palette_name(), "Rainbow");
    }

    #[test]
    fn line_style_cycle_wraps() {
        assert_eq!(LineStyle::Solid.next(), LineStyle::Dashed);
        assert_eq!(LineStyle::Dashed.next(), LineStyle::Dotted);
        assert_eq!(LineStyle::Dotted.next(), LineStyle::Solid);
    }

    #[test]
    fn save_then_load_preserves_record() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("nested").join("config.json");
        let config = FocusConfig {
            colors: vec!["#abc".into(), "#def".into()],
            unfocused_color: "#333".into(),
            enable_focus: false,
            line_style: LineStyle::Dashed,
        };
        config.save(&path).unwrap();
        assert_eq!(FocusConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("absent.json");
        assert_eq!(FocusConfig::load_from(&path).unwrap(), FocusConfig::default());
    }

    #[test]
    fn malformed_file_is_an_error_but_load_recovers() {
        let dir = tempfile::tempdir().expect("tmp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "lineStyle": "wavy" }"#).unwrap();
        assert!(matches!(
            FocusConfig::load_from(&path),
            Err(ConfigError::Json { .. })
        ));
        assert_eq!(FocusConfig::load(&path), FocusConfig::default());
    }
}
