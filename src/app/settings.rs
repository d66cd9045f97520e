//! Settings model (data only).
//!
//! Each item knows its key, how to show its current value and how to
//! change it.  The handler applies items; the status bar lists them.

use crate::config::FocusConfig;

/// A single user-adjustable setting.
pub enum SettingsItem {
    /// Boolean toggle.
    Toggle {
        key: char,
        label: &'static str,
        get: fn(&FocusConfig) -> bool,
        set: fn(&mut FocusConfig, bool),
    },
    /// Cycles through a finite set of values.
    Cycle {
        key: char,
        label: &'static str,
        value: fn(&FocusConfig) -> String,
        cycle: fn(&mut FocusConfig),
    },
}

impl SettingsItem {
    pub fn key(&self) -> char {
        match self {
            Self::Toggle { key, .. } | Self::Cycle { key, .. } => *key,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Toggle { label, .. } | Self::Cycle { label, .. } => label,
        }
    }

    pub fn value(&self, config: &FocusConfig) -> String {
        match self {
            Self::Toggle { get, .. } => {
                let on = get(config);
                (if on { "On" } else { "Off" }).to_string()
            }
            Self::Cycle { value, .. } => value(config),
        }
    }

    /// Flip or advance the setting on `config`.
    pub fn apply(&self, config: &mut FocusConfig) {
        match self {
            Self::Toggle { get, set, .. } => {
                let current = get(config);
                set(config, !current);
            }
            Self::Cycle { cycle, .. } => cycle(config),
        }
    }

    /// The item bound to `key`, if any.
    pub fn for_key(key: char) -> Option<&'static SettingsItem> {
        SETTINGS_ITEMS.iter().find(|item| item.key() == key)
    }
}

/// All settings, in display order.
pub static SETTINGS_ITEMS: &[SettingsItem] = &[
    SettingsItem::Toggle {
        key: 'f',
        label: "Focus",
        get: |c| c.enable_focus,
        set: |c, v| c.enable_focus = v,
    },
    SettingsItem::Cycle {
        key: 's',
        label: "Lines",
        value: |c| c.line_style.label().to_string(),
        cycle: |c| c.line_style = c.line_style.next(),
    },
    SettingsItem::Cycle {
        key: 'p',
        label: "Palette",
        value: |c| c.palette_name().to_string(),
        cycle: FocusConfig::cycle_palette,
    },
];

/// Status-bar summary, e.g. `"f Focus: On | s Lines: Solid | p Palette: Rainbow"`.
pub fn summary(config: &FocusConfig) -> String {
    SETTINGS_ITEMS
        .iter()
        .map(|item| format!("{} {}: {}", item.key(), item.label(), item.value(config)))
        .collect::<Vec<_>>()
        .join(" | ")
}
