//! Dashboard-wide layout presets and the preset manager.
//!
//! Four presets are built in:
//! - **auto** (shortcut `1`): clears every custom size
//! - **compact** (shortcut `2`): every widget one unit wide
//! - **wide** (shortcut `3`): every widget two units wide
//! - **stacked** (shortcut `4`): every widget on its own row

use crate::widgets::WidthClass;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A bulk sizing rule applied to the whole board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Drop all custom widths and heights.
    #[default]
    Auto,
    /// Four one-unit widgets per row.
    Compact,
    /// Two two-unit widgets per row.
    Wide,
    /// One widget per row.
    Stacked,
}

impl Preset {
    /// All presets in shortcut order.
    pub const ALL: [Preset; 4] = [Preset::Auto, Preset::Compact, Preset::Wide, Preset::Stacked];

    /// Preset name as used in config and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Preset::Auto => "auto",
            Preset::Compact => "compact",
            Preset::Wide => "wide",
            Preset::Stacked => "stacked",
        }
    }

    /// Width every widget receives, or `None` to clear custom sizes.
    pub fn uniform_width(self) -> Option<WidthClass> {
        match self {
            Preset::Auto => None,
            Preset::Compact => Some(WidthClass::One),
            Preset::Wide => Some(WidthClass::Two),
            Preset::Stacked => Some(WidthClass::Three),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error type for parsing [`Preset`] from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePresetError(pub String);

impl fmt::Display for ParsePresetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid preset: {} (expected auto, compact, wide or stacked)",
            self.0
        )
    }
}

impl std::error::Error for ParsePresetError {}

impl FromStr for Preset {
    type Err = ParsePresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParsePresetError(s.to_string()))
    }
}

/// Tracks the active preset.
#[derive(Debug, Clone)]
pub struct PresetManager {
    /// Index into [`Preset::ALL`].
    active_index: usize,
}

impl PresetManager {
    /// Creates a manager with `initial` active.
    pub fn new(initial: Preset) -> Self {
        let active_index = Preset::ALL
            .iter()
            .position(|p| *p == initial)
            .unwrap_or(0);
        Self { active_index }
    }

    /// Switches to the preset at the given 1-based index.
    ///
    /// Returns `true` if the switch succeeded, `false` if the index is invalid.
    pub fn switch_by_index(&mut self, index: u8) -> bool {
        match (index as usize).checked_sub(1) {
            Some(i) if i < Preset::ALL.len() => {
                self.active_index = i;
                true
            }
            _ => false,
        }
    }

    /// Switches to the named preset. Returns `false` for unknown names.
    pub fn switch_by_name(&mut self, name: &str) -> bool {
        match name.parse::<Preset>() {
            Ok(preset) => {
                *self = Self::new(preset);
                true
            }
            Err(_) => false,
        }
    }

    /// Returns the currently active preset.
    pub fn active(&self) -> Preset {
        Preset::ALL[self.active_index]
    }

    /// Returns the 1-based index of the active preset.
    pub fn active_index(&self) -> u8 {
        (self.active_index + 1) as u8
    }

    /// Returns the count of available presets.
    pub fn preset_count(&self) -> usize {
        Preset::ALL.len()
    }

    /// Returns an iterator over all preset names.
    pub fn preset_names(&self) -> impl Iterator<Item = &'static str> {
        Preset::ALL.into_iter().map(Preset::name)
    }
}

impl Default for PresetManager {
    fn default() -> Self {
        Self::new(Preset::Auto)
    }
}
