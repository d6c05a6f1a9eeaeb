//! TOML configuration schema types for the garnishment dashboard.
//!
//! All structs derive `Deserialize` and `Serialize` with defaults via
//! `#[serde(default)]`, so an empty file is a valid configuration.
//!
//! Duration fields use human-readable strings (e.g. `"250ms"`) parsed by the
//! `humantime` crate.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::config::xdg;
use crate::layout::Preset;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration encompassing all sections.
///
/// ```toml
/// [dashboard]
/// [storage]
/// [logging]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Board appearance and behavior.
    pub dashboard: DashboardConfig,
    /// Where widget layouts are kept.
    pub storage: StorageConfig,
    /// Log verbosity and destination.
    pub logging: LoggingConfig,
}

impl Config {
    /// Checks values that parse as TOML but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dashboard.tick_rate()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// `[dashboard]` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Preset highlighted on startup. It is only applied when chosen again,
    /// so stored custom sizes survive a restart.
    pub preset: Preset,
    /// Start with hidden widgets displayed.
    pub show_hidden: bool,
    /// Redraw interval as a human-readable duration.
    pub tick_rate: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            preset: Preset::Auto,
            show_hidden: false,
            tick_rate: "250ms".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Parsed [`tick_rate`](Self::tick_rate).
    pub fn tick_rate(&self) -> Result<Duration, ConfigError> {
        let rate = humantime::parse_duration(&self.tick_rate).map_err(|e| {
            ConfigError::InvalidValue {
                field: "dashboard.tick_rate",
                message: e.to_string(),
            }
        })?;
        if rate.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "dashboard.tick_rate",
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(rate)
    }
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// `[storage]` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Data directory. Empty means the XDG data directory.
    pub data_dir: String,
    /// User whose board is shown. Empty means the stored `user-id`.
    pub user_id: String,
}

impl StorageConfig {
    /// Resolved data directory, with `~` expanded.
    pub fn data_dir(&self) -> PathBuf {
        if self.data_dir.trim().is_empty() {
            xdg::data_dir()
        } else {
            xdg::expand_tilde(self.data_dir.trim())
        }
    }

    /// Configured user id, if any.
    pub fn user_id(&self) -> Option<&str> {
        let id = self.user_id.trim();
        (!id.is_empty()).then_some(id)
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// `[logging]` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Verbosity, overridden by `GDASH_LOG`.
    pub level: LogLevel,
    /// Log file. Empty means stderr.
    pub file: String,
}

impl LoggingConfig {
    /// Resolved log file, with `~` expanded.
    pub fn file(&self) -> Option<PathBuf> {
        let file = self.file.trim();
        (!file.is_empty()).then(|| xdg::expand_tilde(file))
    }
}

/// Log verbosity levels (kebab-case in TOML).
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Informational messages (default).
    #[default]
    Info,
    /// Debug-level detail.
    Debug,
    /// Full trace output.
    Trace,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
