//! Logging initialization for the `gdash` binary.
//!
//! Configures the `tracing` subscriber with level filtering via the `GDASH_LOG`
//! environment variable. Falls back to the configured `[logging] level` when the
//! variable is unset or invalid.
//!
//! # Usage
//!
//! ```bash
//! # Configured level (info by default)
//! gdash list
//!
//! # Debug level
//! GDASH_LOG=debug gdash list
//!
//! # Module-specific filtering
//! GDASH_LOG=garnishment_dashboard::store=trace,warn gdash tui
//! ```

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::schema::LogLevel;

/// Environment variable holding filter directives.
pub const LOG_ENV_VAR: &str = "GDASH_LOG";

/// Builds the filter: `GDASH_LOG` if it parses, else `level`.
pub fn build_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(level.as_directive()))
}

/// Initialize the tracing subscriber.
///
/// With a `file`, log lines are appended there without ANSI colors; the
/// file and its parent directory are created as needed. Without one,
/// output goes to stderr.
///
/// A second call is a no-op.
pub fn init(level: LogLevel, file: Option<&Path>) -> std::io::Result<()> {
    let filter = build_filter(level);

    let result = match file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
        None => fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init(),
    };
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}
