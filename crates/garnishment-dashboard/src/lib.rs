//! Garnishment Dashboard library
//!
//! The analytics board of the wage-garnishment admin dashboard: a per-user,
//! persisted collection of widgets laid out in unit-packed rows, with
//! edit-mode resize and drag-to-reorder gestures.
//!
//! The crate is split into a headless core and a terminal front end:
//! - [`widgets`]: the widget model, typed per-kind configuration and the
//!   default catalog seeded for new users
//! - [`layout`]: row packing, per-widget geometry and layout presets
//! - [`store`]: the persisted widget collection behind a [`store::Storage`] port
//! - [`interaction`]: resize and reorder gesture controllers
//! - [`tui`]: the ratatui dashboard driving all of the above
//!
//! # Platform Support
//!
//! Storage and configuration follow XDG paths and set Unix file modes, so the
//! crate targets Unix-like systems (Linux, macOS).

/// Configuration loading, defaults and XDG path resolution.
pub mod config;

/// Resize and drag-to-reorder gesture controllers.
pub mod interaction;

/// Row packing, widget geometry and layout presets.
pub mod layout;

/// `tracing` subscriber setup.
pub mod logging;

/// Persisted widget collection and storage backends.
pub mod store;

/// TUI module providing the terminal user interface for the dashboard.
pub mod tui;

/// Widget model, kinds and the default catalog.
pub mod widgets;
