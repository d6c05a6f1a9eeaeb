//! Garnishment Dashboard - CLI entry point
//!
//! Runs the terminal dashboard, or edits a user's board headlessly: every
//! subcommand other than `tui` and `config` loads the board, applies one
//! operation, and writes it back.

use clap::{Parser, Subcommand};
use garnishment_dashboard::config::{default, loader::ConfigLoader, schema::Config, xdg};
use garnishment_dashboard::layout::{pack_into_rows, row_units, Preset, ROW_CAPACITY_UNITS};
use garnishment_dashboard::logging;
use garnishment_dashboard::store::{FileStorage, WidgetStore};
use garnishment_dashboard::tui::app::App;
use garnishment_dashboard::widgets::{WidgetKind, WidgetSize, KNOWN_KINDS};
use std::path::PathBuf;
use std::process::ExitCode;

/// File name of the TUI log when no `[logging] file` is configured.
const TUI_LOG_FILE: &str = "gdash.log";

/// Garnishment analytics dashboard
#[derive(Parser)]
#[command(name = "gdash")]
#[command(version, about = "Analytics board for the garnishment dashboard")]
struct Cli {
    /// Directory holding widget data (overrides [storage] data_dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// User whose board to open (overrides [storage] user_id and the stored user id)
    #[arg(long, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the gdash CLI
#[derive(Subcommand)]
enum Commands {
    /// Launch the terminal user interface
    Tui,

    /// List widgets in display order
    List {
        /// Include hidden widgets
        #[arg(long)]
        all: bool,
    },

    /// Show how widgets pack into rows
    Rows {
        /// Include hidden widgets
        #[arg(long)]
        all: bool,
    },

    /// Add a widget at the end of the board
    Add {
        /// Widget type (statistics, expenses, garnishment, chart, ...)
        kind: String,
        /// Display title
        title: String,
    },

    /// Remove a widget
    Remove {
        /// Widget id
        id: String,
    },

    /// Make a hidden widget visible
    Show {
        /// Widget id
        id: String,
    },

    /// Hide a widget without removing it
    Hide {
        /// Widget id
        id: String,
    },

    /// Move a widget to a 0-based position
    Move {
        /// Widget id
        id: String,
        /// Target position; values past the end move it last
        position: usize,
    },

    /// Rename a widget
    Title {
        /// Widget id
        id: String,
        /// New title
        title: String,
    },

    /// Set a widget's legacy size hint
    Size {
        /// Widget id
        id: String,
        /// small, medium or large
        size: WidgetSize,
    },

    /// Apply a layout preset to every widget
    Preset {
        /// auto, compact, wide or stacked
        preset: Preset,
    },

    /// Clear every custom width and height
    ResetSizes,

    /// Manage configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Actions for the `config` subcommand.
#[derive(Subcommand)]
enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite existing configuration (creates backup)
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration file
    Validate,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Commands::Config { action } = &cli.command {
        return run_config_command(action);
    }

    let config = match ConfigLoader::load_default().and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| config.storage.data_dir());

    let log_file = match (&cli.command, config.logging.file()) {
        (_, Some(file)) => Some(file),
        // The TUI owns the terminal, so its logs always go to a file.
        (Commands::Tui, None) => Some(data_dir.join(TUI_LOG_FILE)),
        _ => None,
    };
    if let Err(e) = logging::init(config.logging.level, log_file.as_deref()) {
        eprintln!("Warning: failed to open log file: {e}");
    }

    let storage = FileStorage::new(&data_dir);
    let mut store = match cli.user.as_deref().or(config.storage.user_id()) {
        Some(user) => WidgetStore::load(storage, user),
        None => WidgetStore::open(storage),
    };

    if let Commands::Tui = cli.command {
        return run_tui(store, &config);
    }

    let outcome = run_board_command(&mut store, cli.command);
    if outcome.changed {
        if let Err(e) = store.persist() {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    }
    outcome.code
}

/// Launches the dashboard on a tokio runtime.
fn run_tui(mut store: WidgetStore<FileStorage>, config: &Config) -> ExitCode {
    let tick_rate = match config.dashboard.tick_rate() {
        Ok(rate) => rate,
        Err(e) => {
            eprintln!("Config error: {e}");
            return ExitCode::FAILURE;
        }
    };
    store.set_show_hidden(config.dashboard.show_hidden);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime for TUI: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = rt.block_on(async {
        let mut app = App::new(store, config.dashboard.preset, tick_rate);
        app.run().await
    }) {
        eprintln!("TUI error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Result of a headless board command.
struct Outcome {
    code: ExitCode,
    /// Whether the board was mutated and must be flushed.
    changed: bool,
}

impl Outcome {
    fn read() -> Self {
        Self {
            code: ExitCode::SUCCESS,
            changed: false,
        }
    }

    fn changed() -> Self {
        Self {
            code: ExitCode::SUCCESS,
            changed: true,
        }
    }

    fn missing(id: &str) -> Self {
        eprintln!("Error: no widget with id '{id}'");
        Self {
            code: ExitCode::FAILURE,
            changed: false,
        }
    }
}

/// Applies one headless command to `store` and prints its result.
fn run_board_command(store: &mut WidgetStore<FileStorage>, command: Commands) -> Outcome {
    match command {
        Commands::List { all } => {
            for widget in store.query(all) {
                let hidden = if widget.visible { "" } else { "  (hidden)" };
                println!(
                    "{:>3}  {:<28} {:<12} {}u  {}{}",
                    widget.position,
                    widget.id,
                    widget.kind.name(),
                    widget.width_class().unit(),
                    widget.title,
                    hidden
                );
            }
            Outcome::read()
        }
        Commands::Rows { all } => {
            let widgets = store.query(all);
            for (i, row) in pack_into_rows(widgets.iter().copied()).iter().enumerate() {
                let ids: Vec<&str> = row.iter().map(|w| w.id.as_str()).collect();
                println!(
                    "row {} [{}/{}]: {}",
                    i + 1,
                    row_units(row),
                    ROW_CAPACITY_UNITS,
                    ids.join(", ")
                );
            }
            Outcome::read()
        }
        Commands::Add { kind, title } => {
            let kind = WidgetKind::parse(&kind);
            if !kind.is_known() {
                eprintln!(
                    "Error: unknown widget type '{}' (expected one of: {})",
                    kind.name(),
                    KNOWN_KINDS.join(", ")
                );
                return Outcome {
                    code: ExitCode::FAILURE,
                    changed: false,
                };
            }
            let id = store.add(kind, &title);
            println!("{id}");
            Outcome::changed()
        }
        Commands::Remove { id } => {
            if store.remove(&id) {
                println!("Removed {id}");
                Outcome::changed()
            } else {
                Outcome::missing(&id)
            }
        }
        Commands::Show { id } | Commands::Hide { id } if store.get(&id).is_none() => {
            Outcome::missing(&id)
        }
        Commands::Show { id } => {
            store.set_visibility(&id, true);
            Outcome::changed()
        }
        Commands::Hide { id } => {
            store.set_visibility(&id, false);
            Outcome::changed()
        }
        Commands::Move { id, position } => {
            if store.reposition(&id, position) {
                let landed = store.get(&id).map_or(position, |w| w.position);
                println!("Moved {id} to position {landed}");
                Outcome::changed()
            } else {
                Outcome::missing(&id)
            }
        }
        Commands::Title { id, title } => {
            if store.set_title(&id, &title) {
                Outcome::changed()
            } else {
                Outcome::missing(&id)
            }
        }
        Commands::Size { id, size } => {
            if store.set_size(&id, size) {
                Outcome::changed()
            } else {
                Outcome::missing(&id)
            }
        }
        Commands::Preset { preset } => {
            store.apply_preset(preset);
            println!("Applied preset {preset}");
            Outcome::changed()
        }
        Commands::ResetSizes => {
            store.reset_all_custom_sizes();
            Outcome::changed()
        }
        Commands::Tui | Commands::Config { .. } => Outcome::read(),
    }
}

/// Handles `gdash config <action>`.
fn run_config_command(action: &ConfigAction) -> ExitCode {
    let result = match action {
        ConfigAction::Init { force } => match default::create_default_config(*force) {
            Ok(path) => {
                println!("Created configuration at {}", path.display());
                Ok(())
            }
            Err(e) => Err(e),
        },
        ConfigAction::Path => {
            println!("{}", xdg::config_path().display());
            Ok(())
        }
        ConfigAction::Validate => {
            match ConfigLoader::load_default().and_then(|c| c.validate().map(|_| c)) {
                Ok(config) => {
                    println!("Configuration is valid");
                    println!("{config:#?}");
                    Ok(())
                }
                Err(e) => Err(e),
            }
        }
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Config error: {e}");
            ExitCode::FAILURE
        }
    }
}
