//! Application state and main event loop for the TUI.
//!
//! Manages terminal setup/teardown, panic hooks, and the core render loop.

mod update;

use crate::interaction::{DragReorderController, ResizeController};
use crate::layout::{Preset, PresetManager};
use crate::store::{Storage, WidgetStore};
use crate::tui::event::{handle_key_event, Action, Event, EventHandler};
use crate::tui::ui::render_dashboard;
use crate::tui::views::board::HitMap;
use crate::widgets::{Widget, WidgetKind, KNOWN_KINDS};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::time::{Duration, Instant};

/// How long a status message stays in the footer.
pub const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Modal dialog shown over the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Pick a kind and title for a new widget.
    AddWidget {
        /// Index into [`KNOWN_KINDS`].
        kind_index: usize,
        /// Title typed so far. Blank means the kind's default title.
        title: String,
    },
    /// Retitle an existing widget.
    EditTitle {
        /// Widget being retitled.
        widget_id: String,
        /// Title typed so far.
        title: String,
    },
}

impl Modal {
    /// The text field being edited.
    pub fn title_mut(&mut self) -> &mut String {
        match self {
            Modal::AddWidget { title, .. } | Modal::EditTitle { title, .. } => title,
        }
    }

    /// Moves the kind picker down, wrapping. No-op for other modals.
    pub fn next_kind(&mut self) {
        if let Modal::AddWidget { kind_index, .. } = self {
            *kind_index = (*kind_index + 1) % KNOWN_KINDS.len();
        }
    }

    /// Moves the kind picker up, wrapping. No-op for other modals.
    pub fn previous_kind(&mut self) {
        if let Modal::AddWidget { kind_index, .. } = self {
            *kind_index = (*kind_index + KNOWN_KINDS.len() - 1) % KNOWN_KINDS.len();
        }
    }
}

/// Core application state for the TUI.
#[derive(Debug)]
pub struct App<S: Storage> {
    /// Whether the application should exit.
    pub should_quit: bool,
    /// Count of ticks processed (useful for testing/diagnostics).
    pub tick_count: u64,
    /// Widget collection and board flags.
    pub store: WidgetStore<S>,
    /// Active layout preset.
    pub presets: PresetManager,
    /// Resize gesture in progress, if any.
    pub resize: ResizeController,
    /// Reorder drag in progress, if any.
    pub reorder: DragReorderController,
    /// Id of the focused widget.
    pub selected: Option<String>,
    /// Open modal, if any.
    pub modal: Option<Modal>,
    /// Temporary status message shown in footer, with expiry time.
    pub status_message: Option<(String, Instant)>,
    /// First packed row drawn on the board.
    pub board_offset: usize,
    /// Scroll the board so the selected card stays visible.
    ///
    /// Cleared by wheel scrolling, set again by any key press.
    pub follow_selection: bool,
    /// Card and drop-slot areas from the last render pass.
    ///
    /// Mouse events are resolved against this; empty until the first render.
    pub hit_map: HitMap,
    /// Redraw interval.
    pub tick_rate: Duration,
}

impl<S: Storage> App<S> {
    /// Creates an app over `store` with `preset` highlighted.
    ///
    /// The preset is not applied, so stored custom sizes are kept.
    pub fn new(store: WidgetStore<S>, preset: Preset, tick_rate: Duration) -> Self {
        let mut app = Self {
            should_quit: false,
            tick_count: 0,
            store,
            presets: PresetManager::new(preset),
            resize: ResizeController::new(),
            reorder: DragReorderController::new(),
            selected: None,
            modal: None,
            status_message: None,
            board_offset: 0,
            follow_selection: true,
            hit_map: HitMap::default(),
            tick_rate,
        };
        app.ensure_selection(None);
        app
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    /// Ids of the displayed widgets in board order.
    pub fn displayed_ids(&self) -> Vec<String> {
        self.store.displayed().iter().map(|w| w.id.clone()).collect()
    }

    /// Index of the selected widget among the displayed ones.
    pub fn selected_rank(&self) -> Option<usize> {
        let selected = self.selected.as_deref()?;
        self.store.displayed().iter().position(|w| w.id == selected)
    }

    /// The selected widget, if it still exists.
    pub fn selected_widget(&self) -> Option<&Widget> {
        self.selected.as_deref().and_then(|id| self.store.get(id))
    }

    /// Keeps the selection on a displayed widget.
    ///
    /// If the selected widget is gone or hidden, selects the widget now at
    /// `fallback` (clamped), or the first one.
    pub fn ensure_selection(&mut self, fallback: Option<usize>) {
        let ids = self.displayed_ids();
        if let Some(selected) = &self.selected {
            if ids.contains(selected) {
                return;
            }
        }
        self.selected = match ids.len() {
            0 => None,
            len => Some(ids[fallback.unwrap_or(0).min(len - 1)].clone()),
        };
    }

    /// Moves the selection forward by one, clamped to the last widget.
    pub fn select_next(&mut self) {
        let ids = self.displayed_ids();
        if ids.is_empty() {
            return;
        }
        let next = self.selected_rank().map_or(0, |i| (i + 1).min(ids.len() - 1));
        self.selected = Some(ids[next].clone());
    }

    /// Moves the selection back by one, clamped to the first widget.
    pub fn select_previous(&mut self) {
        let ids = self.displayed_ids();
        if ids.is_empty() {
            return;
        }
        let previous = self.selected_rank().map_or(0, |i| i.saturating_sub(1));
        self.selected = Some(ids[previous].clone());
    }

    /// Moves the selection forward by one, wrapping to the first widget.
    pub fn select_next_wrapping(&mut self) {
        let ids = self.displayed_ids();
        if ids.is_empty() {
            return;
        }
        let next = self.selected_rank().map_or(0, |i| (i + 1) % ids.len());
        self.selected = Some(ids[next].clone());
    }

    /// Moves the selection back by one, wrapping to the last widget.
    pub fn select_previous_wrapping(&mut self) {
        let ids = self.displayed_ids();
        if ids.is_empty() {
            return;
        }
        let last = ids.len() - 1;
        let previous = self
            .selected_rank()
            .map_or(last, |i| if i == 0 { last } else { i - 1 });
        self.selected = Some(ids[previous].clone());
    }

    // -----------------------------------------------------------------------
    // Modals
    // -----------------------------------------------------------------------

    /// Opens the add-widget modal.
    pub fn open_add_modal(&mut self) {
        self.cancel_gestures();
        self.modal = Some(Modal::AddWidget {
            kind_index: 0,
            title: String::new(),
        });
    }

    /// Opens the edit-title modal for the selected widget.
    pub fn open_edit_title_modal(&mut self) {
        let Some(widget) = self.selected_widget() else {
            self.set_status("Select a widget first");
            return;
        };
        let modal = Modal::EditTitle {
            widget_id: widget.id.clone(),
            title: widget.title.clone(),
        };
        self.cancel_gestures();
        self.modal = Some(modal);
    }

    /// Closes the modal and returns the action it confirms.
    ///
    /// A blank title in the edit-title modal keeps the modal open.
    pub fn confirm_modal(&mut self) -> Action {
        match self.modal.take() {
            Some(Modal::AddWidget { kind_index, title }) => {
                let name = KNOWN_KINDS[kind_index % KNOWN_KINDS.len()];
                let kind = WidgetKind::parse(name);
                let title = match title.trim() {
                    "" => kind.default_title(),
                    trimmed => trimmed.to_string(),
                };
                Action::AddWidget { kind, title }
            }
            Some(Modal::EditTitle { widget_id, title }) => {
                if title.trim().is_empty() {
                    self.set_status("Title cannot be empty");
                    self.modal = Some(Modal::EditTitle { widget_id, title });
                    return Action::None;
                }
                Action::Rename {
                    id: widget_id,
                    title: title.trim().to_string(),
                }
            }
            None => Action::None,
        }
    }

    // -----------------------------------------------------------------------
    // Status and gestures
    // -----------------------------------------------------------------------

    /// Shows `message` in the footer for [`STATUS_MESSAGE_TTL`].
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now() + STATUS_MESSAGE_TTL));
    }

    /// Clears the status message if its expiry time has passed.
    ///
    /// Returns `true` if a message was cleared.
    pub fn expire_status_message(&mut self) -> bool {
        if let Some((_, expiry)) = &self.status_message {
            if Instant::now() >= *expiry {
                self.status_message = None;
                return true;
            }
        }
        false
    }

    /// Abandons any resize or reorder gesture without touching the store.
    pub fn cancel_gestures(&mut self) {
        self.resize.end();
        self.reorder.end();
    }

    // -----------------------------------------------------------------------
    // Event loop
    // -----------------------------------------------------------------------

    /// Runs the TUI application: sets up terminal, enters event loop, restores on exit.
    pub async fn run(&mut self) -> io::Result<()> {
        // Install panic hook that restores terminal before printing panic info
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));

        setup_terminal()?;

        let result = self.event_loop().await;

        restore_terminal()?;
        result
    }

    /// Main event loop: renders UI and processes events.
    async fn event_loop(&mut self) -> io::Result<()> {
        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend)?;
        let event_handler = EventHandler::new(self.tick_rate);
        let mut reader = EventStream::new();

        terminal.draw(|frame| render_dashboard(frame, self))?;

        loop {
            let event = event_handler.next(&mut reader).await?;
            let should_render = match event {
                Event::Key(key) => {
                    let action = handle_key_event(self, key);
                    self.dispatch(action);
                    true // Input events always render immediately
                }
                Event::Mouse(mouse) => {
                    self.handle_mouse_event(mouse);
                    true
                }
                Event::Tick => {
                    self.tick_count += 1;
                    self.expire_status_message()
                }
                Event::Resize(_, _) => true,
            };

            if self.should_quit {
                tracing::debug!("quitting after {} ticks", self.tick_count);
                return Ok(());
            }

            if should_render {
                terminal.draw(|frame| render_dashboard(frame, self))?;
            }
        }
    }
}

/// Enables raw mode and switches to the alternate screen.
fn setup_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    Ok(())
}

/// Restores the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

#[cfg(test)]
mod tests;
