//! Event handling for the TUI.
//!
//! Wraps crossterm events and adds a tick variant for periodic UI refresh.

use crate::store::Storage;
use crate::tui::app::App;
use crate::widgets::WidgetKind;
use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyModifiers, MouseEvent,
};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::interval;

/// Application-level event variants.
#[derive(Debug, Clone, Copy)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse event occurred.
    Mouse(MouseEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI refresh.
    Tick,
}

/// Event handler that merges terminal input events with periodic ticks.
pub struct EventHandler {
    /// Tick interval duration.
    tick_rate: Duration,
}

impl EventHandler {
    /// Creates a new EventHandler with the specified tick rate.
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Waits for the next event, returning either a terminal event or a tick.
    ///
    /// Uses `tokio::select!` to race between crossterm input and the tick timer.
    pub async fn next(&self, reader: &mut EventStream) -> std::io::Result<Event> {
        let mut tick = interval(self.tick_rate);
        // Consume the first immediate tick
        tick.tick().await;

        loop {
            tokio::select! {
                maybe_event = reader.next() => {
                    match maybe_event {
                        Some(Ok(CrosstermEvent::Key(key))) => return Ok(Event::Key(key)),
                        Some(Ok(CrosstermEvent::Mouse(mouse))) => return Ok(Event::Mouse(mouse)),
                        Some(Ok(CrosstermEvent::Resize(w, h))) => return Ok(Event::Resize(w, h)),
                        Some(Err(e)) => return Err(e),
                        // Ignore focus, paste events
                        Some(Ok(_)) => continue,
                        None => return Err(std::io::Error::new(
                            std::io::ErrorKind::UnexpectedEof,
                            "event stream ended",
                        )),
                    }
                }
                _ = tick.tick() => {
                    return Ok(Event::Tick);
                }
            }
        }
    }
}

/// Store mutation requested by a key press.
///
/// Selection and modal editing are handled inline; everything that writes
/// to the store goes through an action so the loop can report it.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No action to take.
    None,
    /// Quit the application.
    Quit,
    /// Toggle edit mode.
    ToggleEditMode,
    /// Toggle whether hidden widgets are displayed.
    ToggleShowHidden,
    /// Flip the visibility of a widget.
    ToggleVisibility(String),
    /// Advance a widget's legacy size hint.
    CycleSize(String),
    /// Switch to the preset with the given 1-based index (1-4).
    SwitchPreset(u8),
    /// Clear every custom width and height.
    ResetSizes,
    /// Delete a widget.
    Remove(String),
    /// Append a new widget.
    AddWidget {
        /// Kind of the new widget.
        kind: WidgetKind,
        /// Its title.
        title: String,
    },
    /// Retitle a widget.
    Rename {
        /// Widget to retitle.
        id: String,
        /// New title.
        title: String,
    },
}

/// Handles a key event by updating selection/modal state or returning an action.
///
/// While a modal is open every key except Ctrl+C goes to the modal, so
/// titles may contain any character.
pub fn handle_key_event<S: Storage>(app: &mut App<S>, key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    if app.modal.is_some() {
        return handle_modal_key(app, key);
    }

    app.follow_selection = true;
    let edit_mode = app.store.edit_mode();
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down | KeyCode::Right => {
            app.select_next();
            Action::None
        }
        KeyCode::Char('k') | KeyCode::Up | KeyCode::Left => {
            app.select_previous();
            Action::None
        }
        KeyCode::Tab => {
            app.select_next_wrapping();
            Action::None
        }
        KeyCode::BackTab => {
            app.select_previous_wrapping();
            Action::None
        }
        KeyCode::Char('e') => Action::ToggleEditMode,
        KeyCode::Char('h') => Action::ToggleShowHidden,
        KeyCode::Char('v') => app
            .selected
            .clone()
            .map_or(Action::None, Action::ToggleVisibility),
        KeyCode::Char('s') => app.selected.clone().map_or(Action::None, Action::CycleSize),
        KeyCode::Char(c @ '1'..='4') => Action::SwitchPreset(c as u8 - b'0'),
        KeyCode::Char('r') => Action::ResetSizes,
        KeyCode::Char('a') if edit_mode => {
            app.open_add_modal();
            Action::None
        }
        KeyCode::Char('t') if edit_mode => {
            app.open_edit_title_modal();
            Action::None
        }
        KeyCode::Char('x') | KeyCode::Delete if edit_mode => {
            app.selected.clone().map_or(Action::None, Action::Remove)
        }
        KeyCode::Char('a') | KeyCode::Char('t') | KeyCode::Char('x') | KeyCode::Delete => {
            app.set_status("Press e to enter edit mode");
            Action::None
        }
        KeyCode::Esc => {
            // Esc cancels any gesture and clears selection (defocus)
            app.cancel_gestures();
            app.selected = None;
            Action::None
        }
        _ => Action::None,
    }
}

/// Handles key events while the add or edit-title modal is open.
fn handle_modal_key<S: Storage>(app: &mut App<S>, key: KeyEvent) -> Action {
    let Some(modal) = app.modal.as_mut() else {
        return Action::None;
    };
    match key.code {
        KeyCode::Esc => {
            app.modal = None;
            Action::None
        }
        KeyCode::Enter => app.confirm_modal(),
        KeyCode::Backspace => {
            modal.title_mut().pop();
            Action::None
        }
        KeyCode::Down | KeyCode::Tab => {
            modal.next_kind();
            Action::None
        }
        KeyCode::Up | KeyCode::BackTab => {
            modal.previous_kind();
            Action::None
        }
        KeyCode::Char(c) => {
            modal.title_mut().push(c);
            Action::None
        }
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests;
