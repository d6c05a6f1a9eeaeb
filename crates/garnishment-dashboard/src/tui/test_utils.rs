//! Shared test utilities for TUI testing with ratatui TestBackend.
//!
//! Provides helper functions for creating test terminals, extracting buffer
//! content, building key and mouse events, and creating app fixtures.

#![cfg(test)]

use crate::layout::Preset;
use crate::store::{storage_key, MemoryStorage, WidgetStore};
use crate::tui::app::App;
use crate::tui::ui::render_dashboard;
use crate::widgets::{Widget, WidgetKind, WidthClass};
use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{backend::TestBackend, buffer::Buffer, style::Color, Terminal};
use std::time::Duration;

/// Creates a Terminal with TestBackend at the specified dimensions.
pub fn test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("failed to create test terminal")
}

/// Extracts all text from a specific row in the buffer as a single String.
pub fn row_text(buffer: &Buffer, row: u16) -> String {
    let area = buffer.area();
    if row >= area.height {
        return String::new();
    }
    (0..area.width)
        .map(|col| {
            buffer
                .cell((col, row))
                .map(|cell| cell.symbol())
                .unwrap_or(" ")
        })
        .collect()
}

/// Checks if a specific row contains the given substring.
pub fn row_contains(buffer: &Buffer, row: u16, text: &str) -> bool {
    row_text(buffer, row).contains(text)
}

/// Finds the first row index that contains the given text, or None if not found.
pub fn find_row_with_text(buffer: &Buffer, text: &str) -> Option<u16> {
    let area = buffer.area();
    (0..area.height).find(|&row| row_contains(buffer, row, text))
}

/// Asserts that the cell at (col, row) has the specified foreground color.
pub fn assert_fg_color(buffer: &Buffer, col: u16, row: u16, color: Color) {
    let cell = buffer
        .cell((col, row))
        .unwrap_or_else(|| panic!("cell at ({}, {}) does not exist", col, row));
    assert_eq!(
        cell.fg, color,
        "expected fg color {:?} at ({}, {}), got {:?}",
        color, col, row, cell.fg
    );
}

/// Event widget titled after its id.
pub fn make_widget(id: &str, unit: u8, position: usize) -> Widget {
    let mut widget = Widget::new(id, WidgetKind::Event, id, position);
    widget.custom_width = WidthClass::from_unit(unit);
    widget
}

/// App for user `tester` over an in-memory store holding `widgets`.
pub fn app_with(widgets: Vec<Widget>) -> App<MemoryStorage> {
    let json = serde_json::to_string(&widgets).expect("fixture serializes");
    let storage = MemoryStorage::new().with_entry(&storage_key("tester"), &json);
    let store = WidgetStore::load(storage, "tester");
    App::new(store, Preset::Auto, Duration::from_millis(250))
}

/// App holding A(1) B(1) C(2) D(1): one full row, then D alone.
pub fn abcd_app() -> App<MemoryStorage> {
    app_with(vec![
        make_widget("A", 1, 0),
        make_widget("B", 1, 1),
        make_widget("C", 2, 2),
        make_widget("D", 1, 3),
    ])
}

/// Draws `app` into a fresh `width` x `height` terminal and returns the buffer.
pub fn render_app(app: &mut App<MemoryStorage>, width: u16, height: u16) -> Buffer {
    let mut terminal = test_terminal(width, height);
    terminal
        .draw(|frame| render_dashboard(frame, app))
        .expect("draw");
    terminal.backend().buffer().clone()
}

/// Plain key press.
pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Ctrl + `c`.
pub fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

/// Mouse event of `kind` at a terminal cell.
pub fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    }
}

/// Left-button press.
pub fn press(column: u16, row: u16) -> MouseEvent {
    mouse(MouseEventKind::Down(MouseButton::Left), column, row)
}

/// Left-button drag.
pub fn drag(column: u16, row: u16) -> MouseEvent {
    mouse(MouseEventKind::Drag(MouseButton::Left), column, row)
}

/// Left-button release.
pub fn release(column: u16, row: u16) -> MouseEvent {
    mouse(MouseEventKind::Up(MouseButton::Left), column, row)
}
