//! Terminal dashboard for the analytics board.
//!
//! Built on ratatui and crossterm. The board is laid out with the same
//! unit-based row packing as every other surface, and pointer gestures in
//! edit mode drive the resize and reorder controllers.

pub mod app;
pub mod event;
pub mod ui;
pub mod views;

#[cfg(test)]
pub(crate) mod test_utils;
