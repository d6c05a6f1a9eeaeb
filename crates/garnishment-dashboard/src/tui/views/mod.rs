//! Board, card and modal rendering.

/// Board layout, drop slots and mouse hit regions.
pub mod board;

/// Single widget card.
pub mod card;

/// Add-widget and edit-title dialogs.
pub mod modal;
