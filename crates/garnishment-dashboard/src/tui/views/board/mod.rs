//! Board rendering: packs displayed widgets into rows and lays the rows out
//! on the terminal grid.
//!
//! Geometry is kept in board pixels so the layout rules stay the same as on
//! a pixel canvas. One terminal column stands for [`COLUMN_PX`] pixels and
//! one line for [`LINE_PX`] pixels.
//!
//! Every render returns a [`HitMap`] recording where each card and row-end
//! drop slot landed. Mouse events are resolved against the most recent one.

use crate::interaction::{DropTarget, DEFAULT_BASELINE_HEIGHT_PX};
use crate::layout::{
    compute_style, pack_into_rows, responsive_row_max_width, row_units, FlexBasis, Row,
    ROW_CAPACITY_UNITS,
};
use crate::tui::views::card::{render_card, CardState};
use crate::widgets::Widget;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Position, Rect},
    style::{Color, Style},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

/// Board pixels per terminal column.
pub const COLUMN_PX: u16 = 8;

/// Board pixels per terminal line.
pub const LINE_PX: u16 = 40;

/// Fewest lines a row may take; a bordered card needs room for one body line.
pub const MIN_ROW_LINES: u16 = 3;

/// Columns reserved for a row-end drop slot in edit mode.
pub const DROP_SLOT_COLUMNS: u16 = 4;

/// Message shown when nothing is displayed.
pub const EMPTY_BOARD_TEXT: &str =
    "No widgets to show. Press h to show hidden widgets, or e then a to add one.";

/// Screen area of a rendered card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardHit {
    /// Widget drawn in `area`.
    pub widget_id: String,
    /// Full card area including the border.
    pub area: Rect,
}

/// Screen area of a row-end drop slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowEndHit {
    /// Last widget of the row the slot trails.
    pub last_widget_id: String,
    /// Slot area.
    pub area: Rect,
}

/// A card under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardTarget<'a> {
    /// Widget under the pointer.
    pub widget_id: &'a str,
    /// Whether the pointer is on the card's bottom-right resize handle.
    pub on_resize_handle: bool,
}

/// Where cards and drop slots were drawn in the last render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitMap {
    /// Cards in display order.
    pub cards: Vec<CardHit>,
    /// Row-end slots, top to bottom.
    pub row_ends: Vec<RowEndHit>,
}

impl HitMap {
    /// Card at a terminal cell.
    ///
    /// The resize handle is the last two columns of the card's bottom
    /// border, so a one-cell miss still grabs it.
    pub fn card_at(&self, column: u16, row: u16) -> Option<CardTarget<'_>> {
        let position = Position::new(column, row);
        self.cards
            .iter()
            .find(|card| card.area.contains(position))
            .map(|card| CardTarget {
                widget_id: &card.widget_id,
                on_resize_handle: column + 2 >= card.area.right()
                    && row + 1 == card.area.bottom(),
            })
    }

    /// Drop target at a terminal cell: a card or a row-end slot.
    pub fn drop_target_at(&self, column: u16, row: u16) -> Option<DropTarget> {
        if let Some(card) = self.card_at(column, row) {
            return Some(DropTarget::Widget(card.widget_id.to_string()));
        }
        let position = Position::new(column, row);
        self.row_ends
            .iter()
            .find(|slot| slot.area.contains(position))
            .map(|slot| DropTarget::RowEnd(slot.last_widget_id.clone()))
    }

    /// Area of the card showing `widget_id`.
    pub fn card_area(&self, widget_id: &str) -> Option<Rect> {
        self.cards
            .iter()
            .find(|card| card.widget_id == widget_id)
            .map(|card| card.area)
    }

    /// Area of the slot trailing the row that ends with `last_widget_id`.
    pub fn row_end_area(&self, last_widget_id: &str) -> Option<Rect> {
        self.row_ends
            .iter()
            .find(|slot| slot.last_widget_id == last_widget_id)
            .map(|slot| slot.area)
    }

    /// Returns `true` if nothing was drawn.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty() && self.row_ends.is_empty()
    }
}

/// Interaction state the board needs to draw highlights.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoardView<'a> {
    /// Focused widget.
    pub selected: Option<&'a str>,
    /// Widget whose row must stay on screen.
    pub follow: Option<&'a str>,
    /// Edit affordances are shown.
    pub edit_mode: bool,
    /// Widget being dragged.
    pub drag_source: Option<&'a str>,
    /// Drop zone under the pointer.
    pub hovered: Option<&'a DropTarget>,
    /// Widget being resized.
    pub resizing: Option<&'a str>,
    /// Requested first row.
    pub offset: usize,
}

/// Result of a board render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardOutcome {
    /// Where things were drawn.
    pub hit_map: HitMap,
    /// First row actually drawn, after clamping and following the selection.
    pub offset: usize,
}

/// Lines a packed row occupies: its tallest card, at least [`MIN_ROW_LINES`].
pub fn row_lines(row: &[&Widget]) -> u16 {
    let px = row
        .iter()
        .map(|w| w.custom_height.unwrap_or(DEFAULT_BASELINE_HEIGHT_PX))
        .max()
        .unwrap_or(DEFAULT_BASELINE_HEIGHT_PX);
    let lines = px.div_ceil(u32::from(LINE_PX));
    u16::try_from(lines)
        .unwrap_or(u16::MAX)
        .max(MIN_ROW_LINES)
}

/// Columns a row may span in a viewport `width` columns wide.
pub fn row_columns(width: u16) -> u16 {
    let viewport_px = u32::from(width) * u32::from(COLUMN_PX);
    let cap = responsive_row_max_width(viewport_px) / u32::from(COLUMN_PX);
    u16::try_from(cap).unwrap_or(width).clamp(1, width.max(1))
}

/// Chooses the first row to draw.
///
/// `requested` is clamped to the last row, then moved the least distance
/// that brings the row holding `follow` fully on screen.
pub fn visible_offset(
    rows: &[Row<'_>],
    height: u16,
    requested: usize,
    follow: Option<&str>,
) -> usize {
    if rows.is_empty() {
        return 0;
    }
    let mut offset = requested.min(rows.len() - 1);
    let Some(target) = follow.and_then(|id| rows.iter().position(|r| r.iter().any(|w| w.id == id)))
    else {
        return offset;
    };
    if target < offset {
        return target;
    }
    let span = |from: usize| -> u32 {
        rows[from..=target]
            .iter()
            .map(|row| u32::from(row_lines(row)))
            .sum()
    };
    while offset < target && span(offset) > u32::from(height) {
        offset += 1;
    }
    offset
}

/// Renders `displayed` (already filtered and ordered) into `area`.
pub fn render_board(
    frame: &mut Frame,
    area: Rect,
    displayed: &[&Widget],
    view: &BoardView<'_>,
) -> BoardOutcome {
    if area.is_empty() {
        return BoardOutcome::default();
    }
    if displayed.is_empty() {
        let message = Paragraph::new(EMPTY_BOARD_TEXT)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        let y = area.y + area.height / 2;
        let line = Rect {
            y,
            height: area.bottom().saturating_sub(y).min(2),
            ..area
        };
        frame.render_widget(message, line);
        return BoardOutcome::default();
    }

    let rows = pack_into_rows(displayed.iter().copied());
    let offset = visible_offset(&rows, area.height, view.offset, view.follow);

    let width = row_columns(area.width);
    let x = area.x + area.width.saturating_sub(width) / 2;

    let mut hit_map = HitMap::default();
    let mut y = area.y;
    for row in &rows[offset..] {
        let remaining = area.bottom().saturating_sub(y);
        if remaining < MIN_ROW_LINES {
            break;
        }
        let row_area = Rect {
            x,
            y,
            width,
            height: row_lines(row).min(remaining),
        };
        render_row(frame, row_area, row, view, &mut hit_map);
        y += row_area.height;
    }

    BoardOutcome { hit_map, offset }
}

fn render_row(
    frame: &mut Frame,
    area: Rect,
    row: &[&Widget],
    view: &BoardView<'_>,
    hit_map: &mut HitMap,
) {
    let with_slot = view.edit_mode && row_units(row) < ROW_CAPACITY_UNITS;

    let mut constraints: Vec<Constraint> = row
        .iter()
        .map(|widget| match compute_style(widget).basis {
            FlexBasis::Grow { grow, .. } => Constraint::Fill(grow),
            FlexBasis::FullRow => Constraint::Fill(1),
        })
        .collect();
    if with_slot {
        constraints.push(Constraint::Length(DROP_SLOT_COLUMNS));
    }
    let cells = Layout::horizontal(constraints).split(area);

    for (widget, cell) in row.iter().zip(cells.iter()) {
        let state = CardState {
            selected: view.selected == Some(widget.id.as_str()),
            edit_mode: view.edit_mode,
            dragging: view.drag_source == Some(widget.id.as_str()),
            drop_hover: matches!(view.hovered, Some(DropTarget::Widget(id)) if *id == widget.id),
            resizing: view.resizing == Some(widget.id.as_str()),
        };
        render_card(frame, *cell, widget, state);
        hit_map.cards.push(CardHit {
            widget_id: widget.id.clone(),
            area: *cell,
        });
    }

    if let (true, Some(last)) = (with_slot, row.last()) {
        let slot = cells[row.len()];
        let hovered = matches!(view.hovered, Some(DropTarget::RowEnd(id)) if *id == last.id);
        render_drop_slot(frame, slot, hovered, view.drag_source.is_some());
        hit_map.row_ends.push(RowEndHit {
            last_widget_id: last.id.clone(),
            area: slot,
        });
    }
}

fn render_drop_slot(frame: &mut Frame, area: Rect, hovered: bool, dragging: bool) {
    let color = if hovered {
        Color::Green
    } else if dragging {
        Color::Gray
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(color));
    let marker = Paragraph::new("+")
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(marker, area);
}

#[cfg(test)]
mod tests;
