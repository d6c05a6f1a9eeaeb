//! Main rendering orchestration for the TUI dashboard.
//!
//! Composes the header, the widget board, the footer and any open modal.

use crate::store::Storage;
use crate::tui::app::App;
use crate::tui::views::board::{render_board, BoardView};
use crate::tui::views::modal::render_modal;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Instant;

/// Header text displayed at the top of the dashboard.
const HEADER_TEXT: &str = "Garnishment Analytics";

/// Footer key hints outside edit mode.
const FOOTER_TEXT: &str =
    "[j/k] Select  [e] Edit  [h] Hidden  [v] Show/Hide  [s] Size  [1-4] Preset  [r] Reset  [q] Quit";

/// Footer key hints in edit mode.
const FOOTER_EDIT_TEXT: &str =
    "[drag] Move  [drag ◢] Resize  [a] Add  [t] Rename  [x] Remove  [v] Show/Hide  [e] Done";

/// Renders the full dashboard: header, board, footer and modal overlay.
///
/// Stores the board's hit map and effective scroll offset back into `app`
/// so mouse events can be resolved against what is on screen.
pub fn render_dashboard<S: Storage>(frame: &mut Frame, app: &mut App<S>) {
    let area = frame.area();
    let [header_area, board_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(frame, header_area, app);

    let outcome = {
        let displayed = app.store.displayed();
        let view = BoardView {
            selected: app.selected.as_deref(),
            follow: if app.follow_selection {
                app.selected.as_deref()
            } else {
                None
            },
            edit_mode: app.store.edit_mode(),
            drag_source: app.reorder.source(),
            hovered: app.reorder.hovered(),
            resizing: app.resize.active_widget(),
            offset: app.board_offset,
        };
        render_board(frame, board_area, &displayed, &view)
    };
    app.hit_map = outcome.hit_map;
    app.board_offset = outcome.offset;

    render_footer(frame, footer_area, app);

    if let Some(modal) = &app.modal {
        render_modal(frame, area, modal);
    }
}

fn render_header<S: Storage>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let mut left = vec![Span::styled(
        HEADER_TEXT,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];
    if app.store.edit_mode() {
        left.push(Span::raw(" "));
        left.push(Span::styled(
            " EDIT ",
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ));
    }

    let shown = app.store.displayed().len();
    let total = app.store.len();
    let hidden = if app.store.show_hidden() {
        ", hidden shown"
    } else {
        ""
    };
    let right = format!(
        "{}  preset {} ({})  {}/{} widgets{}",
        app.store.user_id(),
        app.presets.active(),
        app.presets.active_index(),
        shown,
        total,
        hidden
    );

    // Format: "[title][badge]...[summary]"
    let left_len: usize = left.iter().map(|s| s.content.chars().count()).sum();
    let padding = (area.width as usize)
        .saturating_sub(left_len)
        .saturating_sub(right.chars().count());
    left.push(Span::raw(" ".repeat(padding)));
    left.push(Span::styled(right, Style::default().fg(Color::DarkGray)));
    frame.render_widget(Paragraph::new(Line::from(left)), area);
}

fn render_footer<S: Storage>(frame: &mut Frame, area: Rect, app: &App<S>) {
    // An active status message overrides the key hints
    let line = match &app.status_message {
        Some((message, expiry)) if Instant::now() < *expiry => Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Yellow),
        )),
        _ => {
            let hints = if app.store.edit_mode() {
                FOOTER_EDIT_TEXT
            } else {
                FOOTER_TEXT
            };
            Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray)))
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}
