//! Dialogs drawn over the board.

use crate::tui::app::Modal;
use crate::tui::views::card::summary;
use crate::widgets::{WidgetKind, KNOWN_KINDS};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Centers a `width` x `height` box in `area`, shrinking it to fit.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Renders `modal` centered in `area`.
pub fn render_modal(frame: &mut Frame, area: Rect, modal: &Modal) {
    match modal {
        Modal::AddWidget { kind_index, title } => render_add(frame, area, *kind_index, title),
        Modal::EditTitle { title, .. } => render_edit_title(frame, area, title),
    }
}

fn input_line(title: &str, placeholder: &str) -> Line<'static> {
    if title.is_empty() {
        Line::from(vec![
            Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray)),
            Span::styled("_", Style::default().fg(Color::Cyan)),
        ])
    } else {
        Line::from(vec![
            Span::raw(title.to_string()),
            Span::styled("_", Style::default().fg(Color::Cyan)),
        ])
    }
}

fn render_add(frame: &mut Frame, area: Rect, kind_index: usize, title: &str) {
    let height = KNOWN_KINDS.len() as u16 + 6;
    let popup = centered_rect(area, 44, height);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Add widget ");
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let [list_area, label_area, input_area, _, hint_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let items: Vec<ListItem> = KNOWN_KINDS
        .iter()
        .map(|name| {
            ListItem::new(Line::from(vec![
                Span::raw(format!("{name:<12}")),
                Span::styled(
                    summary(&WidgetKind::parse(name)),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();
    let list = List::new(items)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(kind_index % KNOWN_KINDS.len()));
    frame.render_stateful_widget(list, list_area, &mut state);

    let default_title =
        WidgetKind::parse(KNOWN_KINDS[kind_index % KNOWN_KINDS.len()]).default_title();
    frame.render_widget(
        Paragraph::new(Span::styled("Title", Style::default().fg(Color::Gray))),
        label_area,
    );
    frame.render_widget(Paragraph::new(input_line(title, &default_title)), input_area);
    frame.render_widget(
        Paragraph::new(Span::styled(
            "[↑/↓] Type  [Enter] Add  [Esc] Cancel",
            Style::default().fg(Color::DarkGray),
        )),
        hint_area,
    );
}

fn render_edit_title(frame: &mut Frame, area: Rect, title: &str) {
    let popup = centered_rect(area, 44, 5);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Rename widget ");
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let [input_area, _, hint_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);
    frame.render_widget(Paragraph::new(input_line(title, "")), input_area);
    frame.render_widget(
        Paragraph::new(Span::styled(
            "[Enter] Save  [Esc] Cancel",
            Style::default().fg(Color::DarkGray),
        )),
        hint_area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::test_utils::{find_row_with_text, row_text, test_terminal};

    fn draw(modal: &Modal) -> ratatui::buffer::Buffer {
        let mut terminal = test_terminal(80, 30);
        terminal
            .draw(|frame| render_modal(frame, frame.area(), modal))
            .expect("draw");
        terminal.backend().buffer().clone()
    }

    #[test]
    fn centered_rect_shrinks_to_fit() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered_rect(area, 10, 4), Rect::new(5, 3, 10, 4));
        assert_eq!(centered_rect(area, 40, 40), area);
    }

    #[test]
    fn add_modal_lists_kinds_and_marks_selection() {
        let buffer = draw(&Modal::AddWidget {
            kind_index: 2,
            title: String::new(),
        });
        assert!(find_row_with_text(&buffer, "Add widget").is_some());
        assert!(find_row_with_text(&buffer, "statistics").is_some());
        assert!(find_row_with_text(&buffer, "calendar").is_some());
        let row = find_row_with_text(&buffer, "> garnishment").expect("highlighted kind");
        assert!(row_text(&buffer, row).contains("Active orders"));
    }

    #[test]
    fn add_modal_shows_typed_title() {
        let buffer = draw(&Modal::AddWidget {
            kind_index: 0,
            title: "Q3 remittances".to_string(),
        });
        assert!(find_row_with_text(&buffer, "Q3 remittances_").is_some());
    }

    #[test]
    fn edit_modal_shows_current_title() {
        let buffer = draw(&Modal::EditTitle {
            widget_id: "event-1".to_string(),
            title: "Hearings".to_string(),
        });
        assert!(find_row_with_text(&buffer, "Rename widget").is_some());
        assert!(find_row_with_text(&buffer, "Hearings_").is_some());
    }
}
