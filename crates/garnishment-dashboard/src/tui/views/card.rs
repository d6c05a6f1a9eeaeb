//! Card rendering for a single widget.
//!
//! Cards show a kind-specific summary line. Figures come from the
//! reporting backend, which this board does not talk to, so the body
//! describes what the card reports rather than live numbers.

use crate::layout::compute_style;
use crate::interaction::DEFAULT_BASELINE_HEIGHT_PX;
use crate::widgets::{ChartStyle, Widget, WidgetKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

/// Glyph drawn on the resize handle.
pub const RESIZE_HANDLE: &str = "◢";

/// Interaction state affecting how a card is drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardState {
    /// Keyboard focus.
    pub selected: bool,
    /// Edit affordances are shown.
    pub edit_mode: bool,
    /// Being dragged.
    pub dragging: bool,
    /// Under the pointer of a drag.
    pub drop_hover: bool,
    /// Being resized.
    pub resizing: bool,
}

/// Border color for a card in `state`. Gesture states win over focus.
pub fn border_color(widget: &Widget, state: CardState) -> Color {
    if state.resizing {
        Color::Magenta
    } else if state.drop_hover {
        Color::Green
    } else if state.dragging {
        Color::Yellow
    } else if state.selected {
        Color::Cyan
    } else if !widget.visible {
        Color::DarkGray
    } else {
        Color::Gray
    }
}

/// One-line summary of what the card reports.
pub fn summary(kind: &WidgetKind) -> String {
    match kind {
        WidgetKind::Statistics(cfg) => {
            format!("Orders, employees and remittances, {}", cfg.period.label())
        }
        WidgetKind::Expenses => "Processing fees and remittance costs".to_string(),
        WidgetKind::Garnishment(cfg) => {
            let pending = if cfg.include_pending {
                " incl. pending"
            } else {
                ""
            };
            format!("Active orders by type{pending}, {}", cfg.period.label())
        }
        WidgetKind::Chart(cfg) => {
            let style = match cfg.style {
                ChartStyle::Bar => "Bar",
                ChartStyle::Line => "Line",
                ChartStyle::Area => "Area",
            };
            format!("{style} chart of processed orders, {}", cfg.period.label())
        }
        WidgetKind::Activity(cfg) => format!("Latest {} order events", cfg.limit),
        WidgetKind::Browsers => "Portal sessions by browser".to_string(),
        WidgetKind::Followers => "Employers subscribed to updates".to_string(),
        WidgetKind::Referral => "Where new employers came from".to_string(),
        WidgetKind::Engagement => "Portal logins and uploads".to_string(),
        WidgetKind::Testimonial => "Latest employer feedback".to_string(),
        WidgetKind::Event => "Upcoming hearings and deadlines".to_string(),
        WidgetKind::Project => "Integration projects in flight".to_string(),
        WidgetKind::Calendar(cfg) => {
            let start = if cfg.week_starts_monday {
                "Monday"
            } else {
                "Sunday"
            };
            format!("Month view, weeks start {start}")
        }
        WidgetKind::Unknown { name, .. } => format!("Unsupported widget type: {name}"),
    }
}

/// Size line shown in edit mode, e.g. `2u · 360px · large`.
pub fn size_line(widget: &Widget) -> String {
    let style = compute_style(widget);
    let height = style.height_px.unwrap_or(DEFAULT_BASELINE_HEIGHT_PX);
    let auto = if widget.custom_width.is_none() && widget.custom_height.is_none() {
        " (auto)"
    } else {
        ""
    };
    format!(
        "{}u · {}px · {}{}",
        widget.width_class().unit(),
        height,
        widget.size,
        auto
    )
}

/// Renders `widget` into `area`.
pub fn render_card(frame: &mut Frame, area: Rect, widget: &Widget, state: CardState) {
    let color = border_color(widget, state);
    let mut title_style = Style::default().fg(color);
    if state.selected {
        title_style = title_style.add_modifier(Modifier::BOLD);
    }

    let mut title = vec![Span::styled(format!(" {} ", widget.title), title_style)];
    if !widget.visible {
        title.push(Span::styled(
            "(hidden) ",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if state.selected {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .border_style(Style::default().fg(color))
        .title(Line::from(title));

    let mut lines = vec![Line::from(Span::styled(
        summary(&widget.kind),
        Style::default().fg(Color::White),
    ))];
    if state.edit_mode {
        lines.push(Line::from(Span::styled(
            size_line(widget),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let body = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(body, area);

    if state.edit_mode && area.width >= 2 && area.height >= 2 {
        let handle = Rect {
            x: area.right() - 1,
            y: area.bottom() - 1,
            width: 1,
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(RESIZE_HANDLE).style(Style::default().fg(color)),
            handle,
        );
    }
}
