pub(crate) use super::*;
pub(crate) use crate::tui::test_utils::{
    assert_fg_color, find_row_with_text, make_widget, row_text, test_terminal,
};
pub(crate) use ratatui::buffer::Buffer;


/// A1 B1 C2 D1: one full row, then D alone.
pub(crate) fn abcd() -> Vec<Widget> {
    vec![
        make_widget("A", 1, 0),
        make_widget("B", 1, 1),
        make_widget("C", 2, 2),
        make_widget("D", 1, 3),
    ]
}

/// Renders `widgets` full-screen and returns the buffer and outcome.
pub(crate) fn draw(
    width: u16,
    height: u16,
    widgets: &[Widget],
    view: &BoardView<'_>,
) -> (Buffer, BoardOutcome) {
    let refs: Vec<&Widget> = widgets.iter().collect();
    let mut terminal = test_terminal(width, height);
    let mut outcome = BoardOutcome::default();
    terminal
        .draw(|frame| {
            outcome = render_board(frame, frame.area(), &refs, view);
        })
        .expect("draw");
    (terminal.backend().buffer().clone(), outcome)
}
