pub(crate) use super::*;
pub(crate) use crate::store::MemoryStorage;
pub(crate) use crate::tui::test_utils::{
    abcd_app, app_with, drag, make_widget, mouse, press, release, render_app,
};


/// Ids of every widget in position order, hidden included.
pub(crate) fn order(app: &App<MemoryStorage>) -> Vec<String> {
    app.store.query(true).iter().map(|w| w.id.clone()).collect()
}

/// Current status message text, if any.
pub(crate) fn status(app: &App<MemoryStorage>) -> Option<&str> {
    app.status_message.as_ref().map(|(text, _)| text.as_str())
}

/// Center cell of the card showing `id` in the last render.
pub(crate) fn card_center(app: &App<MemoryStorage>, id: &str) -> (u16, u16) {
    let area = app.hit_map.card_area(id).expect("card rendered");
    (area.x + area.width / 2, area.y + area.height / 2)
}
