//! Tests for the WidgetStore module.
//!
//! Tests are organized into categories:
//! - `basic`: loading, lookup, queries and simple field updates
//! - `ordering`: add/remove/reposition and position density
//! - `persistence`: write-through, round-trips and corrupt-data fallback
//! - `sizing`: custom sizes, presets and resize application

mod persistence;
mod sizing;

use super::{storage_key, MemoryStorage, WidgetStore};
use crate::widgets::{Widget, WidgetKind, WidthClass};

/// Builds a widget of kind `expenses` with the given width unit.
pub(super) fn widget(id: &str, unit: u8, position: usize) -> Widget {
    let mut w = Widget::new(id, WidgetKind::Expenses, id, position);
    w.custom_width = WidthClass::from_unit(unit);
    w
}

/// Store for `tester` preloaded with `widgets`.
pub(super) fn store_with(widgets: Vec<Widget>) -> WidgetStore<MemoryStorage> {
    let json = serde_json::to_string(&widgets).expect("fixture serializes");
    let storage = MemoryStorage::new().with_entry(&storage_key("tester"), &json);
    WidgetStore::load(storage, "tester")
}

/// The A(1) B(1) C(2) D(1) fixture.
pub(super) fn abcd_store() -> WidgetStore<MemoryStorage> {
    store_with(vec![
        widget("A", 1, 0),
        widget("B", 1, 1),
        widget("C", 2, 2),
        widget("D", 1, 3),
    ])
}

/// Ids of `query(show_hidden)` in order.
pub(super) fn query_ids(store: &WidgetStore<MemoryStorage>, show_hidden: bool) -> Vec<String> {
    store
        .query(show_hidden)
        .iter()
        .map(|w| w.id.clone())
        .collect()
}

/// Asserts positions across the full collection are exactly `0..len`.
pub(super) fn assert_dense(store: &WidgetStore<MemoryStorage>) {
    let mut positions: Vec<usize> = store.widgets().iter().map(|w| w.position).collect();
    positions.sort_unstable();
    let expected: Vec<usize> = (0..store.len()).collect();
    assert_eq!(positions, expected, "positions must be dense");
}
