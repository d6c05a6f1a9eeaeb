//! Custom sizes, presets and resize application.

use super::{abcd_store, store_with, widget};
use crate::layout::Preset;
use crate::widgets::WidthClass;

#[test]
fn test_apply_uniform_width_sets_every_widget() {
    let mut store = abcd_store();
    store.set_visibility("B", false);
    store.apply_uniform_width(WidthClass::Three);
    assert!(store
        .widgets()
        .iter()
        .all(|w| w.custom_width == Some(WidthClass::Three)));
}

#[test]
fn test_reset_all_custom_sizes() {
    let mut store = abcd_store();
    store.apply_resize("A", WidthClass::Two, 400, true);
    store.reset_all_custom_sizes();
    assert!(store
        .widgets()
        .iter()
        .all(|w| w.custom_width.is_none() && w.custom_height.is_none()));
}

#[test]
fn test_apply_preset_dispatches() {
    let mut store = abcd_store();
    store.apply_preset(Preset::Wide);
    assert!(store
        .widgets()
        .iter()
        .all(|w| w.custom_width == Some(WidthClass::Two)));
    store.apply_preset(Preset::Auto);
    assert!(store.widgets().iter().all(|w| w.custom_width.is_none()));
}

#[test]
fn test_row_siblings_follow_packing() {
    let store = abcd_store();
    assert_eq!(store.row_siblings("A"), vec!["B", "C"]);
    assert!(store.row_siblings("D").is_empty());
    assert!(store.row_siblings("ghost").is_empty());
}

#[test]
fn test_apply_resize_propagates_height_to_row() {
    let mut store = abcd_store();
    let touched = store
        .apply_resize("B", WidthClass::One, 320, true)
        .expect("B exists");
    assert_eq!(touched, vec!["A", "C"]);
    for id in ["A", "B", "C"] {
        assert_eq!(store.get(id).and_then(|w| w.custom_height), Some(320));
    }
    assert_eq!(store.get("D").and_then(|w| w.custom_height), None);
}

#[test]
fn test_apply_resize_without_propagation() {
    let mut store = abcd_store();
    let touched = store
        .apply_resize("A", WidthClass::Two, 220, false)
        .expect("A exists");
    assert!(touched.is_empty());
    assert_eq!(store.get("A").and_then(|w| w.custom_height), Some(220));
    assert_eq!(store.get("B").and_then(|w| w.custom_height), None);
}

#[test]
fn test_apply_resize_uses_row_after_width_change() {
    // Widening A to two units pushes C (two units) into D's row.
    let mut store = abcd_store();
    let touched = store
        .apply_resize("A", WidthClass::Two, 300, true)
        .expect("A exists");
    assert_eq!(touched, vec!["B"]);
}

#[test]
fn test_apply_resize_missing_widget() {
    let mut store = store_with(vec![widget("A", 1, 0)]);
    assert!(store.apply_resize("ghost", WidthClass::One, 300, true).is_none());
}
