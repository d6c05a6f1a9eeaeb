use super::*;
use crate::tui::app::Modal;
use crate::tui::test_utils::{abcd_app, key, ctrl_key};

#[test]
fn test_q_quits() {
    let mut app = abcd_app();
    assert_eq!(handle_key_event(&mut app, key(KeyCode::Char('q'))), Action::Quit);
}

#[test]
fn test_ctrl_c_quits_even_in_modal() {
    let mut app = abcd_app();
    app.store.set_edit_mode(true);
    app.open_add_modal();
    assert_eq!(handle_key_event(&mut app, ctrl_key('c')), Action::Quit);
}

#[test]
fn test_navigation_keys_move_selection() {
    let mut app = abcd_app();
    assert_eq!(app.selected.as_deref(), Some("A"));
    handle_key_event(&mut app, key(KeyCode::Char('j')));
    assert_eq!(app.selected.as_deref(), Some("B"));
    handle_key_event(&mut app, key(KeyCode::Down));
    assert_eq!(app.selected.as_deref(), Some("C"));
    handle_key_event(&mut app, key(KeyCode::Char('k')));
    assert_eq!(app.selected.as_deref(), Some("B"));
}

#[test]
fn test_tab_wraps_around() {
    let mut app = abcd_app();
    app.selected = Some("D".to_string());
    handle_key_event(&mut app, key(KeyCode::Tab));
    assert_eq!(app.selected.as_deref(), Some("A"));
    handle_key_event(&mut app, key(KeyCode::BackTab));
    assert_eq!(app.selected.as_deref(), Some("D"));
}

#[test]
fn test_toggle_keys_map_to_actions() {
    let mut app = abcd_app();
    assert_eq!(
        handle_key_event(&mut app, key(KeyCode::Char('e'))),
        Action::ToggleEditMode
    );
    assert_eq!(
        handle_key_event(&mut app, key(KeyCode::Char('h'))),
        Action::ToggleShowHidden
    );
    assert_eq!(
        handle_key_event(&mut app, key(KeyCode::Char('v'))),
        Action::ToggleVisibility("A".to_string())
    );
    assert_eq!(
        handle_key_event(&mut app, key(KeyCode::Char('s'))),
        Action::CycleSize("A".to_string())
    );
    assert_eq!(handle_key_event(&mut app, key(KeyCode::Char('r'))), Action::ResetSizes);
}

#[test]
fn test_number_keys_switch_presets() {
    let mut app = abcd_app();
    for (c, n) in [('1', 1), ('2', 2), ('3', 3), ('4', 4)] {
        assert_eq!(
            handle_key_event(&mut app, key(KeyCode::Char(c))),
            Action::SwitchPreset(n)
        );
    }
    assert_eq!(handle_key_event(&mut app, key(KeyCode::Char('5'))), Action::None);
}

#[test]
fn test_edit_keys_require_edit_mode() {
    let mut app = abcd_app();
    assert_eq!(handle_key_event(&mut app, key(KeyCode::Char('x'))), Action::None);
    assert_eq!(handle_key_event(&mut app, key(KeyCode::Char('a'))), Action::None);
    assert!(app.modal.is_none());
    let (msg, _) = app.status_message.clone().expect("hint shown");
    assert!(msg.contains("edit mode"));
}

#[test]
fn test_remove_key_in_edit_mode() {
    let mut app = abcd_app();
    app.store.set_edit_mode(true);
    app.selected = Some("C".to_string());
    assert_eq!(
        handle_key_event(&mut app, key(KeyCode::Delete)),
        Action::Remove("C".to_string())
    );
    assert_eq!(
        handle_key_event(&mut app, key(KeyCode::Char('x'))),
        Action::Remove("C".to_string())
    );
}

#[test]
fn test_no_selection_yields_no_action() {
    let mut app = abcd_app();
    handle_key_event(&mut app, key(KeyCode::Esc));
    assert!(app.selected.is_none());
    assert_eq!(handle_key_event(&mut app, key(KeyCode::Char('v'))), Action::None);
}

#[test]
fn test_add_modal_typing_and_confirm() {
    let mut app = abcd_app();
    app.store.set_edit_mode(true);
    handle_key_event(&mut app, key(KeyCode::Char('a')));
    assert!(matches!(app.modal, Some(Modal::AddWidget { .. })));

    // 'q' is text inside a modal
    for c in "Qqueue".chars() {
        assert_eq!(handle_key_event(&mut app, key(KeyCode::Char(c))), Action::None);
    }
    handle_key_event(&mut app, key(KeyCode::Backspace));
    handle_key_event(&mut app, key(KeyCode::Down));
    handle_key_event(&mut app, key(KeyCode::Down));

    let action = handle_key_event(&mut app, key(KeyCode::Enter));
    assert_eq!(
        action,
        Action::AddWidget {
            kind: WidgetKind::parse("garnishment"),
            title: "Qqueu".to_string(),
        }
    );
    assert!(app.modal.is_none());
}

#[test]
fn test_add_modal_blank_title_uses_default() {
    let mut app = abcd_app();
    app.store.set_edit_mode(true);
    handle_key_event(&mut app, key(KeyCode::Char('a')));
    handle_key_event(&mut app, key(KeyCode::Up));
    let action = handle_key_event(&mut app, key(KeyCode::Enter));
    assert_eq!(
        action,
        Action::AddWidget {
            kind: WidgetKind::parse("calendar"),
            title: "Calendar".to_string(),
        }
    );
}

#[test]
fn test_edit_title_modal_prefills_and_renames() {
    let mut app = abcd_app();
    app.store.set_edit_mode(true);
    app.selected = Some("B".to_string());
    handle_key_event(&mut app, key(KeyCode::Char('t')));
    match &app.modal {
        Some(Modal::EditTitle { widget_id, title }) => {
            assert_eq!(widget_id, "B");
            assert_eq!(title, "B");
        }
        other => panic!("expected EditTitle modal, got {other:?}"),
    }
    handle_key_event(&mut app, key(KeyCode::Char('2')));
    assert_eq!(
        handle_key_event(&mut app, key(KeyCode::Enter)),
        Action::Rename {
            id: "B".to_string(),
            title: "B2".to_string(),
        }
    );
}

#[test]
fn test_edit_title_rejects_blank() {
    let mut app = abcd_app();
    app.store.set_edit_mode(true);
    handle_key_event(&mut app, key(KeyCode::Char('t')));
    handle_key_event(&mut app, key(KeyCode::Backspace));
    assert_eq!(handle_key_event(&mut app, key(KeyCode::Enter)), Action::None);
    assert!(app.modal.is_some(), "modal stays open on blank title");
}

#[test]
fn test_esc_closes_modal() {
    let mut app = abcd_app();
    app.store.set_edit_mode(true);
    handle_key_event(&mut app, key(KeyCode::Char('a')));
    handle_key_event(&mut app, key(KeyCode::Esc));
    assert!(app.modal.is_none());
    assert_eq!(app.selected.as_deref(), Some("A"), "Esc in a modal keeps selection");
}
