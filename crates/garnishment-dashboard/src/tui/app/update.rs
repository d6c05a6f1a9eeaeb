use super::*;
use crate::interaction::Point;
use crate::tui::views::board::{COLUMN_PX, LINE_PX};
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

/// Converts a terminal cell to board pixels.
pub(crate) fn cell_to_point(column: u16, row: u16) -> Point {
    Point::new(
        i32::from(column) * i32::from(COLUMN_PX),
        i32::from(row) * i32::from(LINE_PX),
    )
}

impl<S: Storage> App<S> {
    /// Applies an action to the store and reports the outcome in the footer.
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Quit => self.should_quit = true,
            Action::ToggleEditMode => {
                if self.store.toggle_edit_mode() {
                    self.set_status("Edit mode: drag a card to move it, drag its corner to resize");
                } else {
                    self.cancel_gestures();
                    self.set_status("Edit mode off");
                }
            }
            Action::ToggleShowHidden => {
                let rank = self.selected_rank();
                let on = self.store.toggle_show_hidden();
                self.ensure_selection(rank);
                self.set_status(if on {
                    "Showing hidden widgets"
                } else {
                    "Hiding hidden widgets"
                });
            }
            Action::ToggleVisibility(id) => {
                let Some(widget) = self.store.get(&id) else {
                    return;
                };
                let (visible, title) = (!widget.visible, widget.title.clone());
                let rank = self.selected_rank();
                self.store.set_visibility(&id, visible);
                self.ensure_selection(rank);
                self.set_status(if visible {
                    format!("Showing {title}")
                } else {
                    format!("Hid {title}")
                });
            }
            Action::CycleSize(id) => {
                let Some(size) = self.store.get(&id).map(|w| w.size.next()) else {
                    return;
                };
                self.store.set_size(&id, size);
                self.set_status(format!("Size: {size}"));
            }
            Action::SwitchPreset(index) => {
                if self.presets.switch_by_index(index) {
                    let preset = self.presets.active();
                    self.store.apply_preset(preset);
                    self.set_status(format!("Preset: {preset}"));
                }
            }
            Action::ResetSizes => {
                self.store.reset_all_custom_sizes();
                self.presets = PresetManager::default();
                self.set_status("Custom sizes cleared");
            }
            Action::Remove(id) => {
                let title = self.store.get(&id).map(|w| w.title.clone());
                let rank = self.selected_rank();
                if self.store.remove(&id) {
                    self.ensure_selection(rank);
                    self.set_status(format!("Removed {}", title.unwrap_or(id)));
                }
            }
            Action::AddWidget { kind, title } => {
                let id = self.store.add(kind, &title);
                self.selected = Some(id);
                self.set_status(format!("Added {title}"));
            }
            Action::Rename { id, title } => {
                if self.store.set_title(&id, &title) {
                    self.set_status(format!("Renamed to {title}"));
                }
            }
        }
    }

    /// Handles mouse events for selection, board scrolling and edit gestures.
    ///
    /// Outside edit mode a left press only selects. In edit mode a press on
    /// a card's bottom-right corner starts a resize and a press elsewhere on
    /// a card starts a reorder drag.
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        let (column, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.on_press(column, row),
            MouseEventKind::Drag(MouseButton::Left) => self.on_drag(column, row),
            MouseEventKind::Up(MouseButton::Left) => self.on_release(column, row),
            MouseEventKind::ScrollDown => {
                self.follow_selection = false;
                self.board_offset += 1;
            }
            MouseEventKind::ScrollUp => {
                self.follow_selection = false;
                self.board_offset = self.board_offset.saturating_sub(1);
            }
            _ => {}
        }
    }

    fn on_press(&mut self, column: u16, row: u16) {
        if self.modal.is_some() {
            return;
        }
        let Some(hit) = self.hit_map.card_at(column, row) else {
            return;
        };
        let (id, on_handle) = (hit.widget_id.to_string(), hit.on_resize_handle);
        self.selected = Some(id.clone());
        if !self.store.edit_mode() {
            return;
        }
        self.cancel_gestures();
        if on_handle {
            self.resize.begin(&self.store, &id, cell_to_point(column, row));
        } else {
            self.reorder.begin(&self.store, &id);
        }
    }

    fn on_drag(&mut self, column: u16, row: u16) {
        if self.resize.is_resizing() {
            if let Some(update) = self
                .resize
                .on_pointer_move(&mut self.store, cell_to_point(column, row))
            {
                self.set_status(format!(
                    "Width {} unit{} · height {}px",
                    update.width.unit(),
                    if update.width.unit() == 1 { "" } else { "s" },
                    update.height
                ));
            }
        } else if self.reorder.is_dragging() {
            let target = self.hit_map.drop_target_at(column, row);
            self.reorder.drag_over(target);
        }
    }

    fn on_release(&mut self, column: u16, row: u16) {
        if self.resize.is_resizing() {
            self.resize.end();
        } else if self.reorder.is_dragging() {
            match self.hit_map.drop_target_at(column, row) {
                Some(target) => {
                    if let Some(position) = self.reorder.drop(&mut self.store, target) {
                        self.set_status(format!("Moved to position {}", position + 1));
                    }
                }
                None => self.reorder.end(),
            }
        }
    }
}
