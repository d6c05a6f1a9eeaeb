//! Resize gesture: `Idle -> Resizing -> Idle`.
//!
//! Horizontal displacement changes the width class in steps of
//! [`RESIZE_SENSITIVITY_PX`]. The result is clamped to one or two units, so a
//! drag never produces the full-row class; that one is only reachable through
//! the `stacked` preset. Vertical displacement changes the height, floored at
//! [`MIN_HEIGHT_PX`].

use crate::store::{Storage, WidgetStore};
use crate::widgets::WidthClass;

/// Pixels of horizontal drag per width unit.
pub const RESIZE_SENSITIVITY_PX: i32 = 200;

/// Smallest height a drag can produce.
pub const MIN_HEIGHT_PX: u32 = 200;

/// Row siblings only follow heights above this.
pub const SIBLING_HEIGHT_THRESHOLD_PX: u32 = 250;

/// Baseline height of a widget without a height override.
pub const DEFAULT_BASELINE_HEIGHT_PX: u32 = 300;

/// Pointer position in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    /// Horizontal coordinate, growing rightwards.
    pub x: i32,
    /// Vertical coordinate, growing downwards.
    pub y: i32,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Widget geometry captured when the gesture began.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Baseline {
    widget_id: String,
    start: Point,
    unit: u8,
    height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum ResizeState {
    #[default]
    Idle,
    Resizing(Baseline),
}

/// Outcome of one pointer move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeUpdate {
    /// The dragged widget.
    pub widget_id: String,
    /// Width applied to it.
    pub width: WidthClass,
    /// Height applied to it.
    pub height: u32,
    /// Row siblings that received the same height.
    pub propagated_to: Vec<String>,
}

/// Tracks one resize gesture at a time.
#[derive(Debug, Clone, Default)]
pub struct ResizeController {
    state: ResizeState,
}

impl ResizeController {
    /// Creates an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts resizing `widget_id` from `start`.
    ///
    /// Returns `false` and stays idle if the widget does not exist. A gesture
    /// already in progress is replaced.
    pub fn begin<S: Storage>(
        &mut self,
        store: &WidgetStore<S>,
        widget_id: &str,
        start: Point,
    ) -> bool {
        let Some(widget) = store.get(widget_id) else {
            tracing::debug!("resize begin on missing widget {}", widget_id);
            return false;
        };
        let baseline = Baseline {
            widget_id: widget.id.clone(),
            start,
            unit: widget.width_class().unit(),
            height: widget.custom_height.unwrap_or(DEFAULT_BASELINE_HEIGHT_PX),
        };
        tracing::trace!(
            "resize begin {} at unit {} height {}",
            baseline.widget_id,
            baseline.unit,
            baseline.height
        );
        self.state = ResizeState::Resizing(baseline);
        true
    }

    /// Applies the pointer at `current` to the widget being resized.
    ///
    /// Returns `None` when idle. If the widget disappeared mid-gesture the
    /// controller returns to idle.
    pub fn on_pointer_move<S: Storage>(
        &mut self,
        store: &mut WidgetStore<S>,
        current: Point,
    ) -> Option<ResizeUpdate> {
        let ResizeState::Resizing(baseline) = &self.state else {
            return None;
        };

        let dx = current.x - baseline.start.x;
        let dy = current.y - baseline.start.y;

        let steps = (f64::from(dx) / f64::from(RESIZE_SENSITIVITY_PX)).round() as i32;
        let unit = (i32::from(baseline.unit) + steps).clamp(1, 2) as u8;
        let width = WidthClass::from_unit(unit).unwrap_or(WidthClass::One);

        let height = (i64::from(baseline.height) + i64::from(dy)).max(i64::from(MIN_HEIGHT_PX));
        let height = u32::try_from(height).unwrap_or(u32::MAX);

        let widget_id = baseline.widget_id.clone();
        let propagate = height > SIBLING_HEIGHT_THRESHOLD_PX;

        match store.apply_resize(&widget_id, width, height, propagate) {
            Some(propagated_to) => Some(ResizeUpdate {
                widget_id,
                width,
                height,
                propagated_to,
            }),
            None => {
                self.end();
                None
            }
        }
    }

    /// Returns to idle. Calling it again has no further effect.
    pub fn end(&mut self) {
        self.state = ResizeState::Idle;
    }

    /// Whether a gesture is in progress.
    pub fn is_resizing(&self) -> bool {
        matches!(self.state, ResizeState::Resizing(_))
    }

    /// Widget being resized, if any.
    pub fn active_widget(&self) -> Option<&str> {
        match &self.state {
            ResizeState::Resizing(baseline) => Some(&baseline.widget_id),
            ResizeState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{storage_key, MemoryStorage};
    use crate::widgets::{Widget, WidgetKind};

    fn store() -> WidgetStore<MemoryStorage> {
        let widgets: Vec<Widget> = ["A", "B", "C", "D"]
            .iter()
            .enumerate()
            .map(|(i, id)| Widget::new(*id, WidgetKind::Followers, *id, i))
            .collect();
        let json = serde_json::to_string(&widgets).expect("fixture serializes");
        WidgetStore::load(
            MemoryStorage::new().with_entry(&storage_key("u"), &json),
            "u",
        )
    }

    #[test]
    fn move_while_idle_does_nothing() {
        let mut store = store();
        let mut ctl = ResizeController::new();
        assert!(ctl.on_pointer_move(&mut store, Point::new(500, 500)).is_none());
        assert!(store.widgets().iter().all(|w| w.custom_width.is_none()));
    }

    #[test]
    fn begin_on_missing_widget_stays_idle() {
        let store = store();
        let mut ctl = ResizeController::new();
        assert!(!ctl.begin(&store, "ghost", Point::default()));
        assert!(!ctl.is_resizing());
    }

    #[test]
    fn widening_drag_steps_one_unit() {
        let mut store = store();
        let mut ctl = ResizeController::new();
        assert!(ctl.begin(&store, "A", Point::new(100, 100)));
        assert_eq!(ctl.active_widget(), Some("A"));

        let update = ctl
            .on_pointer_move(&mut store, Point::new(320, 100))
            .expect("resizing");
        assert_eq!(update.width, WidthClass::Two);
        assert_eq!(update.height, DEFAULT_BASELINE_HEIGHT_PX);
    }

    #[test]
    fn width_never_exceeds_two_units() {
        let mut store = store();
        let mut ctl = ResizeController::new();
        ctl.begin(&store, "A", Point::new(0, 0));
        let update = ctl
            .on_pointer_move(&mut store, Point::new(2000, 0))
            .expect("resizing");
        assert_eq!(update.width, WidthClass::Two);
        assert_eq!(store.get("A").and_then(|w| w.custom_width), Some(WidthClass::Two));
    }

    #[test]
    fn full_row_widget_narrows_to_two_units() {
        let mut store = store();
        store.apply_uniform_width(WidthClass::Three);
        let mut ctl = ResizeController::new();
        ctl.begin(&store, "B", Point::new(0, 0));
        let update = ctl
            .on_pointer_move(&mut store, Point::new(0, 0))
            .expect("resizing");
        assert_eq!(update.width, WidthClass::Two);
    }

    #[test]
    fn narrowing_drag_floors_at_one_unit() {
        let mut store = store();
        let mut ctl = ResizeController::new();
        ctl.begin(&store, "A", Point::new(1000, 0));
        let update = ctl
            .on_pointer_move(&mut store, Point::new(0, 0))
            .expect("resizing");
        assert_eq!(update.width, WidthClass::One);
    }

    #[test]
    fn height_floors_at_minimum() {
        let mut store = store();
        let mut ctl = ResizeController::new();
        ctl.begin(&store, "A", Point::new(0, 0));
        let update = ctl
            .on_pointer_move(&mut store, Point::new(0, -900))
            .expect("resizing");
        assert_eq!(update.height, MIN_HEIGHT_PX);
    }

    #[test]
    fn tall_height_propagates_to_row_siblings() {
        let mut store = store();
        let mut ctl = ResizeController::new();
        ctl.begin(&store, "B", Point::new(0, 0));
        let update = ctl
            .on_pointer_move(&mut store, Point::new(0, 60))
            .expect("resizing");
        assert_eq!(update.height, 360);
        assert_eq!(update.propagated_to, vec!["A", "C", "D"]);
        for id in ["A", "C", "D"] {
            assert_eq!(store.get(id).and_then(|w| w.custom_height), Some(360));
        }
    }

    #[test]
    fn short_height_stays_on_dragged_widget() {
        let mut store = store();
        let mut ctl = ResizeController::new();
        ctl.begin(&store, "B", Point::new(0, 0));
        let update = ctl
            .on_pointer_move(&mut store, Point::new(0, -60))
            .expect("resizing");
        assert_eq!(update.height, 240);
        assert!(update.propagated_to.is_empty());
        assert_eq!(store.get("B").and_then(|w| w.custom_height), Some(240));
        assert_eq!(store.get("A").and_then(|w| w.custom_height), None);
    }

    #[test]
    fn moves_apply_relative_to_baseline() {
        let mut store = store();
        let mut ctl = ResizeController::new();
        ctl.begin(&store, "A", Point::new(0, 0));
        ctl.on_pointer_move(&mut store, Point::new(0, 100));
        let update = ctl
            .on_pointer_move(&mut store, Point::new(0, 50))
            .expect("resizing");
        assert_eq!(update.height, 350);
    }

    #[test]
    fn widget_removed_mid_gesture_ends_it() {
        let mut store = store();
        let mut ctl = ResizeController::new();
        ctl.begin(&store, "C", Point::new(0, 0));
        store.remove("C");
        assert!(ctl.on_pointer_move(&mut store, Point::new(10, 10)).is_none());
        assert!(!ctl.is_resizing());
    }

    #[test]
    fn end_is_idempotent() {
        let store = store();
        let mut ctl = ResizeController::new();
        ctl.begin(&store, "A", Point::new(0, 0));
        ctl.end();
        let once = ctl.clone();
        ctl.end();
        assert_eq!(ctl.state, once.state);
        assert!(!ctl.is_resizing());
        assert_eq!(ctl.active_widget(), None);
    }
}
