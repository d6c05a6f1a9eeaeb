//! Pointer gesture controllers.
//!
//! Both controllers are headless state machines: the view feeds them
//! semantic callbacks (begin, move, drop, end) and they turn those into
//! [`WidgetStore`](crate::store::WidgetStore) mutations. Neither holds a
//! reference to the store between calls.

mod reorder;
mod resize;

pub use reorder::{DragReorderController, DropTarget};
pub use resize::{
    Point, ResizeController, ResizeUpdate, DEFAULT_BASELINE_HEIGHT_PX, MIN_HEIGHT_PX,
    RESIZE_SENSITIVITY_PX, SIBLING_HEIGHT_THRESHOLD_PX,
};
