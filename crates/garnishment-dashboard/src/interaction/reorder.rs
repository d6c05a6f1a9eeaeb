//! Drag-to-reorder gesture: `Idle -> Dragging -> Idle`.
//!
//! Drop targets are resolved to a rank in the full position-ordered
//! collection, hidden widgets included, not to an index in the displayed
//! sequence. A displayed index fed to `reposition` would land the source
//! before the wrong widget whenever a hidden widget precedes the target,
//! and would shuffle hidden widgets past their visible neighbours. The
//! two ranks coincide only when nothing is hidden.

use std::mem;

use crate::store::{Storage, WidgetStore};

/// Where a dragged widget was released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// Onto another widget: take that widget's slot.
    Widget(String),
    /// Onto the trailing drop zone of a row, identified by the row's last
    /// widget: go right after it.
    RowEnd(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging {
        source: String,
        over: Option<DropTarget>,
    },
}

/// Tracks one reorder drag at a time.
#[derive(Debug, Clone, Default)]
pub struct DragReorderController {
    state: DragState,
}

impl DragReorderController {
    /// Creates an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `widget_id` as the drag source. Returns `false` if it does not
    /// exist.
    pub fn begin<S: Storage>(&mut self, store: &WidgetStore<S>, widget_id: &str) -> bool {
        if store.get(widget_id).is_none() {
            tracing::debug!("drag begin on missing widget {}", widget_id);
            return false;
        }
        self.state = DragState::Dragging {
            source: widget_id.to_string(),
            over: None,
        };
        true
    }

    /// Records the drop zone under the pointer, for highlighting.
    pub fn drag_over(&mut self, target: Option<DropTarget>) {
        if let DragState::Dragging { over, .. } = &mut self.state {
            *over = target;
        }
    }

    /// Releases the drag on `target` and repositions the source.
    ///
    /// The drag state is cleared before the store is touched, so a second
    /// drop for the same gesture is a no-op. Returns the source's new
    /// position, or `None` if nothing moved.
    pub fn drop<S: Storage>(
        &mut self,
        store: &mut WidgetStore<S>,
        target: DropTarget,
    ) -> Option<usize> {
        let DragState::Dragging { source, .. } = mem::take(&mut self.state) else {
            return None;
        };

        let ordered: Vec<&str> = store.query(true).iter().map(|w| w.id.as_str()).collect();
        let rank = |id: &str| ordered.iter().position(|w| *w == id);

        let position = match &target {
            DropTarget::Widget(id) => rank(id.as_str())?,
            DropTarget::RowEnd(last) => {
                let last_rank = rank(last.as_str())?;
                let source_rank = rank(source.as_str())?;
                // Removing the source first shifts everything after it down by one.
                if source_rank <= last_rank {
                    last_rank
                } else {
                    last_rank + 1
                }
            }
        };

        tracing::debug!("drop {} on {:?} -> position {}", source, target, position);
        store.reposition(&source, position).then_some(position)
    }

    /// Drops onto another widget.
    pub fn drop_on_widget<S: Storage>(
        &mut self,
        store: &mut WidgetStore<S>,
        target_id: &str,
    ) -> Option<usize> {
        self.drop(store, DropTarget::Widget(target_id.to_string()))
    }

    /// Drops onto the end of the row whose last widget is `row_last_id`.
    pub fn drop_on_row_end<S: Storage>(
        &mut self,
        store: &mut WidgetStore<S>,
        row_last_id: &str,
    ) -> Option<usize> {
        self.drop(store, DropTarget::RowEnd(row_last_id.to_string()))
    }

    /// Cancels the drag without touching the store.
    pub fn end(&mut self) {
        self.state = DragState::Idle;
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// The widget being dragged, if any.
    pub fn source(&self) -> Option<&str> {
        match &self.state {
            DragState::Dragging { source, .. } => Some(source),
            DragState::Idle => None,
        }
    }

    /// The drop zone currently under the pointer, if any.
    pub fn hovered(&self) -> Option<&DropTarget> {
        match &self.state {
            DragState::Dragging { over, .. } => over.as_ref(),
            DragState::Idle => None,
        }
    }
}
