//! Widget state store for the analytics board.
//!
//! [`WidgetStore`] owns the canonical widget collection of one user and is
//! the only writer of it. Every mutating operation writes the full
//! collection through to the injected [`Storage`] before returning, so the
//! next [`query`](WidgetStore::query) always observes it.
//!
//! Storage failures never propagate to callers: an unreadable or malformed
//! collection falls back to the default catalog, and a failed write is
//! logged while the in-memory state stays authoritative.
//!
//! # Example
//!
//! ```
//! use garnishment_dashboard::store::{MemoryStorage, WidgetStore};
//! use garnishment_dashboard::widgets::WidgetKind;
//!
//! let mut store = WidgetStore::open(MemoryStorage::new());
//! assert_eq!(store.user_id(), "default-user");
//! let id = store.add(WidgetKind::parse("chart"), "Orders by state");
//! assert!(store.query(false).iter().any(|w| w.id == id));
//! ```

mod error;
mod storage;

#[cfg(test)]
mod tests;

pub use error::StorageError;
pub use storage::{FileStorage, MemoryStorage, Storage};

use crate::layout::{pack_into_rows, row_containing, Preset};
use crate::widgets::{default_catalog, Widget, WidgetKind, WidgetSize, WidthClass};

/// Storage key holding the active user's id.
pub const USER_ID_KEY: &str = "user-id";

/// User id used when none is stored.
pub const DEFAULT_USER_ID: &str = "default-user";

/// Largest id suffix taken as a millisecond stamp (end of year 9999).
const MAX_ID_MILLIS: i64 = 253_402_300_799_999;

/// Prefix of the per-user widget collection key.
pub const WIDGETS_KEY_PREFIX: &str = "analytics-widgets-";

/// Storage key of `user_id`'s widget collection.
pub fn storage_key(user_id: &str) -> String {
    format!("{WIDGETS_KEY_PREFIX}{user_id}")
}

/// Reads the active user id, falling back to [`DEFAULT_USER_ID`].
pub fn resolve_user_id<S: Storage>(storage: &S) -> String {
    match storage.get(USER_ID_KEY) {
        Ok(Some(id)) if !id.trim().is_empty() => id.trim().to_string(),
        Ok(_) => DEFAULT_USER_ID.to_string(),
        Err(e) => {
            tracing::warn!("could not read {}: {}, using {}", USER_ID_KEY, e, DEFAULT_USER_ID);
            DEFAULT_USER_ID.to_string()
        }
    }
}

/// Owner of one user's widget collection and board view flags.
#[derive(Debug)]
pub struct WidgetStore<S: Storage> {
    storage: S,
    user_id: String,
    /// Full collection, visible and hidden together.
    widgets: Vec<Widget>,
    edit_mode: bool,
    show_hidden: bool,
    /// Millisecond stamp of the most recent generated id.
    last_id_millis: i64,
}

impl<S: Storage> WidgetStore<S> {
    /// Resolves the user id from `storage` and loads that user's widgets.
    pub fn open(storage: S) -> Self {
        let user_id = resolve_user_id(&storage);
        Self::load(storage, user_id)
    }

    /// Loads `user_id`'s widgets, seeding the default catalog when nothing
    /// usable is stored.
    pub fn load(storage: S, user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        let widgets = read_widgets(&storage, &user_id);
        let last_id_millis = widgets
            .iter()
            .filter_map(|w| w.id.rsplit('-').next()?.parse::<i64>().ok())
            .filter(|millis| (0..=MAX_ID_MILLIS).contains(millis))
            .max()
            .unwrap_or(0);
        tracing::debug!("loaded {} widgets for {}", widgets.len(), user_id);
        Self {
            storage,
            user_id,
            widgets,
            edit_mode: false,
            show_hidden: false,
            last_id_millis,
        }
    }

    /// Writes the full collection under this user's key.
    pub fn persist(&mut self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.widgets)?;
        self.storage.set(&storage_key(&self.user_id), &json)
    }

    /// Write-through after a mutation. Failures are logged, not returned.
    fn commit(&mut self) {
        if let Err(e) = self.persist() {
            tracing::warn!("failed to persist widgets for {}: {}", self.user_id, e);
        }
    }

    /// Active user id.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Full collection in storage order.
    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    /// Count of widgets, hidden ones included.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Returns `true` if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Looks up a widget by id.
    pub fn get(&self, id: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Widget> {
        let found = self.widgets.iter_mut().find(|w| w.id == id);
        if found.is_none() {
            tracing::debug!("no widget {}, ignoring", id);
        }
        found
    }

    /// Underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consumes the store, returning its storage.
    pub fn into_storage(self) -> S {
        self.storage
    }

    // -----------------------------------------------------------------------
    // View flags
    // -----------------------------------------------------------------------

    /// Whether edit affordances are shown.
    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    /// Sets edit mode.
    pub fn set_edit_mode(&mut self, on: bool) {
        self.edit_mode = on;
    }

    /// Flips edit mode and returns the new value.
    pub fn toggle_edit_mode(&mut self) -> bool {
        self.edit_mode = !self.edit_mode;
        self.edit_mode
    }

    /// Whether hidden widgets are displayed.
    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    /// Sets the show-hidden flag.
    pub fn set_show_hidden(&mut self, on: bool) {
        self.show_hidden = on;
    }

    /// Flips the show-hidden flag and returns the new value.
    pub fn toggle_show_hidden(&mut self) -> bool {
        self.show_hidden = !self.show_hidden;
        self.show_hidden
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Widgets to display, sorted ascending by position.
    ///
    /// All widgets when `show_hidden`, otherwise only visible ones.
    pub fn query(&self, show_hidden: bool) -> Vec<&Widget> {
        let mut out: Vec<&Widget> = self
            .widgets
            .iter()
            .filter(|w| show_hidden || w.visible)
            .collect();
        out.sort_by_key(|w| w.position);
        out
    }

    /// [`query`](Self::query) with the store's own show-hidden flag.
    pub fn displayed(&self) -> Vec<&Widget> {
        self.query(self.show_hidden)
    }

    /// Ids of the other displayed widgets packed into the same row as `id`.
    pub fn row_siblings(&self, id: &str) -> Vec<String> {
        let displayed = self.displayed();
        let rows = pack_into_rows(displayed.iter().copied());
        row_containing(&rows, id)
            .map(|row| {
                row.iter()
                    .filter(|w| w.id != id)
                    .map(|w| w.id.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Shows or hides a widget. Position is untouched.
    pub fn set_visibility(&mut self, id: &str, visible: bool) -> bool {
        let Some(widget) = self.get_mut(id) else {
            return false;
        };
        widget.visible = visible;
        self.commit();
        true
    }

    /// Deletes a widget. Remaining positions are renumbered densely in
    /// their existing order.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(index) = self.widgets.iter().position(|w| w.id == id) else {
            tracing::debug!("no widget {}, ignoring remove", id);
            return false;
        };
        self.widgets.remove(index);
        self.sort_by_position();
        self.renumber();
        self.commit();
        true
    }

    /// Moves a widget to `new_position` in the full ordered collection.
    ///
    /// Positions out of range clamp to the end. Afterwards the positions are
    /// exactly `0..len` and every other widget keeps its relative order.
    pub fn reposition(&mut self, id: &str, new_position: usize) -> bool {
        let Some(index) = self.widgets.iter().position(|w| w.id == id) else {
            tracing::debug!("no widget {}, ignoring reposition", id);
            return false;
        };
        let moving = self.widgets.remove(index);
        self.sort_by_position();
        let slot = new_position.min(self.widgets.len());
        self.widgets.insert(slot, moving);
        self.renumber();
        self.commit();
        true
    }

    /// Sets the legacy size hint. `custom_width` is untouched.
    pub fn set_size(&mut self, id: &str, size: WidgetSize) -> bool {
        let Some(widget) = self.get_mut(id) else {
            return false;
        };
        widget.size = size;
        self.commit();
        true
    }

    /// Sets the display title.
    pub fn set_title(&mut self, id: &str, title: &str) -> bool {
        let Some(widget) = self.get_mut(id) else {
            return false;
        };
        widget.title = title.to_string();
        self.commit();
        true
    }

    /// Appends a new visible, medium widget and returns its id.
    ///
    /// The widget sorts after every existing one even when the loaded
    /// positions have gaps; positions are dense afterwards.
    pub fn add(&mut self, kind: WidgetKind, title: &str) -> String {
        let id = self.next_id(&kind);
        let position = self
            .widgets
            .iter()
            .map(|w| w.position + 1)
            .max()
            .unwrap_or(0);
        let widget = Widget::new(id.clone(), kind, title, position);
        tracing::debug!("adding widget {}", id);
        self.widgets.push(widget);
        self.sort_by_position();
        self.renumber();
        self.commit();
        id
    }

    /// Clears custom width and height on every widget.
    pub fn reset_all_custom_sizes(&mut self) {
        for widget in &mut self.widgets {
            widget.custom_width = None;
            widget.custom_height = None;
        }
        self.commit();
    }

    /// Gives every widget the same width class.
    pub fn apply_uniform_width(&mut self, width: WidthClass) {
        for widget in &mut self.widgets {
            widget.custom_width = Some(width);
        }
        self.commit();
    }

    /// Applies a dashboard-wide preset.
    pub fn apply_preset(&mut self, preset: Preset) {
        match preset.uniform_width() {
            Some(width) => self.apply_uniform_width(width),
            None => self.reset_all_custom_sizes(),
        }
    }

    /// Sets width and height of `id` and, when `propagate_height`, the height
    /// of every widget packed into its row afterwards.
    ///
    /// Returns the sibling ids that received the height, or `None` if `id`
    /// does not exist.
    pub fn apply_resize(
        &mut self,
        id: &str,
        width: WidthClass,
        height: u32,
        propagate_height: bool,
    ) -> Option<Vec<String>> {
        let widget = self.get_mut(id)?;
        widget.custom_width = Some(width);
        widget.custom_height = Some(height);

        let siblings = if propagate_height {
            self.row_siblings(id)
        } else {
            Vec::new()
        };
        for widget in self.widgets.iter_mut().filter(|w| siblings.contains(&w.id)) {
            widget.custom_height = Some(height);
        }
        self.commit();
        Some(siblings)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn sort_by_position(&mut self) {
        self.widgets.sort_by_key(|w| w.position);
    }

    fn renumber(&mut self) {
        for (i, widget) in self.widgets.iter_mut().enumerate() {
            widget.position = i;
        }
    }

    /// Generates `<kind>-<millis>`, strictly later than any id issued before.
    fn next_id(&mut self, kind: &WidgetKind) -> String {
        let now = chrono::Utc::now().timestamp_millis();
        let mut millis = now.max(self.last_id_millis.saturating_add(1));
        let mut id = format!("{}-{}", kind.name(), millis);
        while self.get(&id).is_some() {
            millis = millis.saturating_add(1);
            id = format!("{}-{}", kind.name(), millis);
        }
        self.last_id_millis = millis;
        id
    }
}

/// Reads and parses the stored collection, falling back to the catalog.
fn read_widgets<S: Storage>(storage: &S, user_id: &str) -> Vec<Widget> {
    let key = storage_key(user_id);
    match storage.get(&key) {
        Ok(Some(json)) => match serde_json::from_str::<Vec<Widget>>(&json) {
            Ok(widgets) => widgets,
            Err(e) => {
                tracing::warn!(
                    "stored widgets under {} are malformed ({}), using defaults",
                    key,
                    e
                );
                default_catalog()
            }
        },
        Ok(None) => {
            tracing::debug!("no widgets stored for {}, seeding default catalog", user_id);
            default_catalog()
        }
        Err(e) => {
            tracing::warn!("could not read {}: {}, using defaults", key, e);
            default_catalog()
        }
    }
}
