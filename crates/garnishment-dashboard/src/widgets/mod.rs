//! Widget model for the analytics board.
//!
//! A [`Widget`] is the only persisted entity of the board. The collection is
//! stored as a JSON array whose element shape matches what the web dashboard
//! wrote:
//!
//! ```json
//! { "id": "chart-1718000000000", "type": "chart", "title": "Orders",
//!   "visible": true, "position": 3, "size": "large",
//!   "customWidth": 2, "customHeight": 320, "config": { "style": "line" } }
//! ```
//!
//! # Example
//!
//! ```
//! use garnishment_dashboard::widgets::{default_catalog, WidthClass};
//!
//! let widgets = default_catalog();
//! assert_eq!(widgets.len(), 13);
//! assert_eq!(widgets[0].width_class(), WidthClass::One);
//! ```

pub mod catalog;
pub mod kind;

pub use catalog::default_catalog;
pub use kind::{
    ActivityConfig, CalendarConfig, ChartConfig, ChartStyle, GarnishmentConfig, ReportPeriod,
    StatisticsConfig, WidgetKind, KNOWN_KINDS,
};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Pixel width of one layout unit.
pub const UNIT_WIDTH_PX: u32 = 260;

/// Coarse legacy sizing hint, superseded by [`Widget::custom_width`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetSize {
    /// Small card.
    Small,
    /// Medium card (default for new widgets).
    #[default]
    Medium,
    /// Large card.
    Large,
}

impl WidgetSize {
    /// Next size in the small → medium → large → small cycle.
    pub fn next(self) -> Self {
        match self {
            WidgetSize::Small => WidgetSize::Medium,
            WidgetSize::Medium => WidgetSize::Large,
            WidgetSize::Large => WidgetSize::Small,
        }
    }
}

impl fmt::Display for WidgetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WidgetSize::Small => "small",
            WidgetSize::Medium => "medium",
            WidgetSize::Large => "large",
        };
        write!(f, "{}", s)
    }
}

/// Error type for parsing [`WidgetSize`] from a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSizeError(pub String);

impl fmt::Display for ParseSizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid size: {} (expected small, medium or large)", self.0)
    }
}

impl std::error::Error for ParseSizeError {}

impl FromStr for WidgetSize {
    type Err = ParseSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "small" => Ok(WidgetSize::Small),
            "medium" => Ok(WidgetSize::Medium),
            "large" => Ok(WidgetSize::Large),
            _ => Err(ParseSizeError(s.to_string())),
        }
    }
}

/// Width class set by resizing or a layout preset.
///
/// Stored as `customWidth` 1, 2 or 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WidthClass {
    /// One unit, 260px.
    One,
    /// Two units, 520px.
    Two,
    /// Full row, 1040px.
    Three,
}

impl WidthClass {
    /// Maps a stored `customWidth` value; anything outside 1..=3 is `None`.
    pub const fn from_unit(unit: u8) -> Option<Self> {
        match unit {
            1 => Some(WidthClass::One),
            2 => Some(WidthClass::Two),
            3 => Some(WidthClass::Three),
            _ => None,
        }
    }

    /// The stored `customWidth` value.
    pub const fn unit(self) -> u8 {
        match self {
            WidthClass::One => 1,
            WidthClass::Two => 2,
            WidthClass::Three => 3,
        }
    }

    /// Row capacity consumed by this class. A row holds 4.
    pub const fn unit_cost(self) -> u8 {
        match self {
            WidthClass::One => 1,
            WidthClass::Two => 2,
            WidthClass::Three => 4,
        }
    }

    /// Nominal pixel width.
    pub const fn pixel_width(self) -> u32 {
        match self {
            WidthClass::One => UNIT_WIDTH_PX,
            WidthClass::Two => UNIT_WIDTH_PX * 2,
            WidthClass::Three => UNIT_WIDTH_PX * 4,
        }
    }
}

/// A single dashboard widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredWidget", into = "StoredWidget")]
pub struct Widget {
    /// Unique, never-reused identifier.
    pub id: String,
    /// Widget kind, immutable after creation.
    pub kind: WidgetKind,
    /// User-editable display title.
    pub title: String,
    /// Hidden widgets stay in the ordered collection but are not displayed.
    pub visible: bool,
    /// Rank in the global display order.
    pub position: usize,
    /// Legacy size hint.
    pub size: WidgetSize,
    /// Width override; `None` behaves as [`WidthClass::One`].
    pub custom_width: Option<WidthClass>,
    /// Height override in pixels.
    pub custom_height: Option<u32>,
}

impl Widget {
    /// Creates a visible, medium-sized widget with no size overrides.
    pub fn new(
        id: impl Into<String>,
        kind: WidgetKind,
        title: impl Into<String>,
        position: usize,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            visible: true,
            position,
            size: WidgetSize::Medium,
            custom_width: None,
            custom_height: None,
        }
    }

    /// Effective width class.
    pub fn width_class(&self) -> WidthClass {
        self.custom_width.unwrap_or(WidthClass::One)
    }
}

/// On-disk shape of a widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredWidget {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    title: String,
    #[serde(default = "default_visible")]
    visible: bool,
    #[serde(default)]
    position: usize,
    #[serde(default)]
    size: WidgetSize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    custom_width: Option<u8>,
    // The web dashboard may have written fractional heights.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    custom_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    config: Option<Value>,
}

fn default_visible() -> bool {
    true
}

impl From<StoredWidget> for Widget {
    fn from(stored: StoredWidget) -> Self {
        Self {
            kind: WidgetKind::with_config(&stored.kind, stored.config),
            id: stored.id,
            title: stored.title,
            visible: stored.visible,
            position: stored.position,
            size: stored.size,
            custom_width: stored.custom_width.and_then(WidthClass::from_unit),
            custom_height: stored
                .custom_height
                .filter(|h| h.is_finite() && *h > 0.0)
                .map(|h| h.round() as u32),
        }
    }
}

impl From<Widget> for StoredWidget {
    fn from(widget: Widget) -> Self {
        Self {
            kind: widget.kind.name().to_string(),
            config: widget.kind.config_value(),
            id: widget.id,
            title: widget.title,
            visible: widget.visible,
            position: widget.position,
            size: widget.size,
            custom_width: widget.custom_width.map(WidthClass::unit),
            custom_height: widget.custom_height.map(f64::from),
        }
    }
}
