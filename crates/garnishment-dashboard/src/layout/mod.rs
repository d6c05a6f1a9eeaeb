//! Layout engine for the analytics board.
//!
//! Stateless transformations from an ordered widget sequence to rows and
//! per-widget geometry, plus the dashboard-wide sizing presets that users
//! switch with `1`-`4`.
//!
//! Unit-based packing ([`pack_into_rows`]) is the only row-assignment rule.
//! [`responsive_row_max_width`] caps how wide a rendered row may be; it never
//! decides which widgets share a row.

mod packing;
mod presets;
mod style;

pub use packing::{pack_into_rows, row_containing, row_units, Row, ROW_CAPACITY_UNITS};
pub use presets::{ParsePresetError, Preset, PresetManager};
pub use style::{
    compute_style, responsive_row_max_width, widget_pixel_width, FlexBasis, StyleDescriptor,
};
