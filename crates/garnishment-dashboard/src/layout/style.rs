//! Per-widget geometry derived from width class and height override.

use crate::widgets::{Widget, WidthClass};

/// How a widget claims horizontal space in its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlexBasis {
    /// Shares the row, growing in proportion to `grow` from `basis_px`.
    Grow {
        /// Relative growth factor.
        grow: u16,
        /// Starting width in pixels.
        basis_px: u32,
    },
    /// Spans the entire row.
    FullRow,
}

/// Visual geometry of a widget card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleDescriptor {
    /// Horizontal sizing rule.
    pub basis: FlexBasis,
    /// Minimum width in pixels.
    pub min_width_px: u32,
    /// Explicit height in pixels, if the widget carries one.
    pub height_px: Option<u32>,
}

/// Pixel width of a width class; absent means one unit.
pub fn widget_pixel_width(custom_width: Option<WidthClass>) -> u32 {
    custom_width.unwrap_or(WidthClass::One).pixel_width()
}

/// Computes the card geometry for `widget` without touching it.
pub fn compute_style(widget: &Widget) -> StyleDescriptor {
    let class = widget.width_class();
    let basis = match class {
        WidthClass::One => FlexBasis::Grow {
            grow: 1,
            basis_px: class.pixel_width(),
        },
        WidthClass::Two => FlexBasis::Grow {
            grow: 2,
            basis_px: class.pixel_width(),
        },
        WidthClass::Three => FlexBasis::FullRow,
    };
    StyleDescriptor {
        basis,
        min_width_px: class.pixel_width(),
        height_px: widget.custom_height,
    }
}

/// Row width ceiling for a viewport `viewport_width` pixels wide.
///
/// Narrow viewports lose a fixed gutter; wide ones are capped.
pub fn responsive_row_max_width(viewport_width: u32) -> u32 {
    match viewport_width {
        w if w < 640 => w.saturating_sub(32),
        w if w < 1024 => w.saturating_sub(64),
        w if w < 1440 => 1200,
        _ => 1400,
    }
}
