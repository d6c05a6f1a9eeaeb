//! Greedy, order-preserving row packing.
//!
//! Rows hold at most [`ROW_CAPACITY_UNITS`] width units. Each widget costs
//! 1, 2 or 4 units depending on its width class; a cost-4 widget always sits
//! alone. Packing never looks ahead and never moves a widget out of input order.

use crate::widgets::Widget;

/// Width units one row can hold.
pub const ROW_CAPACITY_UNITS: u8 = 4;

/// Widgets displayed side by side, in display order.
pub type Row<'a> = Vec<&'a Widget>;

/// Packs widgets, already filtered and sorted by position, into rows.
///
/// An empty input yields no rows. The function is pure: the same input
/// always produces the same grouping.
pub fn pack_into_rows<'a, I>(widgets: I) -> Vec<Row<'a>>
where
    I: IntoIterator<Item = &'a Widget>,
{
    let mut rows = Vec::new();
    let mut current: Row<'a> = Vec::new();
    let mut used = 0u8;

    for widget in widgets {
        let cost = widget.width_class().unit_cost();
        if cost >= ROW_CAPACITY_UNITS || used + cost > ROW_CAPACITY_UNITS {
            if !current.is_empty() {
                rows.push(std::mem::take(&mut current));
            }
            used = cost;
        } else {
            used += cost;
        }
        current.push(widget);
    }

    if !current.is_empty() {
        rows.push(current);
    }
    rows
}

/// Summed unit cost of a packed row.
pub fn row_units(row: &[&Widget]) -> u8 {
    row.iter().map(|w| w.width_class().unit_cost()).sum()
}

/// Finds the packed row containing `id`.
pub fn row_containing<'r, 'a>(rows: &'r [Row<'a>], id: &str) -> Option<&'r Row<'a>> {
    rows.iter().find(|row| row.iter().any(|w| w.id == id))
}
