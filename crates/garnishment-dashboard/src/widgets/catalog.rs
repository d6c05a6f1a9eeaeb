//! Default widget catalog seeded on a user's first load.

use super::{Widget, WidgetKind, WidgetSize};

/// Seed entries: kind name, title, legacy size.
const CATALOG: [(&str, &str, WidgetSize); 13] = [
    ("statistics", "Statistics", WidgetSize::Large),
    ("expenses", "Expenses", WidgetSize::Medium),
    ("garnishment", "Garnishment Overview", WidgetSize::Medium),
    ("chart", "Analytics Chart", WidgetSize::Large),
    ("activity", "Recent Activity", WidgetSize::Medium),
    ("browsers", "Browser Usage", WidgetSize::Small),
    ("followers", "Followers", WidgetSize::Small),
    ("referral", "Referrals", WidgetSize::Small),
    ("engagement", "Engagement", WidgetSize::Medium),
    ("testimonial", "Testimonials", WidgetSize::Small),
    ("event", "Upcoming Events", WidgetSize::Small),
    ("project", "Projects", WidgetSize::Medium),
    ("calendar", "Calendar", WidgetSize::Medium),
];

/// Returns the 13 seed widgets, all visible, at positions 0..=12.
///
/// Catalog ids equal the kind name; dynamically added widgets use
/// `<kind>-<millis>` and so never collide with them.
pub fn default_catalog() -> Vec<Widget> {
    CATALOG
        .iter()
        .enumerate()
        .map(|(position, (name, title, size))| {
            let mut widget = Widget::new(*name, WidgetKind::parse(name), *title, position);
            widget.size = *size;
            widget
        })
        .collect()
}
