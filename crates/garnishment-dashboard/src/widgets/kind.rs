//! Widget kinds and the typed configuration each renderer consumes.
//!
//! A widget's kind is fixed at creation. Kinds whose card needs settings
//! carry them inline, so a renderer never has to inspect an untyped bag.
//! Kinds the board does not recognize are kept verbatim as
//! [`WidgetKind::Unknown`] and render with the fallback card.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// ---------------------------------------------------------------------------
// Per-kind configuration
// ---------------------------------------------------------------------------

/// Reporting window used by the aggregate widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportPeriod {
    /// Trailing seven days.
    Week,
    /// Trailing thirty days.
    #[default]
    Month,
    /// Trailing quarter.
    Quarter,
    /// Trailing twelve months.
    Year,
}

impl ReportPeriod {
    /// Short label shown on the card.
    pub fn label(self) -> &'static str {
        match self {
            ReportPeriod::Week => "last 7 days",
            ReportPeriod::Month => "last 30 days",
            ReportPeriod::Quarter => "last quarter",
            ReportPeriod::Year => "last 12 months",
        }
    }
}

/// Settings for the `statistics` card.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatisticsConfig {
    /// Window the headline numbers are computed over.
    pub period: ReportPeriod,
}

/// Settings for the `garnishment` summary card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GarnishmentConfig {
    /// Window the order totals are computed over.
    pub period: ReportPeriod,
    /// Whether orders still awaiting calculation are counted.
    pub include_pending: bool,
}

impl Default for GarnishmentConfig {
    fn default() -> Self {
        Self {
            period: ReportPeriod::Month,
            include_pending: true,
        }
    }
}

/// Visual style of the `chart` card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartStyle {
    /// Vertical bars.
    #[default]
    Bar,
    /// Connected line.
    Line,
    /// Filled area under a line.
    Area,
}

/// Settings for the `chart` card.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartConfig {
    /// How the series is drawn.
    pub style: ChartStyle,
    /// Window the series covers.
    pub period: ReportPeriod,
}

/// Settings for the `activity` feed card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActivityConfig {
    /// Maximum feed entries shown.
    pub limit: usize,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self { limit: 5 }
    }
}

/// Settings for the `calendar` card.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalendarConfig {
    /// Start weeks on Monday instead of Sunday.
    pub week_starts_monday: bool,
}

// ---------------------------------------------------------------------------
// WidgetKind
// ---------------------------------------------------------------------------

/// The closed set of dashboard widget kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetKind {
    /// Headline processing statistics.
    Statistics(StatisticsConfig),
    /// Expense breakdown.
    Expenses,
    /// Garnishment order summary.
    Garnishment(GarnishmentConfig),
    /// Time-series chart.
    Chart(ChartConfig),
    /// Recent activity feed.
    Activity(ActivityConfig),
    /// Browser usage share.
    Browsers,
    /// Follower counts.
    Followers,
    /// Referral sources.
    Referral,
    /// Engagement metrics.
    Engagement,
    /// Client testimonials.
    Testimonial,
    /// Upcoming events.
    Event,
    /// Project progress.
    Project,
    /// Month calendar.
    Calendar(CalendarConfig),
    /// A kind this build does not know; name and config are preserved.
    Unknown {
        /// Kind name as stored.
        name: String,
        /// Raw config blob as stored.
        config: Option<Value>,
    },
}

/// Kebab-case names of every known kind, in catalog order.
pub const KNOWN_KINDS: [&str; 13] = [
    "statistics",
    "expenses",
    "garnishment",
    "chart",
    "activity",
    "browsers",
    "followers",
    "referral",
    "engagement",
    "testimonial",
    "event",
    "project",
    "calendar",
];

impl WidgetKind {
    /// Returns the kind for `name` with its default configuration.
    ///
    /// Unrecognized names become [`WidgetKind::Unknown`].
    pub fn parse(name: &str) -> Self {
        Self::with_config(name, None)
    }

    /// Returns the kind for `name`, decoding `config` for kinds that take one.
    ///
    /// A config blob that does not fit the kind is discarded in favor of the
    /// kind's default settings.
    pub fn with_config(name: &str, config: Option<Value>) -> Self {
        match name {
            "statistics" => WidgetKind::Statistics(decode_config(name, config)),
            "expenses" => WidgetKind::Expenses,
            "garnishment" => WidgetKind::Garnishment(decode_config(name, config)),
            "chart" => WidgetKind::Chart(decode_config(name, config)),
            "activity" => WidgetKind::Activity(decode_config(name, config)),
            "browsers" => WidgetKind::Browsers,
            "followers" => WidgetKind::Followers,
            "referral" => WidgetKind::Referral,
            "engagement" => WidgetKind::Engagement,
            "testimonial" => WidgetKind::Testimonial,
            "event" => WidgetKind::Event,
            "project" => WidgetKind::Project,
            "calendar" => WidgetKind::Calendar(decode_config(name, config)),
            other => WidgetKind::Unknown {
                name: other.to_string(),
                config,
            },
        }
    }

    /// Kebab-case kind name, as persisted in the `type` field.
    pub fn name(&self) -> &str {
        match self {
            WidgetKind::Statistics(_) => "statistics",
            WidgetKind::Expenses => "expenses",
            WidgetKind::Garnishment(_) => "garnishment",
            WidgetKind::Chart(_) => "chart",
            WidgetKind::Activity(_) => "activity",
            WidgetKind::Browsers => "browsers",
            WidgetKind::Followers => "followers",
            WidgetKind::Referral => "referral",
            WidgetKind::Engagement => "engagement",
            WidgetKind::Testimonial => "testimonial",
            WidgetKind::Event => "event",
            WidgetKind::Project => "project",
            WidgetKind::Calendar(_) => "calendar",
            WidgetKind::Unknown { name, .. } => name,
        }
    }

    /// Serialized configuration, or `None` for kinds without settings.
    pub fn config_value(&self) -> Option<Value> {
        match self {
            WidgetKind::Statistics(c) => serde_json::to_value(c).ok(),
            WidgetKind::Garnishment(c) => serde_json::to_value(c).ok(),
            WidgetKind::Chart(c) => serde_json::to_value(c).ok(),
            WidgetKind::Activity(c) => serde_json::to_value(c).ok(),
            WidgetKind::Calendar(c) => serde_json::to_value(c).ok(),
            WidgetKind::Unknown { config, .. } => config.clone(),
            _ => None,
        }
    }

    /// Returns `true` for every kind except [`WidgetKind::Unknown`].
    pub fn is_known(&self) -> bool {
        !matches!(self, WidgetKind::Unknown { .. })
    }

    /// Every known kind with default settings, in catalog order.
    ///
    /// Backs the "add widget" picker.
    pub fn addable() -> Vec<WidgetKind> {
        KNOWN_KINDS.iter().map(|name| WidgetKind::parse(name)).collect()
    }

    /// Human-readable default title for a freshly added widget of this kind.
    pub fn default_title(&self) -> String {
        let name = self.name();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::from("Widget"),
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn decode_config<T: DeserializeOwned + Default>(kind: &str, config: Option<Value>) -> T {
    match config {
        None => T::default(),
        Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
            tracing::debug!("discarding {} widget config: {}", kind, e);
            T::default()
        }),
    }
}
