#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Report and aggregate types produced by the collision analytics pipeline.
//!
//! A [`Report`] is the complete output of one recompute: a status line, the
//! effective filters, and seven [`Panel`]s (KPI summary plus five chart
//! aggregates). Each panel either carries data or an explicit placeholder,
//! so a presentation layer never has to guess at an empty chart.

use crash_dash_query_models::FilterSet;
use serde::{Deserialize, Serialize};

/// Title of every panel when the filters match no collisions.
pub const NO_DATA_TITLE: &str = "No data for selected filters";

/// Hint shown on the KPI panel when the filters match no collisions.
pub const NO_DATA_HINT: &str = "Adjust filters or search.";

/// One output slot of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Panel<T> {
    /// Computed aggregate.
    Data {
        /// The aggregate value.
        value: T,
    },
    /// The filters matched no collisions.
    Empty {
        /// Placeholder title.
        title: String,
        /// Optional guidance for the user.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hint: Option<String>,
    },
    /// The dataset lacks the column this aggregate needs.
    Unavailable {
        /// Placeholder title naming what is missing.
        title: String,
    },
}

impl<T> Panel<T> {
    /// Wraps a computed value.
    #[must_use]
    pub const fn data(value: T) -> Self {
        Self::Data { value }
    }

    /// The standard "no data" placeholder.
    #[must_use]
    pub fn empty() -> Self {
        Self::Empty {
            title: NO_DATA_TITLE.to_string(),
            hint: None,
        }
    }

    /// A "column missing" placeholder.
    #[must_use]
    pub fn unavailable(title: &str) -> Self {
        Self::Unavailable {
            title: title.to_string(),
        }
    }

    /// Returns the computed value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Data { value } => Some(value),
            Self::Empty { .. } | Self::Unavailable { .. } => None,
        }
    }

    /// Whether this is the "no data" placeholder.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }
}

/// Headline numbers for the filtered collisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    /// Number of collisions.
    pub total_crashes: u64,
    /// Persons injured across those collisions.
    pub total_injured: u64,
    /// Persons killed across those collisions.
    pub total_killed: u64,
    /// Borough with the most collisions, or `"N/A"`.
    pub most_common_borough: String,
}

/// Count of collisions sharing one label (borough, severity level, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    /// Group label.
    pub category: String,
    /// Number of collisions.
    pub count: u64,
}

/// A time-series data point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    /// Period label (`"2022-03"`).
    pub period: String,
    /// Number of collisions in this period.
    pub count: u64,
}

/// Collision counts per weekday (rows) and hour of day (columns).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourWeekdayMatrix {
    /// Row labels, always Monday through Sunday.
    pub weekdays: Vec<String>,
    /// Column labels, ascending observed hours.
    pub hours: Vec<u8>,
    /// `counts[row][col]` for `weekdays[row]` and `hours[col]`.
    pub counts: Vec<Vec<u64>>,
}

impl HourWeekdayMatrix {
    /// Count for a weekday name and hour; zero for unobserved cells.
    #[must_use]
    pub fn count(&self, weekday: &str, hour: u8) -> u64 {
        let Some(row) = self.weekdays.iter().position(|w| w == weekday) else {
            return 0;
        };
        let Some(col) = self.hours.iter().position(|h| *h == hour) else {
            return 0;
        };
        self.counts
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(0)
    }
}

/// One plotted collision location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapPoint {
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
    /// Severity weight for density rendering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

/// Collision locations for the map panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapPoints {
    /// Filtered collisions with coordinates, before sampling.
    pub total_points: u64,
    /// Whether `points` is a sample of the full set.
    pub sampled: bool,
    /// Whether points carry severity weights (density rendering) rather
    /// than plain locations.
    pub weighted: bool,
    /// Plotted points, in dataset order.
    pub points: Vec<MapPoint>,
}

/// The full output of one recompute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// One-line description of the row count and resolved filters.
    pub status: String,
    /// The effective filters the report was computed with.
    pub filters: FilterSet,
    /// Number of collisions matching the filters.
    pub row_count: u64,
    /// Headline numbers.
    pub kpis: Panel<KpiSummary>,
    /// Collisions per borough.
    pub borough_counts: Panel<Vec<CategoryCount>>,
    /// Collisions per calendar month.
    pub monthly_trend: Panel<Vec<TimeSeriesPoint>>,
    /// Collisions per severity level.
    pub severity_distribution: Panel<Vec<CategoryCount>>,
    /// Collisions per weekday and hour.
    pub hour_weekday: Panel<HourWeekdayMatrix>,
    /// Collision locations.
    pub map: Panel<MapPoints>,
}
