#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Collision record types and the static lookup lists derived from them.
//!
//! This crate defines the in-memory shape of one collision event, the
//! injury categories a user can filter on, and the distinct-value lists
//! (boroughs, years, vehicle types, contributing factors) computed once
//! from the full dataset.

use std::collections::BTreeSet;

use chrono::{NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Borough placeholder used by the source data for unresolved locations.
///
/// Never offered as a selectable option and never recognized in search text.
pub const UNKNOWN_BOROUGH: &str = "UNKNOWN";

/// Calendar weekday order used for every weekday axis.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Returns the full English name of a weekday (e.g. `"Monday"`).
#[must_use]
pub const fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Kind of person injured in a collision.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum InjuryCategory {
    /// A pedestrian was involved.
    Pedestrian,
    /// A cyclist was involved.
    Cyclist,
    /// A driver or other motorist was involved.
    Motorist,
}

impl InjuryCategory {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Pedestrian, Self::Cyclist, Self::Motorist]
    }

    /// Human-readable label for option lists.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pedestrian => "Pedestrian",
            Self::Cyclist => "Cyclist",
            Self::Motorist => "Motorist",
        }
    }
}

/// Value of the injury-type dropdown.
///
/// [`InjuryChoice::Any`] is the neutral default. It is indistinguishable
/// from "the user wants no injury filter", so it never suppresses an
/// injury category inferred from search text.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum InjuryChoice {
    /// No explicit choice.
    #[default]
    Any,
    /// Pedestrian injuries only.
    Pedestrian,
    /// Cyclist injuries only.
    Cyclist,
    /// Motorist injuries only.
    Motorist,
}

impl InjuryChoice {
    /// Returns all variants of this enum, in dropdown order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Any, Self::Pedestrian, Self::Cyclist, Self::Motorist]
    }

    /// Returns the concrete category, or `None` for [`InjuryChoice::Any`].
    #[must_use]
    pub const fn category(self) -> Option<InjuryCategory> {
        match self {
            Self::Any => None,
            Self::Pedestrian => Some(InjuryCategory::Pedestrian),
            Self::Cyclist => Some(InjuryCategory::Cyclist),
            Self::Motorist => Some(InjuryCategory::Motorist),
        }
    }

    /// Human-readable label for option lists.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self.category() {
            Some(category) => category.label(),
            None => "Any",
        }
    }
}

/// A single collision event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollisionRecord {
    /// Source collision identifier.
    pub collision_id: Option<i64>,
    /// When the collision happened. `None` when missing or unparseable.
    pub crash_datetime: Option<NaiveDateTime>,
    /// Borough name as spelled in the source (e.g. `"BROOKLYN"`).
    pub borough: Option<String>,
    /// Calendar year of the collision.
    pub year: Option<i32>,
    /// Hour of day (0-23).
    pub hour: Option<u8>,
    /// Day of week.
    pub weekday: Option<Weekday>,
    /// Vehicle type per vehicle slot; `None` for empty slots.
    pub vehicle_types: Vec<Option<String>>,
    /// Contributing factor per vehicle slot; `None` for empty slots.
    pub contributing_factors: Vec<Option<String>>,
    /// Whether a pedestrian was involved.
    pub has_pedestrian: bool,
    /// Whether a cyclist was involved.
    pub has_cyclist: bool,
    /// Whether a driver was involved.
    pub has_driver: bool,
    /// Number of persons injured.
    pub total_injured: u64,
    /// Number of persons killed.
    pub total_killed: u64,
    /// Severity classification label.
    pub severity_level: Option<String>,
    /// Numeric severity weight.
    pub severity_index: Option<f64>,
    /// Latitude.
    pub latitude: Option<f64>,
    /// Longitude.
    pub longitude: Option<f64>,
}

impl CollisionRecord {
    /// Returns `(latitude, longitude)` when both are present.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }

    /// Whether this record carries the injury-presence flag for `category`.
    #[must_use]
    pub const fn involves(&self, category: InjuryCategory) -> bool {
        match category {
            InjuryCategory::Pedestrian => self.has_pedestrian,
            InjuryCategory::Cyclist => self.has_cyclist,
            InjuryCategory::Motorist => self.has_driver,
        }
    }
}

/// Which optional columns the input file provided.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnPresence {
    /// Crash timestamp column.
    pub crash_datetime: bool,
    /// Severity classification column.
    pub severity_level: bool,
    /// Numeric severity index column.
    pub severity_index: bool,
}

impl ColumnPresence {
    /// Every optional column present.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            crash_datetime: true,
            severity_level: true,
            severity_index: true,
        }
    }
}

/// Distinct values used to populate filter controls and to constrain what
/// the search parser recognizes. Every list is sorted and de-duplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupLists {
    /// Known boroughs, excluding [`UNKNOWN_BOROUGH`].
    pub boroughs: Vec<String>,
    /// Known collision years.
    pub years: Vec<i32>,
    /// Vehicle types across every vehicle slot.
    pub vehicle_types: Vec<String>,
    /// Contributing factors across every vehicle slot.
    pub contributing_factors: Vec<String>,
}

impl LookupLists {
    /// Computes the lookup lists from the full record set.
    #[must_use]
    pub fn from_records(records: &[CollisionRecord]) -> Self {
        let mut boroughs = BTreeSet::new();
        let mut years = BTreeSet::new();
        let mut vehicle_types = BTreeSet::new();
        let mut contributing_factors = BTreeSet::new();

        for record in records {
            if let Some(borough) = record.borough.as_deref()
                && !borough.is_empty()
                && borough != UNKNOWN_BOROUGH
            {
                boroughs.insert(borough);
            }
            if let Some(year) = record.year {
                years.insert(year);
            }
            vehicle_types.extend(record.vehicle_types.iter().flatten().map(String::as_str));
            contributing_factors.extend(
                record
                    .contributing_factors
                    .iter()
                    .flatten()
                    .map(String::as_str),
            );
        }

        Self {
            boroughs: boroughs.into_iter().map(str::to_owned).collect(),
            years: years.into_iter().collect(),
            vehicle_types: vehicle_types.into_iter().map(str::to_owned).collect(),
            contributing_factors: contributing_factors
                .into_iter()
                .map(str::to_owned)
                .collect(),
        }
    }

    /// Whether `year` appears in the dataset.
    #[must_use]
    pub fn has_year(&self, year: i32) -> bool {
        self.years.binary_search(&year).is_ok()
    }
}
