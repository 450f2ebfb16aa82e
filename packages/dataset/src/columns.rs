//! Column names of the collision export and their resolution against a
//! CSV header row.

use csv::StringRecord;

use crash_dash_collision_models::{CollisionRecord, ColumnPresence};

use crate::DatasetError;
use crate::parsing::{
    non_empty, parse_count, parse_crash_datetime, parse_flag, parse_float, parse_hour,
    parse_integral, parse_weekday, parse_year,
};

/// Collision identifier.
pub const COLLISION_ID: &str = "COLLISION_ID";
/// Crash timestamp.
pub const CRASH_DATETIME: &str = "CRASH_DATETIME";
/// Borough name.
pub const BOROUGH: &str = "BOROUGH";
/// Crash year.
pub const CRASH_YEAR: &str = "CRASH_YEAR";
/// Crash hour of day.
pub const CRASH_HOUR: &str = "CRASH_HOUR";
/// Crash weekday name.
pub const CRASH_WEEKDAY: &str = "CRASH_WEEKDAY";
/// Prefix shared by the per-vehicle type columns.
pub const VEHICLE_TYPE_PREFIX: &str = "VEHICLE TYPE CODE";
/// Prefix shared by the per-vehicle contributing factor columns.
pub const CONTRIBUTING_FACTOR_PREFIX: &str = "CONTRIBUTING FACTOR VEHICLE";
/// Pedestrian involvement flag.
pub const HAS_PEDESTRIAN: &str = "HAS_PEDESTRIAN";
/// Cyclist involvement flag.
pub const HAS_CYCLIST: &str = "HAS_CYCLIST";
/// Driver involvement flag.
pub const HAS_DRIVER: &str = "HAS_DRIVER";
/// Persons injured.
pub const TOTAL_INJURED: &str = "TOTAL_INJURED";
/// Persons killed.
pub const TOTAL_KILLED: &str = "TOTAL_KILLED";
/// Severity classification label.
pub const SEVERITY_LEVEL: &str = "SEVERITY_LEVEL";
/// Numeric severity index.
pub const SEVERITY_INDEX: &str = "SEVERITY_INDEX";
/// Latitude.
pub const LATITUDE: &str = "LATITUDE";
/// Longitude.
pub const LONGITUDE: &str = "LONGITUDE";

/// Header positions of every column the loader understands.
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    collision_id: Option<usize>,
    crash_datetime: Option<usize>,
    borough: usize,
    year: usize,
    hour: Option<usize>,
    weekday: Option<usize>,
    vehicle_types: Vec<usize>,
    contributing_factors: Vec<usize>,
    has_pedestrian: Option<usize>,
    has_cyclist: Option<usize>,
    has_driver: Option<usize>,
    total_injured: Option<usize>,
    total_killed: Option<usize>,
    severity_level: Option<usize>,
    severity_index: Option<usize>,
    latitude: usize,
    longitude: usize,
}

impl ColumnLayout {
    /// Resolves column positions from a (trimmed) header row.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::MissingColumn`] if a required column is absent.
    pub fn from_headers(headers: &[String]) -> Result<Self, DatasetError> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require =
            |name: &'static str| find(name).ok_or(DatasetError::MissingColumn { column: name });
        let with_prefix = |prefix: &str| -> Vec<usize> {
            headers
                .iter()
                .enumerate()
                .filter(|(_, h)| h.starts_with(prefix))
                .map(|(i, _)| i)
                .collect()
        };

        let layout = Self {
            collision_id: find(COLLISION_ID),
            crash_datetime: find(CRASH_DATETIME),
            borough: require(BOROUGH)?,
            year: require(CRASH_YEAR)?,
            hour: find(CRASH_HOUR),
            weekday: find(CRASH_WEEKDAY),
            vehicle_types: with_prefix(VEHICLE_TYPE_PREFIX),
            contributing_factors: with_prefix(CONTRIBUTING_FACTOR_PREFIX),
            has_pedestrian: find(HAS_PEDESTRIAN),
            has_cyclist: find(HAS_CYCLIST),
            has_driver: find(HAS_DRIVER),
            total_injured: find(TOTAL_INJURED),
            total_killed: find(TOTAL_KILLED),
            severity_level: find(SEVERITY_LEVEL),
            severity_index: find(SEVERITY_INDEX),
            latitude: require(LATITUDE)?,
            longitude: require(LONGITUDE)?,
        };

        for (name, idx) in [
            (COLLISION_ID, layout.collision_id),
            (CRASH_DATETIME, layout.crash_datetime),
            (CRASH_HOUR, layout.hour),
            (CRASH_WEEKDAY, layout.weekday),
            (HAS_PEDESTRIAN, layout.has_pedestrian),
            (HAS_CYCLIST, layout.has_cyclist),
            (HAS_DRIVER, layout.has_driver),
            (TOTAL_INJURED, layout.total_injured),
            (TOTAL_KILLED, layout.total_killed),
            (SEVERITY_LEVEL, layout.severity_level),
            (SEVERITY_INDEX, layout.severity_index),
        ] {
            if idx.is_none() {
                log::warn!("Optional column {name} not present, defaulting its values");
            }
        }
        log::debug!(
            "Found {} vehicle type and {} contributing factor columns",
            layout.vehicle_types.len(),
            layout.contributing_factors.len()
        );

        Ok(layout)
    }

    /// Which optional, chart-bearing columns were found.
    #[must_use]
    pub const fn presence(&self) -> ColumnPresence {
        ColumnPresence {
            crash_datetime: self.crash_datetime.is_some(),
            severity_level: self.severity_level.is_some(),
            severity_index: self.severity_index.is_some(),
        }
    }

    /// Converts one CSV row into a [`CollisionRecord`].
    ///
    /// Unreadable cells become missing values; short rows are tolerated.
    #[must_use]
    pub fn parse_row(&self, row: &StringRecord) -> CollisionRecord {
        let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).unwrap_or("");
        let text = |idx: Option<usize>| non_empty(cell(idx)).map(str::to_owned);
        let slots = |indices: &[usize]| -> Vec<Option<String>> {
            indices.iter().map(|i| text(Some(*i))).collect()
        };

        CollisionRecord {
            collision_id: parse_integral(cell(self.collision_id)),
            crash_datetime: parse_crash_datetime(cell(self.crash_datetime)),
            borough: text(Some(self.borough)),
            year: parse_year(cell(Some(self.year))),
            hour: parse_hour(cell(self.hour)),
            weekday: parse_weekday(cell(self.weekday)),
            vehicle_types: slots(&self.vehicle_types),
            contributing_factors: slots(&self.contributing_factors),
            has_pedestrian: parse_flag(cell(self.has_pedestrian)).unwrap_or(false),
            has_cyclist: parse_flag(cell(self.has_cyclist)).unwrap_or(false),
            has_driver: parse_flag(cell(self.has_driver)).unwrap_or(false),
            total_injured: parse_count(cell(self.total_injured)).unwrap_or(0),
            total_killed: parse_count(cell(self.total_killed)).unwrap_or(0),
            severity_level: text(self.severity_level),
            severity_index: parse_float(cell(self.severity_index)),
            latitude: parse_float(cell(Some(self.latitude))),
            longitude: parse_float(cell(Some(self.longitude))),
        }
    }
}
