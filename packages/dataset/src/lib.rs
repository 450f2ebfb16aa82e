#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Collision dataset loader.
//!
//! Reads the collision CSV export once at startup into an immutable
//! [`Dataset`]: the parsed records, the [`LookupLists`] derived from them,
//! and a note of which optional columns the file carried. The dataset is
//! never mutated afterwards; callers share it behind an `Arc`.

pub mod columns;
pub mod parsing;
pub mod paths;

use std::io::Read;
use std::path::{Path, PathBuf};

use crash_dash_collision_models::{CollisionRecord, ColumnPresence, LookupLists};
use thiserror::Error;

use crate::columns::ColumnLayout;

/// Errors that can occur while loading the dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset file does not exist.
    #[error("Dataset file not found: {}", .path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// Reading the file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A column the loader cannot do without is missing from the header.
    #[error("Missing required column: {column}")]
    MissingColumn {
        /// Name of the missing column.
        column: &'static str,
    },
}

/// The full, read-only collision table.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<CollisionRecord>,
    lookups: LookupLists,
    columns: ColumnPresence,
}

impl Dataset {
    /// Builds a dataset from already-parsed records, deriving the lookups.
    #[must_use]
    pub fn from_records(records: Vec<CollisionRecord>, columns: ColumnPresence) -> Self {
        let lookups = LookupLists::from_records(&records);
        Self {
            records,
            lookups,
            columns,
        }
    }

    /// Every record, in file order.
    #[must_use]
    pub fn records(&self) -> &[CollisionRecord] {
        &self.records
    }

    /// Distinct filter values computed at load time.
    #[must_use]
    pub const fn lookups(&self) -> &LookupLists {
        &self.lookups
    }

    /// Which optional columns the source file carried.
    #[must_use]
    pub const fn columns(&self) -> ColumnPresence {
        self.columns
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Loads the dataset from a CSV file on disk.
///
/// # Errors
///
/// Returns [`DatasetError::NotFound`] if `path` does not exist, or any
/// error from [`load_from_reader`].
pub fn load(path: &Path) -> Result<Dataset, DatasetError> {
    if !path.exists() {
        return Err(DatasetError::NotFound {
            path: path.to_path_buf(),
        });
    }

    log::info!("Loading collisions from {}", path.display());
    let file = std::fs::File::open(path)?;
    load_from_reader(std::io::BufReader::new(file))
}

/// Loads the dataset from any CSV byte source.
///
/// # Errors
///
/// Returns [`DatasetError::Csv`] if the input is not readable CSV, or
/// [`DatasetError::MissingColumn`] if a required column is absent.
pub fn load_from_reader<R: Read>(input: R) -> Result<Dataset, DatasetError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_owned())
        .collect();
    let layout = ColumnLayout::from_headers(&headers)?;

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        records.push(layout.parse_row(&row));
    }

    let dataset = Dataset::from_records(records, layout.presence());
    let lookups = dataset.lookups();
    log::info!(
        "Loaded {} collisions ({} boroughs, {} years, {} vehicle types, {} contributing factors)",
        dataset.len(),
        lookups.boroughs.len(),
        lookups.years.len(),
        lookups.vehicle_types.len(),
        lookups.contributing_factors.len()
    );

    let undated = dataset
        .records()
        .iter()
        .filter(|r| r.crash_datetime.is_none())
        .count();
    if dataset.columns().crash_datetime && undated > 0 {
        log::debug!("{undated} collisions have a missing or unparseable timestamp");
    }

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use super::*;

    const FULL_CSV: &str = "\
COLLISION_ID,CRASH_DATETIME,BOROUGH,CRASH_YEAR,CRASH_HOUR,CRASH_WEEKDAY,VEHICLE TYPE CODE 1,VEHICLE TYPE CODE 2,CONTRIBUTING FACTOR VEHICLE 1,CONTRIBUTING FACTOR VEHICLE 2,HAS_PEDESTRIAN,HAS_CYCLIST,HAS_DRIVER,TOTAL_INJURED,TOTAL_KILLED,SEVERITY_LEVEL,SEVERITY_INDEX,LATITUDE,LONGITUDE
1,2022-03-01 08:15:00,BROOKLYN,2022,8,Tuesday,Sedan,Bike,Driver Inattention/Distraction,Unspecified,False,True,True,1,0,Injury,2.0,40.65,-73.95
2,garbage,QUEENS,2021.0,17,Friday,Taxi,,Unspecified,,True,False,False,0,1,Fatal,3.0,,
3,2021-07-04 23:00:00,UNKNOWN,2021,23,Sunday,,,,,False,False,True,0,0,Property Damage,1.0,40.7,-73.9
";

    #[test]
    fn loads_full_export() {
        let dataset = load_from_reader(FULL_CSV.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.columns(), ColumnPresence::all());

        let first = &dataset.records()[0];
        assert_eq!(first.collision_id, Some(1));
        assert_eq!(first.weekday, Some(Weekday::Tue));
        assert_eq!(first.hour, Some(8));
        assert_eq!(
            first.vehicle_types,
            vec![Some("Sedan".to_string()), Some("Bike".to_string())]
        );
        assert!(first.has_cyclist && first.has_driver && !first.has_pedestrian);
        assert_eq!(first.severity_index, Some(2.0));
    }

    #[test]
    fn malformed_timestamp_is_kept_as_missing() {
        let dataset = load_from_reader(FULL_CSV.as_bytes()).unwrap();
        let second = &dataset.records()[1];
        assert!(second.crash_datetime.is_none());
        assert_eq!(second.year, Some(2021));
        assert_eq!(second.total_killed, 1);
        assert!(second.coordinates().is_none());
    }

    #[test]
    fn derives_lookups_without_unknown_borough() {
        let dataset = load_from_reader(FULL_CSV.as_bytes()).unwrap();
        let lookups = dataset.lookups();
        assert_eq!(lookups.boroughs, vec!["BROOKLYN", "QUEENS"]);
        assert_eq!(lookups.years, vec![2021, 2022]);
        assert_eq!(lookups.vehicle_types, vec!["Bike", "Sedan", "Taxi"]);
        assert_eq!(
            lookups.contributing_factors,
            vec!["Driver Inattention/Distraction", "Unspecified"]
        );
    }

    #[test]
    fn optional_columns_degrade() {
        let csv = "BOROUGH,CRASH_YEAR,LATITUDE,LONGITUDE\nBRONX,2020,40.8,-73.9\n";
        let dataset = load_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(dataset.columns(), ColumnPresence::default());
        let record = &dataset.records()[0];
        assert_eq!(record.total_injured, 0);
        assert!(record.vehicle_types.is_empty());
        assert!(record.severity_level.is_none());
    }

    #[test]
    fn missing_required_column_fails() {
        let csv = "BOROUGH,LATITUDE,LONGITUDE\nBRONX,40.8,-73.9\n";
        let err = load_from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn { .. }));
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = load(Path::new("/nonexistent/collisions.csv")).unwrap_err();
        assert!(matches!(err, DatasetError::NotFound { .. }));
    }
}
