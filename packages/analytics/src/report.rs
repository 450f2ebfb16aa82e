//! Assembles a full [`Report`] from the dataset and an effective filter set.

use std::fmt::Display;

use crash_dash_analytics_models::{NO_DATA_HINT, Panel, Report};
use crash_dash_dataset::Dataset;
use crash_dash_query_models::FilterSet;

use crate::{MAP_SAMPLE_LIMIT, MAP_SAMPLE_SEED, aggregate, filter};

/// Trend placeholder when the dataset has no timestamp column.
pub const NO_DATETIME_TITLE: &str = "No datetime information";

/// Severity placeholder when the dataset has no severity column.
pub const NO_SEVERITY_TITLE: &str = "Severity not available";

/// Runs the filter-and-aggregate pipeline over the full dataset.
///
/// Every panel is [`Panel::Empty`] when nothing matches `filters`.
#[must_use]
pub fn build_report(dataset: &Dataset, filters: &FilterSet) -> Report {
    let records = filter::apply(dataset.records(), filters);
    let row_count = aggregate::to_u64(records.len());
    let status = status_line(row_count, filters);

    log::debug!("{status}");

    if records.is_empty() {
        return Report {
            status,
            filters: filters.clone(),
            row_count,
            kpis: Panel::Empty {
                title: "No data".to_string(),
                hint: Some(NO_DATA_HINT.to_string()),
            },
            borough_counts: Panel::empty(),
            monthly_trend: Panel::empty(),
            severity_distribution: Panel::empty(),
            hour_weekday: Panel::empty(),
            map: Panel::empty(),
        };
    }

    let columns = dataset.columns();

    Report {
        status,
        filters: filters.clone(),
        row_count,
        kpis: Panel::data(aggregate::kpis(&records)),
        borough_counts: Panel::data(aggregate::borough_counts(&records)),
        monthly_trend: if columns.crash_datetime {
            Panel::data(aggregate::monthly_trend(&records))
        } else {
            Panel::unavailable(NO_DATETIME_TITLE)
        },
        severity_distribution: if columns.severity_level {
            Panel::data(aggregate::severity_distribution(&records))
        } else {
            Panel::unavailable(NO_SEVERITY_TITLE)
        },
        hour_weekday: Panel::data(aggregate::hour_weekday_matrix(&records)),
        map: Panel::data(aggregate::map_points(
            &records,
            columns.severity_index,
            MAP_SAMPLE_LIMIT,
            MAP_SAMPLE_SEED,
        )),
    }
}

/// One-line summary of the row count and resolved filters, e.g.
/// `Rows: 12 | Borough: BROOKLYN | Year: 2022 | Injury: pedestrian`.
#[must_use]
pub fn status_line(row_count: u64, filters: &FilterSet) -> String {
    fn list<T: Display>(values: Option<&Vec<T>>) -> String {
        values.map_or_else(
            || "any".to_string(),
            |v| {
                v.iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ")
            },
        )
    }

    let injury = filters
        .injury
        .map_or_else(|| "any".to_string(), |c| c.to_string());

    format!(
        "Rows: {row_count} | Borough: {} | Year: {} | Injury: {injury}",
        list(filters.boroughs.as_ref()),
        list(filters.years.as_ref()),
    )
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Weekday};
    use crash_dash_collision_models::{
        CollisionRecord, ColumnPresence, InjuryCategory, InjuryChoice,
    };
    use crash_dash_query::resolve_filters;
    use crash_dash_query_models::FilterSelections;

    use super::*;

    struct Crash {
        borough: &'static str,
        year: i32,
        weekday: Weekday,
        hour: u8,
        pedestrian: bool,
        located: bool,
    }

    fn record(crash: &Crash) -> CollisionRecord {
        CollisionRecord {
            crash_datetime: NaiveDate::from_ymd_opt(crash.year, 5, 10)
                .and_then(|d| d.and_hms_opt(u32::from(crash.hour), 0, 0)),
            borough: Some(crash.borough.to_string()),
            year: Some(crash.year),
            hour: Some(crash.hour),
            weekday: Some(crash.weekday),
            vehicle_types: vec![Some("Sedan".to_string()), None],
            contributing_factors: vec![Some("Unspecified".to_string()), None],
            has_pedestrian: crash.pedestrian,
            has_driver: true,
            total_injured: 1,
            severity_level: Some(
                if crash.pedestrian {
                    "Injury"
                } else {
                    "Property Damage"
                }
                .to_string(),
            ),
            severity_index: Some(if crash.pedestrian { 2.0 } else { 1.0 }),
            latitude: crash.located.then_some(40.65),
            longitude: crash.located.then_some(-73.95),
            ..CollisionRecord::default()
        }
    }

    fn dataset(columns: ColumnPresence) -> Dataset {
        let crashes = [
            Crash {
                borough: "BROOKLYN",
                year: 2022,
                weekday: Weekday::Mon,
                hour: 8,
                pedestrian: true,
                located: true,
            },
            Crash {
                borough: "BROOKLYN",
                year: 2022,
                weekday: Weekday::Fri,
                hour: 17,
                pedestrian: true,
                located: false,
            },
            Crash {
                borough: "BROOKLYN",
                year: 2021,
                weekday: Weekday::Fri,
                hour: 17,
                pedestrian: true,
                located: true,
            },
            Crash {
                borough: "QUEENS",
                year: 2022,
                weekday: Weekday::Sun,
                hour: 2,
                pedestrian: true,
                located: true,
            },
            Crash {
                borough: "BROOKLYN",
                year: 2022,
                weekday: Weekday::Wed,
                hour: 12,
                pedestrian: false,
                located: true,
            },
        ];
        Dataset::from_records(crashes.iter().map(record).collect(), columns)
    }

    fn search(text: &str) -> FilterSelections {
        FilterSelections {
            search: Some(text.to_string()),
            ..FilterSelections::default()
        }
    }

    #[test]
    fn end_to_end_search_sentence() {
        let dataset = dataset(ColumnPresence::all());
        let filters = resolve_filters(
            &search("Brooklyn 2022 pedestrian crashes"),
            dataset.lookups(),
        );
        assert_eq!(filters.boroughs, Some(vec!["BROOKLYN".to_string()]));
        assert_eq!(filters.years, Some(vec![2022]));
        assert_eq!(filters.injury, Some(InjuryCategory::Pedestrian));
        assert_eq!(filters.vehicle_types, None);
        assert_eq!(filters.contributing_factors, None);

        let report = build_report(&dataset, &filters);
        assert_eq!(report.row_count, 2);
        assert_eq!(
            report.status,
            "Rows: 2 | Borough: BROOKLYN | Year: 2022 | Injury: pedestrian"
        );

        let kpis = report.kpis.value().unwrap();
        assert_eq!(kpis.total_crashes, 2);
        assert_eq!(kpis.total_injured, 2);
        assert_eq!(kpis.most_common_borough, "BROOKLYN");

        let boroughs = report.borough_counts.value().unwrap();
        assert_eq!(boroughs.len(), 1);
        assert_eq!(boroughs[0].count, 2);

        let matrix = report.hour_weekday.value().unwrap();
        assert_eq!(matrix.weekdays.len(), 7);
        assert_eq!(matrix.count("Monday", 8), 1);
        assert_eq!(matrix.count("Friday", 17), 1);
        assert_eq!(matrix.count("Sunday", 2), 0);

        let map = report.map.value().unwrap();
        assert_eq!(map.total_points, 1);
        assert!(map.weighted);
        assert_eq!(map.points[0].weight, Some(2.0));
    }

    #[test]
    fn selected_borough_overrides_search() {
        let dataset = dataset(ColumnPresence::all());
        let selections = FilterSelections {
            boroughs: vec!["QUEENS".to_string()],
            ..search("brooklyn")
        };
        let report = build_report(&dataset, &resolve_filters(&selections, dataset.lookups()));
        assert_eq!(report.row_count, 1);
    }

    #[test]
    fn injury_dropdown_overrides_search() {
        let dataset = dataset(ColumnPresence::all());
        let selections = FilterSelections {
            injury: InjuryChoice::Motorist,
            ..search("pedestrian")
        };
        let report = build_report(&dataset, &resolve_filters(&selections, dataset.lookups()));
        assert_eq!(report.filters.injury, Some(InjuryCategory::Motorist));
        assert_eq!(report.row_count, 5);
    }

    #[test]
    fn empty_selection_degrades_every_panel() {
        let dataset = dataset(ColumnPresence::all());
        let filters = FilterSet {
            boroughs: Some(vec!["QUEENS".to_string()]),
            years: Some(vec![2021]),
            ..FilterSet::default()
        };
        let report = build_report(&dataset, &filters);
        assert_eq!(report.row_count, 0);
        assert!(report.kpis.is_empty());
        assert!(report.borough_counts.is_empty());
        assert!(report.monthly_trend.is_empty());
        assert!(report.severity_distribution.is_empty());
        assert!(report.hour_weekday.is_empty());
        assert!(report.map.is_empty());
        assert!(report.status.starts_with("Rows: 0 |"));
    }

    #[test]
    fn missing_optional_columns_give_placeholders() {
        let dataset = dataset(ColumnPresence::default());
        let report = build_report(&dataset, &FilterSet::default());
        assert_eq!(
            report.monthly_trend,
            Panel::unavailable(NO_DATETIME_TITLE)
        );
        assert_eq!(
            report.severity_distribution,
            Panel::unavailable(NO_SEVERITY_TITLE)
        );
        let map = report.map.value().unwrap();
        assert!(!map.weighted);
        assert_eq!(map.total_points, 4);
    }

    #[test]
    fn located_and_unlocated_records_both_count() {
        let dataset = dataset(ColumnPresence::all());
        let report = build_report(&dataset, &FilterSet::default());
        assert_eq!(report.kpis.value().unwrap().total_crashes, 5);
        assert_eq!(report.map.value().unwrap().points.len(), 4);
    }

    #[test]
    fn unconstrained_status_line() {
        assert_eq!(
            status_line(7, &FilterSet::default()),
            "Rows: 7 | Borough: any | Year: any | Injury: any"
        );
        let filters = FilterSet {
            years: Some(vec![2021, 2022]),
            ..FilterSet::default()
        };
        assert_eq!(
            status_line(0, &filters),
            "Rows: 0 | Borough: any | Year: 2021, 2022 | Injury: any"
        );
    }
}
