//! Aggregates over an already-filtered, non-empty set of collisions.
//!
//! Each function here is independent of the others and takes the filtered
//! records in dataset order.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::Datelike as _;
use crash_dash_analytics_models::{
    CategoryCount, HourWeekdayMatrix, KpiSummary, MapPoint, MapPoints, TimeSeriesPoint,
};
use crash_dash_collision_models::{CollisionRecord, WEEKDAYS, weekday_name};
use rand::SeedableRng as _;
use rand::rngs::StdRng;
use rand::seq::index;

/// Shown as the most common borough when no record has one.
pub const NO_BOROUGH: &str = "N/A";

pub(crate) fn to_u64(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}

/// Counts occurrences of each label, most frequent first, ties by label.
fn count_labels<'a>(labels: impl Iterator<Item = &'a str>) -> Vec<CategoryCount> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for label in labels {
        *counts.entry(label).or_default() += 1;
    }

    let mut out: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));
    out
}

/// Headline numbers: crash, injury and fatality totals plus the most
/// common borough.
#[must_use]
pub fn kpis(records: &[&CollisionRecord]) -> KpiSummary {
    KpiSummary {
        total_crashes: to_u64(records.len()),
        total_injured: records.iter().map(|r| r.total_injured).sum(),
        total_killed: records.iter().map(|r| r.total_killed).sum(),
        most_common_borough: most_common_borough(records)
            .unwrap_or(NO_BOROUGH)
            .to_string(),
    }
}

/// The borough with the most records. Ties go to the alphabetically
/// smallest borough.
#[must_use]
pub fn most_common_borough<'a>(records: &[&'a CollisionRecord]) -> Option<&'a str> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for borough in records.iter().filter_map(|r| r.borough.as_deref()) {
        *counts.entry(borough).or_default() += 1;
    }

    let mut best: Option<(&str, u64)> = None;
    for (borough, count) in counts {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((borough, count));
        }
    }
    best.map(|(borough, _)| borough)
}

/// Collisions per borough. Records without a borough are not counted.
#[must_use]
pub fn borough_counts(records: &[&CollisionRecord]) -> Vec<CategoryCount> {
    count_labels(records.iter().filter_map(|r| r.borough.as_deref()))
}

/// Collisions per severity level. Records without a level are not counted.
#[must_use]
pub fn severity_distribution(records: &[&CollisionRecord]) -> Vec<CategoryCount> {
    count_labels(records.iter().filter_map(|r| r.severity_level.as_deref()))
}

/// Collisions per `YYYY-MM`, ascending. Records without a timestamp are
/// skipped.
#[must_use]
pub fn monthly_trend(records: &[&CollisionRecord]) -> Vec<TimeSeriesPoint> {
    let mut months: BTreeMap<(i32, u32), u64> = BTreeMap::new();
    for dt in records.iter().filter_map(|r| r.crash_datetime) {
        *months.entry((dt.year(), dt.month())).or_default() += 1;
    }

    months
        .into_iter()
        .map(|((year, month), count)| TimeSeriesPoint {
            period: format!("{year:04}-{month:02}"),
            count,
        })
        .collect()
}

/// Collisions per weekday and hour.
///
/// Rows are always Monday through Sunday; columns are the hours observed
/// among records that have both an hour and a weekday.
#[must_use]
pub fn hour_weekday_matrix(records: &[&CollisionRecord]) -> HourWeekdayMatrix {
    let cells: Vec<(usize, u8)> = records
        .iter()
        .filter_map(|r| {
            let day = r.weekday?;
            let hour = r.hour?;
            Some((day.num_days_from_monday() as usize, hour))
        })
        .collect();

    let hours: Vec<u8> = cells
        .iter()
        .map(|(_, h)| *h)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut counts = vec![vec![0_u64; hours.len()]; WEEKDAYS.len()];
    for (row, hour) in cells {
        if let Ok(col) = hours.binary_search(&hour) {
            counts[row][col] += 1;
        }
    }

    HourWeekdayMatrix {
        weekdays: WEEKDAYS
            .iter()
            .map(|d| weekday_name(*d).to_string())
            .collect(),
        hours,
        counts,
    }
}

/// Picks `limit` of `len` indices reproducibly for `seed`, returned in
/// ascending order. Returns every index when `len <= limit`.
#[must_use]
pub fn sample_indices(len: usize, limit: usize, seed: u64) -> Vec<usize> {
    if len <= limit {
        return (0..len).collect();
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut picked = index::sample(&mut rng, len, limit).into_vec();
    picked.sort_unstable();
    picked
}

/// Locations of the records that have coordinates, sampled down to
/// `limit` points. When `weighted`, each point carries its record's
/// severity index.
#[must_use]
pub fn map_points(
    records: &[&CollisionRecord],
    weighted: bool,
    limit: usize,
    seed: u64,
) -> MapPoints {
    let located: Vec<(&CollisionRecord, (f64, f64))> = records
        .iter()
        .filter_map(|r| r.coordinates().map(|c| (*r, c)))
        .collect();

    let total = located.len();
    let picked = sample_indices(total, limit, seed);
    if picked.len() < total {
        log::debug!("Sampled {} of {total} map points", picked.len());
    }

    let weighted = weighted && total > 0;
    let points = picked
        .into_iter()
        .map(|i| {
            let (record, (latitude, longitude)) = located[i];
            MapPoint {
                latitude,
                longitude,
                weight: if weighted { record.severity_index } else { None },
            }
        })
        .collect::<Vec<_>>();

    MapPoints {
        total_points: to_u64(total),
        sampled: points.len() < total,
        weighted,
        points,
    }
}
