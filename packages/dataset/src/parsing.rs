//! Cell-level parsing for the collision CSV.
//!
//! Dataframe exports write missing values as empty cells (sometimes `nan`)
//! and integral columns containing gaps as floats (`2021.0`). Every parser
//! here maps anything it cannot read to `None` instead of failing the load.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Weekday};

/// Timestamp layouts seen in collision exports, tried in order.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Returns the trimmed cell, or `None` if it is blank or a `NaN` marker.
#[must_use]
pub fn non_empty(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        None
    } else {
        Some(trimmed)
    }
}

/// Parses a crash timestamp. Date-only values resolve to midnight;
/// RFC 3339 values with an offset keep their local wall-clock time.
#[must_use]
pub fn parse_crash_datetime(raw: &str) -> Option<NaiveDateTime> {
    let s = non_empty(raw)?;
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt);
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Parses an integral value, accepting float spellings without a
/// fractional part (`"2021.0"`).
#[must_use]
pub fn parse_integral(raw: &str) -> Option<i64> {
    let s = non_empty(raw)?;
    if let Ok(v) = s.parse::<i64>() {
        return Some(v);
    }
    let v = s.parse::<f64>().ok()?;
    if !(v.is_finite() && v.fract() == 0.0 && v.abs() < 9.0e15) {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    let whole = v as i64;
    Some(whole)
}

/// Parses a non-negative count.
#[must_use]
pub fn parse_count(raw: &str) -> Option<u64> {
    parse_integral(raw).and_then(|v| u64::try_from(v).ok())
}

/// Parses an hour of day in `0..=23`.
#[must_use]
pub fn parse_hour(raw: &str) -> Option<u8> {
    parse_integral(raw)
        .and_then(|v| u8::try_from(v).ok())
        .filter(|h| *h < 24)
}

/// Parses a four-digit year.
#[must_use]
pub fn parse_year(raw: &str) -> Option<i32> {
    parse_integral(raw).and_then(|v| i32::try_from(v).ok())
}

/// Parses a weekday name (`"Monday"`, `"mon"`, ...).
#[must_use]
pub fn parse_weekday(raw: &str) -> Option<Weekday> {
    non_empty(raw)?.parse().ok()
}

/// Parses a boolean flag. Returns `None` for unrecognized spellings.
#[must_use]
pub fn parse_flag(raw: &str) -> Option<bool> {
    let s = non_empty(raw)?.to_ascii_lowercase();
    match s.as_str() {
        "true" | "t" | "yes" | "y" | "1" | "1.0" => Some(true),
        "false" | "f" | "no" | "n" | "0" | "0.0" => Some(false),
        _ => None,
    }
}

/// Parses a finite floating-point value (coordinates, severity index).
#[must_use]
pub fn parse_float(raw: &str) -> Option<f64> {
    non_empty(raw)?
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dataframe_timestamp() {
        let dt = parse_crash_datetime("2021-09-11 02:39:00").unwrap();
        assert_eq!(dt.to_string(), "2021-09-11 02:39:00");
    }

    #[test]
    fn parses_iso_timestamp_with_fractional() {
        let dt = parse_crash_datetime("2022-03-26T11:45:00.000").unwrap();
        assert_eq!(dt.to_string(), "2022-03-26 11:45:00");
    }

    #[test]
    fn parses_timestamp_with_offset() {
        let dt = parse_crash_datetime("2021-09-11T02:39:00Z").unwrap();
        assert_eq!(dt.to_string(), "2021-09-11 02:39:00");
        let dt = parse_crash_datetime("2021-09-11T02:39:00+00:00").unwrap();
        assert_eq!(dt.to_string(), "2021-09-11 02:39:00");
        let dt = parse_crash_datetime("2021-12-31T23:30:00-05:00").unwrap();
        assert_eq!(dt.to_string(), "2021-12-31 23:30:00");
    }

    #[test]
    fn parses_date_only_as_midnight() {
        let dt = parse_crash_datetime("2020-01-02").unwrap();
        assert_eq!(dt.to_string(), "2020-01-02 00:00:00");
    }

    #[test]
    fn rejects_invalid_timestamp() {
        assert!(parse_crash_datetime("not-a-date").is_none());
        assert!(parse_crash_datetime("").is_none());
        assert!(parse_crash_datetime("NaN").is_none());
    }

    #[test]
    fn parses_float_spelled_integers() {
        assert_eq!(parse_year("2021.0"), Some(2021));
        assert_eq!(parse_year("2021"), Some(2021));
        assert_eq!(parse_count("3.0"), Some(3));
        assert_eq!(parse_count("1.5"), None);
        assert_eq!(parse_count("-1"), None);
    }

    #[test]
    fn rejects_out_of_range_hour() {
        assert_eq!(parse_hour("23"), Some(23));
        assert_eq!(parse_hour("24"), None);
    }

    #[test]
    fn parses_weekday_names() {
        assert_eq!(parse_weekday("Monday"), Some(Weekday::Mon));
        assert_eq!(parse_weekday("sunday"), Some(Weekday::Sun));
        assert_eq!(parse_weekday("Someday"), None);
    }

    #[test]
    fn parses_flag_spellings() {
        assert_eq!(parse_flag("True"), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
        assert_eq!(parse_flag(""), None);
    }

    #[test]
    fn parses_coordinates() {
        let lat = parse_float(" 40.6782 ").unwrap();
        assert!((lat - 40.6782).abs() < f64::EPSILON);
        assert!(parse_float("inf").is_none());
        assert!(parse_float("").is_none());
    }
}
