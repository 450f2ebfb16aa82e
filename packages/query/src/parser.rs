//! Free-text search parsing.
//!
//! Turns a sentence such as `"Brooklyn 2022 pedestrian crashes"` into a
//! [`ParsedQuery`]. Only values present in the dataset's [`LookupLists`]
//! are ever recognized as boroughs or years.

use std::sync::LazyLock;

use crash_dash_collision_models::{InjuryCategory, LookupLists};
use crash_dash_query_models::{ParsedQuery, non_empty};
use regex::Regex;

/// Four-digit `20xx` tokens.
static YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(20\d{2})\b").expect("valid regex"));

/// Injury keywords in priority order. The first category with any keyword
/// present in the text wins.
const INJURY_KEYWORDS: &[(InjuryCategory, &[&str])] = &[
    (InjuryCategory::Pedestrian, &["pedestrian"]),
    (InjuryCategory::Cyclist, &["cyclist", "bicycle", "bike"]),
    (InjuryCategory::Motorist, &["motorist", "driver"]),
];

/// Parses free-text search into borough, year and injury constraints.
///
/// Blank text yields an empty [`ParsedQuery`].
#[must_use]
pub fn parse_search_query(text: &str, lookups: &LookupLists) -> ParsedQuery {
    if text.trim().is_empty() {
        return ParsedQuery::default();
    }

    let text_low = text.to_lowercase();

    ParsedQuery {
        boroughs: non_empty(detect_boroughs(&text_low, lookups)),
        years: non_empty(detect_years(&text_low, lookups)),
        injury: detect_injury(&text_low),
    }
}

/// Known boroughs whose lowercase name occurs anywhere in `text_low`.
fn detect_boroughs(text_low: &str, lookups: &LookupLists) -> Vec<String> {
    lookups
        .boroughs
        .iter()
        .filter(|b| !b.is_empty() && text_low.contains(&b.to_lowercase()))
        .cloned()
        .collect()
}

/// Known years appearing as `20xx` tokens, de-duplicated in order of first
/// appearance.
fn detect_years(text_low: &str, lookups: &LookupLists) -> Vec<i32> {
    let mut years = Vec::new();
    for caps in YEAR_PATTERN.captures_iter(text_low) {
        let Some(year) = caps.get(1).and_then(|m| m.as_str().parse::<i32>().ok()) else {
            continue;
        };
        if lookups.has_year(year) && !years.contains(&year) {
            years.push(year);
        }
    }
    years
}

fn detect_injury(text_low: &str) -> Option<InjuryCategory> {
    INJURY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text_low.contains(k)))
        .map(|(category, _)| *category)
}
