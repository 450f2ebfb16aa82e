//! Merges explicit filter selections with constraints parsed from search
//! text.
//!
//! Precedence per dimension is: explicit selection, then parsed text, then
//! no constraint. Vehicle types and contributing factors are never inferred
//! from text.

use crash_dash_collision_models::LookupLists;
use crash_dash_query_models::{FilterSelections, FilterSet, ParsedQuery, non_empty};

use crate::parser::parse_search_query;

/// Resolves the effective [`FilterSet`] for one report request.
#[must_use]
pub fn resolve_filters(selections: &FilterSelections, lookups: &LookupLists) -> FilterSet {
    let parsed = selections
        .search
        .as_deref()
        .map_or_else(ParsedQuery::default, |text| {
            parse_search_query(text, lookups)
        });

    if !parsed.is_empty() {
        log::debug!("Search text resolved to {parsed:?}");
    }

    FilterSet {
        boroughs: non_empty(selections.boroughs.clone()).or(parsed.boroughs),
        years: non_empty(selections.years.clone()).or(parsed.years),
        vehicle_types: non_empty(selections.vehicle_types.clone()),
        contributing_factors: non_empty(selections.contributing_factors.clone()),
        injury: selections.injury.category().or(parsed.injury),
    }
}

#[cfg(test)]
mod tests {
    use crash_dash_collision_models::{InjuryCategory, InjuryChoice};

    use super::*;

    fn lookups() -> LookupLists {
        LookupLists {
            boroughs: vec![
                "BRONX".to_string(),
                "BROOKLYN".to_string(),
                "MANHATTAN".to_string(),
                "QUEENS".to_string(),
                "STATEN ISLAND".to_string(),
            ],
            years: vec![2020, 2021, 2022],
            vehicle_types: vec!["Bike".to_string(), "Sedan".to_string()],
            contributing_factors: vec!["Unspecified".to_string()],
        }
    }

    fn search(text: &str) -> FilterSelections {
        FilterSelections {
            search: Some(text.to_string()),
            ..FilterSelections::default()
        }
    }

    #[test]
    fn selected_boroughs_win_over_text() {
        let selections = FilterSelections {
            boroughs: vec!["BROOKLYN".to_string()],
            ..search("queens 2021")
        };
        let filters = resolve_filters(&selections, &lookups());
        assert_eq!(filters.boroughs, Some(vec!["BROOKLYN".to_string()]));
        assert_eq!(filters.years, Some(vec![2021]));
    }

    #[test]
    fn text_fills_empty_selections() {
        let filters = resolve_filters(&search("queens 2021 pedestrian crashes"), &lookups());
        assert_eq!(filters.boroughs, Some(vec!["QUEENS".to_string()]));
        assert_eq!(filters.years, Some(vec![2021]));
        assert_eq!(filters.injury, Some(InjuryCategory::Pedestrian));
    }

    #[test]
    fn selected_years_win_over_text() {
        let selections = FilterSelections {
            years: vec![2020],
            ..search("2022")
        };
        let filters = resolve_filters(&selections, &lookups());
        assert_eq!(filters.years, Some(vec![2020]));
    }

    #[test]
    fn concrete_injury_choice_wins_over_text() {
        let selections = FilterSelections {
            injury: InjuryChoice::Cyclist,
            ..search("pedestrian")
        };
        let filters = resolve_filters(&selections, &lookups());
        assert_eq!(filters.injury, Some(InjuryCategory::Cyclist));
    }

    #[test]
    fn any_injury_choice_defers_to_text() {
        let filters = resolve_filters(&search("bike crashes"), &lookups());
        assert_eq!(filters.injury, Some(InjuryCategory::Cyclist));
    }

    #[test]
    fn text_never_constrains_vehicles_or_factors() {
        let filters = resolve_filters(&search("sedan unspecified bike"), &lookups());
        assert_eq!(filters.vehicle_types, None);
        assert_eq!(filters.contributing_factors, None);
    }

    #[test]
    fn vehicle_and_factor_selections_pass_through() {
        let selections = FilterSelections {
            vehicle_types: vec!["Sedan".to_string()],
            contributing_factors: vec!["Unspecified".to_string()],
            ..FilterSelections::default()
        };
        let filters = resolve_filters(&selections, &lookups());
        assert_eq!(filters.vehicle_types, Some(vec!["Sedan".to_string()]));
        assert_eq!(
            filters.contributing_factors,
            Some(vec!["Unspecified".to_string()])
        );
    }

    #[test]
    fn no_input_is_unconstrained() {
        let filters = resolve_filters(&FilterSelections::default(), &lookups());
        assert!(filters.is_unconstrained());

        let filters = resolve_filters(&search(""), &lookups());
        assert!(filters.is_unconstrained());
    }

    #[test]
    fn end_to_end_example_sentence() {
        let filters = resolve_filters(&search("Brooklyn 2022 pedestrian crashes"), &lookups());
        assert_eq!(
            filters,
            FilterSet {
                boroughs: Some(vec!["BROOKLYN".to_string()]),
                years: Some(vec![2022]),
                vehicle_types: None,
                contributing_factors: None,
                injury: Some(InjuryCategory::Pedestrian),
            }
        );
    }
}
