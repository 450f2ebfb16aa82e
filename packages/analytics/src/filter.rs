//! Record filtering.
//!
//! A record matches a [`FilterSet`] when every constrained dimension is
//! satisfied. Multi-slot dimensions (vehicle types, contributing factors)
//! are satisfied when any slot holds an allowed value.

use crash_dash_collision_models::CollisionRecord;
use crash_dash_query_models::FilterSet;

/// Whether any non-empty slot equals one of `allowed`.
#[must_use]
pub fn any_slot_matches(slots: &[Option<String>], allowed: &[String]) -> bool {
    slots
        .iter()
        .flatten()
        .any(|value| allowed.iter().any(|a| a == value))
}

/// Whether `record` satisfies every constraint in `filters`.
#[must_use]
pub fn matches(record: &CollisionRecord, filters: &FilterSet) -> bool {
    filters.boroughs.as_ref().is_none_or(|allowed| {
        record
            .borough
            .as_ref()
            .is_some_and(|b| allowed.contains(b))
    }) && filters
        .years
        .as_ref()
        .is_none_or(|allowed| record.year.is_some_and(|y| allowed.contains(&y)))
        && filters
            .vehicle_types
            .as_ref()
            .is_none_or(|allowed| any_slot_matches(&record.vehicle_types, allowed))
        && filters
            .contributing_factors
            .as_ref()
            .is_none_or(|allowed| any_slot_matches(&record.contributing_factors, allowed))
        && filters.injury.is_none_or(|category| record.involves(category))
}

/// Returns the records matching `filters`, in dataset order.
#[must_use]
pub fn apply<'a>(records: &'a [CollisionRecord], filters: &FilterSet) -> Vec<&'a CollisionRecord> {
    if filters.is_unconstrained() {
        return records.iter().collect();
    }
    records.iter().filter(|r| matches(r, filters)).collect()
}
