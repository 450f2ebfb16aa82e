#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter types shared by the search parser, the filter resolver and the
//! aggregation pipeline.
//!
//! Three shapes flow through a recompute: the raw [`FilterSelections`] a
//! user submitted, the [`ParsedQuery`] inferred from their search text, and
//! the [`FilterSet`] that results from merging the two.

use crash_dash_collision_models::{InjuryCategory, InjuryChoice};
use serde::{Deserialize, Serialize};

/// Everything the filter controls hold when the user asks for a report.
///
/// Empty lists mean "nothing selected" and [`InjuryChoice::Any`] is the
/// dropdown's neutral value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSelections {
    /// Selected boroughs.
    pub boroughs: Vec<String>,
    /// Selected years.
    pub years: Vec<i32>,
    /// Selected vehicle types.
    pub vehicle_types: Vec<String>,
    /// Selected contributing factors.
    pub contributing_factors: Vec<String>,
    /// Injury-type dropdown value.
    pub injury: InjuryChoice,
    /// Raw free-text search.
    pub search: Option<String>,
}

/// Constraints inferred from free-text search.
///
/// Only the borough, year and injury dimensions can ever be inferred.
/// `None` means nothing was detected for that dimension; a `Some` list is
/// never empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedQuery {
    /// Boroughs named in the text, in lookup order.
    pub boroughs: Option<Vec<String>>,
    /// Known years found in the text, in order of first appearance.
    pub years: Option<Vec<i32>>,
    /// Injury category implied by keywords.
    pub injury: Option<InjuryCategory>,
}

impl ParsedQuery {
    /// Whether nothing was detected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.boroughs.is_none() && self.years.is_none() && self.injury.is_none()
    }
}

/// The effective constraints applied to the dataset for one recompute.
///
/// `None` on a dimension means "no constraint". A `Some` list is never
/// empty; use [`non_empty`] when building one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSet {
    /// Allowed boroughs.
    pub boroughs: Option<Vec<String>>,
    /// Allowed years.
    pub years: Option<Vec<i32>>,
    /// Allowed vehicle types, matched against every vehicle slot.
    pub vehicle_types: Option<Vec<String>>,
    /// Allowed contributing factors, matched against every vehicle slot.
    pub contributing_factors: Option<Vec<String>>,
    /// Required injury category.
    pub injury: Option<InjuryCategory>,
}

impl FilterSet {
    /// Whether every dimension is unconstrained.
    #[must_use]
    pub const fn is_unconstrained(&self) -> bool {
        self.boroughs.is_none()
            && self.years.is_none()
            && self.vehicle_types.is_none()
            && self.contributing_factors.is_none()
            && self.injury.is_none()
    }
}

/// Maps an empty list to `None` ("no constraint").
#[must_use]
pub fn non_empty<T>(values: Vec<T>) -> Option<Vec<T>> {
    if values.is_empty() { None } else { Some(values) }
}
