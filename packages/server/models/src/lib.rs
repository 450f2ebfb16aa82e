#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API response types for the collision dashboard server.
//!
//! Report bodies reuse the analytics types directly; the types here cover
//! the endpoints that have no analytics counterpart.

use crash_dash_collision_models::{InjuryChoice, LookupLists};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// One entry of the injury-type dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiInjuryOption {
    /// Display label.
    pub label: String,
    /// Value sent back in `FilterSelections.injury`.
    pub value: InjuryChoice,
}

/// Selectable filter options, computed once from the loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiOptions {
    /// Known boroughs.
    pub boroughs: Vec<String>,
    /// Known years, ascending.
    pub years: Vec<i32>,
    /// Known vehicle types.
    pub vehicle_types: Vec<String>,
    /// Known contributing factors.
    pub contributing_factors: Vec<String>,
    /// Injury dropdown entries, `Any` first.
    pub injury_options: Vec<ApiInjuryOption>,
}

impl From<&LookupLists> for ApiOptions {
    fn from(lookups: &LookupLists) -> Self {
        Self {
            boroughs: lookups.boroughs.clone(),
            years: lookups.years.clone(),
            vehicle_types: lookups.vehicle_types.clone(),
            contributing_factors: lookups.contributing_factors.clone(),
            injury_options: InjuryChoice::all()
                .iter()
                .map(|choice| ApiInjuryOption {
                    label: choice.label().to_string(),
                    value: *choice,
                })
                .collect(),
        }
    }
}
