#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter-and-aggregate pipeline for collision reports.
//!
//! [`build_report`] filters the loaded dataset by an effective
//! [`FilterSet`](crash_dash_query_models::FilterSet) and computes the KPI
//! summary and chart aggregates over the matching rows. The pipeline is
//! pure: the same dataset and filters always produce the same report,
//! including the sampled map points.

pub mod aggregate;
pub mod filter;
pub mod report;

pub use report::{build_report, status_line};

/// Maximum number of points plotted on the map.
pub const MAP_SAMPLE_LIMIT: usize = 8000;

/// Seed for map point sampling.
pub const MAP_SAMPLE_SEED: u64 = 42;
