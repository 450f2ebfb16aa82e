#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Search parsing and filter resolution.
//!
//! [`parse_search_query`] extracts borough, year and injury constraints from
//! free text; [`resolve_filters`] merges them with the user's explicit
//! selections into the effective filter set for one report.

pub mod parser;
pub mod resolver;

pub use parser::parse_search_query;
pub use resolver::resolve_filters;
