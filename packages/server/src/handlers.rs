//! HTTP handler functions for the collision dashboard API.

use actix_web::{HttpResponse, web};
use crash_dash_analytics::build_report;
use crash_dash_query::resolve_filters;
use crash_dash_query_models::FilterSelections;
use crash_dash_server_models::{ApiHealth, ApiOptions};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/options`
///
/// Returns the selectable filter values derived from the dataset.
pub async fn options(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiOptions::from(state.dataset.lookups()))
}

/// `POST /api/report`
///
/// Resolves the submitted selections and search text into effective
/// filters and returns the full report.
pub async fn report(
    state: web::Data<AppState>,
    selections: web::Json<FilterSelections>,
) -> HttpResponse {
    let filters = resolve_filters(&selections, state.dataset.lookups());
    let report = build_report(&state.dataset, &filters);
    log::debug!("Report: {}", report.status);
    HttpResponse::Ok().json(report)
}
