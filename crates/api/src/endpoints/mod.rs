//! API endpoints.

mod auth;
mod crop;
mod farm;
mod field;
mod growing_crop_period;
mod machine;
mod processing;
mod processing_type;
mod report;
mod soil;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
///
/// Each entity router carries its full paths so the matched route path
/// lines up with the guard's policy table.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(farm::router())
        .merge(field::router())
        .merge(soil::router())
        .merge(crop::router())
        .merge(machine::router())
        .merge(processing_type::router())
        .merge(growing_crop_period::router())
        .merge(processing::router())
        .merge(report::router())
}
