//! Report endpoints.

use axum::{Router, extract::State, routing::get};
use farmtrack_common::AppResult;
use farmtrack_db::repositories::{
    FarmMachineCount, FieldCountPerFarmAndCrop, ProcessingReportRow, SoilTypePerFarm,
};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

async fn farms_with_most_machines(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<FarmMachineCount>>> {
    let rows = state.report_service.farms_with_most_machines().await?;
    Ok(ApiResponse::ok(rows))
}

async fn field_count_per_farm_and_crop(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<FieldCountPerFarmAndCrop>>> {
    let rows = state.report_service.field_count_per_farm_and_crop().await?;
    Ok(ApiResponse::ok(rows))
}

async fn most_common_soil_per_farm(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<SoilTypePerFarm>>> {
    let rows = state.report_service.most_common_soil_per_farm().await?;
    Ok(ApiResponse::ok(rows))
}

async fn processing_report(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<ProcessingReportRow>>> {
    let rows = state.report_service.processing_report().await?;
    Ok(ApiResponse::ok(rows))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/report/farms-with-most-machines",
            get(farms_with_most_machines),
        )
        .route(
            "/report/field-count-per-farm-and-crop",
            get(field_count_per_farm_and_crop),
        )
        .route(
            "/report/most-common-soil-per-farm",
            get(most_common_soil_per_farm),
        )
        .route("/report/processing-report", get(processing_report))
}
