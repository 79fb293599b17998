//! Growing-crop-period endpoints.
//!
//! Periods have no mutable scalar fields, so there is no PATCH route.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};
use farmtrack_common::AppResult;
use farmtrack_core::CreateGrowingCropPeriodInput;
use farmtrack_db::entities::growing_crop_period;
use serde::Serialize;
use uuid::Uuid;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

#[derive(Serialize)]
pub struct DeletedPeriodResponse {
    pub id: Uuid,
    pub message: String,
}

async fn create_period(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateGrowingCropPeriodInput>,
) -> AppResult<ApiResponse<growing_crop_period::Model>> {
    let period = state.growing_crop_period_service.create(input).await?;
    Ok(ApiResponse::ok(period))
}

async fn list_periods(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<growing_crop_period::Model>>> {
    let periods = state.growing_crop_period_service.list().await?;
    Ok(ApiResponse::ok(periods))
}

async fn get_period(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<growing_crop_period::Model>> {
    let period = state.growing_crop_period_service.get(id).await?;
    Ok(ApiResponse::ok(period))
}

async fn delete_period(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<DeletedPeriodResponse>> {
    let period = state.growing_crop_period_service.soft_delete(id).await?;
    Ok(ApiResponse::ok(DeletedPeriodResponse {
        id: period.id,
        message: format!("Successfully soft-deleted growing crop period with id {}", period.id),
    }))
}

async fn permanently_delete_period(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<DeletedPeriodResponse>> {
    state
        .growing_crop_period_service
        .permanent_delete(id, claims.role)
        .await?;
    Ok(ApiResponse::ok(DeletedPeriodResponse {
        id,
        message: format!("Successfully permanently deleted growing crop period with id {id}"),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/growingCropPeriods",
            post(create_period).get(list_periods),
        )
        .route(
            "/growingCropPeriods/{id}",
            get(get_period).delete(delete_period),
        )
        .route(
            "/growingCropPeriods/{id}/permanent",
            delete(permanently_delete_period),
        )
}
