//! Soil endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};
use farmtrack_common::AppResult;
use farmtrack_core::{CreateSoilInput, UpdateSoilInput};
use farmtrack_db::entities::soil;
use serde::Serialize;
use uuid::Uuid;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

#[derive(Serialize)]
pub struct DeletedSoilResponse {
    pub id: Uuid,
    pub name: String,
    pub message: String,
}

async fn create_soil(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateSoilInput>,
) -> AppResult<ApiResponse<soil::Model>> {
    let soil = state.soil_service.create(input).await?;
    Ok(ApiResponse::ok(soil))
}

async fn list_soils(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<soil::Model>>> {
    let soils = state.soil_service.list().await?;
    Ok(ApiResponse::ok(soils))
}

async fn get_soil(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<soil::Model>> {
    let soil = state.soil_service.get(id).await?;
    Ok(ApiResponse::ok(soil))
}

async fn update_soil(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateSoilInput>,
) -> AppResult<ApiResponse<soil::Model>> {
    let soil = state.soil_service.update(id, input).await?;
    Ok(ApiResponse::ok(soil))
}

async fn delete_soil(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<DeletedSoilResponse>> {
    let soil = state.soil_service.soft_delete(id).await?;
    Ok(ApiResponse::ok(DeletedSoilResponse {
        id: soil.id,
        name: soil.name.clone(),
        message: format!("Successfully soft-deleted soil '{}'", soil.name),
    }))
}

async fn permanently_delete_soil(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<DeletedSoilResponse>> {
    state.soil_service.permanent_delete(id, claims.role).await?;
    Ok(ApiResponse::ok(DeletedSoilResponse {
        id,
        name: String::new(),
        message: format!("Successfully permanently deleted soil with id {id}"),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/soil", post(create_soil).get(list_soils))
        .route(
            "/soil/{id}",
            get(get_soil).patch(update_soil).delete(delete_soil),
        )
        .route("/soil/{id}/permanent", delete(permanently_delete_soil))
}
