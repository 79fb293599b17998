//! Farm endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};
use farmtrack_common::AppResult;
use farmtrack_core::{CreateFarmInput, UpdateFarmInput};
use farmtrack_db::entities::farm;
use serde::Serialize;
use uuid::Uuid;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Deletion confirmation.
#[derive(Serialize)]
pub struct DeletedFarmResponse {
    pub id: Uuid,
    pub name: String,
    pub message: String,
}

/// Create a farm.
async fn create_farm(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateFarmInput>,
) -> AppResult<ApiResponse<farm::Model>> {
    let farm = state.farm_service.create(input).await?;
    Ok(ApiResponse::ok(farm))
}

/// List all active farms.
async fn list_farms(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<farm::Model>>> {
    let farms = state.farm_service.list().await?;
    Ok(ApiResponse::ok(farms))
}

/// Get a farm by ID.
async fn get_farm(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<farm::Model>> {
    let farm = state.farm_service.get(id).await?;
    Ok(ApiResponse::ok(farm))
}

/// Update a farm.
async fn update_farm(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateFarmInput>,
) -> AppResult<ApiResponse<farm::Model>> {
    let farm = state.farm_service.update(id, input).await?;
    Ok(ApiResponse::ok(farm))
}

/// Soft-delete a farm.
async fn delete_farm(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<DeletedFarmResponse>> {
    let farm = state.farm_service.soft_delete(id).await?;
    Ok(ApiResponse::ok(DeletedFarmResponse {
        id: farm.id,
        name: farm.name.clone(),
        message: format!("Successfully soft-deleted farm '{}'", farm.name),
    }))
}

/// Permanently delete a farm. OWNER only (route policy + service check).
async fn permanently_delete_farm(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<DeletedFarmResponse>> {
    state.farm_service.permanent_delete(id, claims.role).await?;
    Ok(ApiResponse::ok(DeletedFarmResponse {
        id,
        name: String::new(),
        message: format!("Successfully permanently deleted farm with id {id}"),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/farm", post(create_farm).get(list_farms))
        .route(
            "/farm/{id}",
            get(get_farm).patch(update_farm).delete(delete_farm),
        )
        .route("/farm/{id}/permanent", delete(permanently_delete_farm))
}
