//! Crop endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};
use farmtrack_common::AppResult;
use farmtrack_core::{CreateCropInput, UpdateCropInput};
use farmtrack_db::entities::crop;
use serde::Serialize;
use uuid::Uuid;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

#[derive(Serialize)]
pub struct DeletedCropResponse {
    pub id: Uuid,
    pub name: String,
    pub message: String,
}

async fn create_crop(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCropInput>,
) -> AppResult<ApiResponse<crop::Model>> {
    let crop = state.crop_service.create(input).await?;
    Ok(ApiResponse::ok(crop))
}

async fn list_crops(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<crop::Model>>> {
    let crops = state.crop_service.list().await?;
    Ok(ApiResponse::ok(crops))
}

async fn get_crop(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<crop::Model>> {
    let crop = state.crop_service.get(id).await?;
    Ok(ApiResponse::ok(crop))
}

async fn update_crop(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateCropInput>,
) -> AppResult<ApiResponse<crop::Model>> {
    let crop = state.crop_service.update(id, input).await?;
    Ok(ApiResponse::ok(crop))
}

async fn delete_crop(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<DeletedCropResponse>> {
    let crop = state.crop_service.soft_delete(id).await?;
    Ok(ApiResponse::ok(DeletedCropResponse {
        id: crop.id,
        name: crop.name.clone(),
        message: format!("Successfully soft-deleted crop '{}'", crop.name),
    }))
}

async fn permanently_delete_crop(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<DeletedCropResponse>> {
    state.crop_service.permanent_delete(id, claims.role).await?;
    Ok(ApiResponse::ok(DeletedCropResponse {
        id,
        name: String::new(),
        message: format!("Successfully permanently deleted crop with id {id}"),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/crop", post(create_crop).get(list_crops))
        .route(
            "/crop/{id}",
            get(get_crop).patch(update_crop).delete(delete_crop),
        )
        .route("/crop/{id}/permanent", delete(permanently_delete_crop))
}
