//! Processing endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};
use farmtrack_common::AppResult;
use farmtrack_core::{CreateProcessingInput, UpdateProcessingInput};
use farmtrack_db::entities::processing;
use serde::Serialize;
use uuid::Uuid;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

#[derive(Serialize)]
pub struct DeletedProcessingResponse {
    pub id: Uuid,
    pub message: String,
}

async fn create_processing(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateProcessingInput>,
) -> AppResult<ApiResponse<processing::Model>> {
    let processing = state.processing_service.create(input).await?;
    Ok(ApiResponse::ok(processing))
}

async fn list_processings(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<processing::Model>>> {
    let processings = state.processing_service.list().await?;
    Ok(ApiResponse::ok(processings))
}

async fn get_processing(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<processing::Model>> {
    let processing = state.processing_service.get(id).await?;
    Ok(ApiResponse::ok(processing))
}

async fn update_processing(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateProcessingInput>,
) -> AppResult<ApiResponse<processing::Model>> {
    let processing = state.processing_service.update(id, input).await?;
    Ok(ApiResponse::ok(processing))
}

async fn delete_processing(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<DeletedProcessingResponse>> {
    let processing = state.processing_service.soft_delete(id).await?;
    Ok(ApiResponse::ok(DeletedProcessingResponse {
        id: processing.id,
        message: format!("Successfully soft-deleted processing with id {}", processing.id),
    }))
}

async fn permanently_delete_processing(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<DeletedProcessingResponse>> {
    state
        .processing_service
        .permanent_delete(id, claims.role)
        .await?;
    Ok(ApiResponse::ok(DeletedProcessingResponse {
        id,
        message: format!("Successfully permanently deleted processing with id {id}"),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/processing",
            post(create_processing).get(list_processings),
        )
        .route(
            "/processing/{id}",
            get(get_processing)
                .patch(update_processing)
                .delete(delete_processing),
        )
        .route(
            "/processing/{id}/permanent",
            delete(permanently_delete_processing),
        )
}
