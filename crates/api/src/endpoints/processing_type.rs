//! Processing-type endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};
use farmtrack_common::AppResult;
use farmtrack_core::{CreateProcessingTypeInput, UpdateProcessingTypeInput};
use farmtrack_db::entities::processing_type;
use serde::Serialize;
use uuid::Uuid;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

#[derive(Serialize)]
pub struct DeletedProcessingTypeResponse {
    pub id: Uuid,
    pub name: String,
    pub message: String,
}

async fn create_processing_type(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateProcessingTypeInput>,
) -> AppResult<ApiResponse<processing_type::Model>> {
    let processing_type = state.processing_type_service.create(input).await?;
    Ok(ApiResponse::ok(processing_type))
}

async fn list_processing_types(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<processing_type::Model>>> {
    let types = state.processing_type_service.list().await?;
    Ok(ApiResponse::ok(types))
}

async fn get_processing_type(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<processing_type::Model>> {
    let processing_type = state.processing_type_service.get(id).await?;
    Ok(ApiResponse::ok(processing_type))
}

async fn update_processing_type(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateProcessingTypeInput>,
) -> AppResult<ApiResponse<processing_type::Model>> {
    let processing_type = state.processing_type_service.update(id, input).await?;
    Ok(ApiResponse::ok(processing_type))
}

async fn delete_processing_type(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<DeletedProcessingTypeResponse>> {
    let processing_type = state.processing_type_service.soft_delete(id).await?;
    Ok(ApiResponse::ok(DeletedProcessingTypeResponse {
        id: processing_type.id,
        name: processing_type.name.clone(),
        message: format!(
            "Successfully soft-deleted processing type '{}'",
            processing_type.name
        ),
    }))
}

async fn permanently_delete_processing_type(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<DeletedProcessingTypeResponse>> {
    state
        .processing_type_service
        .permanent_delete(id, claims.role)
        .await?;
    Ok(ApiResponse::ok(DeletedProcessingTypeResponse {
        id,
        name: String::new(),
        message: format!("Successfully permanently deleted processing type with id {id}"),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/processingType",
            post(create_processing_type).get(list_processing_types),
        )
        .route(
            "/processingType/{id}",
            get(get_processing_type)
                .patch(update_processing_type)
                .delete(delete_processing_type),
        )
        .route(
            "/processingType/{id}/permanent",
            delete(permanently_delete_processing_type),
        )
}
