//! Field endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};
use farmtrack_common::AppResult;
use farmtrack_core::{CreateFieldInput, UpdateFieldInput};
use farmtrack_db::entities::field;
use serde::Serialize;
use uuid::Uuid;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Deletion confirmation.
#[derive(Serialize)]
pub struct DeletedFieldResponse {
    pub id: Uuid,
    pub name: String,
    pub message: String,
}

async fn create_field(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateFieldInput>,
) -> AppResult<ApiResponse<field::Model>> {
    let field = state.field_service.create(input).await?;
    Ok(ApiResponse::ok(field))
}

async fn list_fields(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<field::Model>>> {
    let fields = state.field_service.list().await?;
    Ok(ApiResponse::ok(fields))
}

async fn get_field(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<field::Model>> {
    let field = state.field_service.get(id).await?;
    Ok(ApiResponse::ok(field))
}

async fn update_field(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateFieldInput>,
) -> AppResult<ApiResponse<field::Model>> {
    let field = state.field_service.update(id, input).await?;
    Ok(ApiResponse::ok(field))
}

async fn delete_field(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<DeletedFieldResponse>> {
    let field = state.field_service.soft_delete(id).await?;
    Ok(ApiResponse::ok(DeletedFieldResponse {
        id: field.id,
        name: field.name.clone(),
        message: format!("Successfully soft-deleted field '{}'", field.name),
    }))
}

async fn permanently_delete_field(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<DeletedFieldResponse>> {
    state.field_service.permanent_delete(id, claims.role).await?;
    Ok(ApiResponse::ok(DeletedFieldResponse {
        id,
        name: String::new(),
        message: format!("Successfully permanently deleted field with id {id}"),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/field", post(create_field).get(list_fields))
        .route(
            "/field/{id}",
            get(get_field).patch(update_field).delete(delete_field),
        )
        .route("/field/{id}/permanent", delete(permanently_delete_field))
}
