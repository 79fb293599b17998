//! Machine endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};
use farmtrack_common::AppResult;
use farmtrack_core::{CreateMachineInput, UpdateMachineInput};
use farmtrack_db::entities::machine;
use serde::Serialize;
use uuid::Uuid;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedMachineResponse {
    pub id: Uuid,
    pub register_number: String,
    pub message: String,
}

async fn create_machine(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateMachineInput>,
) -> AppResult<ApiResponse<machine::Model>> {
    let machine = state.machine_service.create(input).await?;
    Ok(ApiResponse::ok(machine))
}

async fn list_machines(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<machine::Model>>> {
    let machines = state.machine_service.list().await?;
    Ok(ApiResponse::ok(machines))
}

async fn get_machine(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<machine::Model>> {
    let machine = state.machine_service.get(id).await?;
    Ok(ApiResponse::ok(machine))
}

async fn update_machine(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateMachineInput>,
) -> AppResult<ApiResponse<machine::Model>> {
    let machine = state.machine_service.update(id, input).await?;
    Ok(ApiResponse::ok(machine))
}

async fn delete_machine(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<DeletedMachineResponse>> {
    let machine = state.machine_service.soft_delete(id).await?;
    Ok(ApiResponse::ok(DeletedMachineResponse {
        id: machine.id,
        register_number: machine.register_number.clone(),
        message: format!(
            "Successfully soft-deleted machine '{}'",
            machine.register_number
        ),
    }))
}

async fn permanently_delete_machine(
    AuthUser(claims): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<DeletedMachineResponse>> {
    state
        .machine_service
        .permanent_delete(id, claims.role)
        .await?;
    Ok(ApiResponse::ok(DeletedMachineResponse {
        id,
        register_number: String::new(),
        message: format!("Successfully permanently deleted machine with id {id}"),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/machine", post(create_machine).get(list_machines))
        .route(
            "/machine/{id}",
            get(get_machine)
                .patch(update_machine)
                .delete(delete_machine),
        )
        .route(
            "/machine/{id}/permanent",
            delete(permanently_delete_machine),
        )
}
