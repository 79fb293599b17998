//! Authentication endpoints.

use axum::{
    Json, Router,
    extract::State,
    routing::{patch, post},
};
use farmtrack_common::AppResult;
use farmtrack_core::{LoginInput, RegisterInput, UpdateUserRoleInput};
use farmtrack_db::entities::user::UserRole;
use serde::Serialize;
use uuid::Uuid;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Registration response.
#[derive(Serialize)]
pub struct RegisterResponse {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub access_token: String,
}

/// Register a new user account.
async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> AppResult<ApiResponse<RegisterResponse>> {
    let (user, access_token) = state.auth_service.register(input).await?;

    Ok(ApiResponse::ok(RegisterResponse {
        id: user.id,
        email: user.email,
        role: user.role,
        access_token,
    }))
}

/// Login response.
#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
}

/// Sign in to an existing account.
async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> AppResult<ApiResponse<LoginResponse>> {
    let access_token = state.auth_service.login(input).await?;

    Ok(ApiResponse::ok(LoginResponse { access_token }))
}

/// Role-change response.
#[derive(Serialize)]
pub struct UserRoleResponse {
    pub id: Uuid,
    pub email: String,
    pub role: UserRole,
}

/// Change a user's role. OWNER only (route policy).
async fn update_user_role(
    AuthUser(_claims): AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateUserRoleInput>,
) -> AppResult<ApiResponse<UserRoleResponse>> {
    let user = state.auth_service.update_user_role(input).await?;

    Ok(ApiResponse::ok(UserRoleResponse {
        id: user.id,
        email: user.email,
        role: user.role,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/role", patch(update_user_role))
}
