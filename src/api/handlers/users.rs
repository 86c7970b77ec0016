//! User CRUD request handlers.
//!
//! Provides HTTP handlers for user management operations.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::api::dto::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::api::middleware::AdminPrincipal;
use crate::error::AppResult;
use crate::models::Principal;
use crate::state::AppState;
use crate::utils::validate::{AppJson, ValidatedJson};

/// Creates user-related routes.
///
/// Routes:
/// - GET /        - List all users (AdminPolicy)
/// - POST /       - Create a user (AdminPolicy)
/// - GET /{id}    - Get user by ID
/// - PUT /{id}    - Update user (self or admin)
/// - DELETE /{id} - Delete user (AdminPolicy)
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
}

/// GET /api/Users - List all users
async fn list_users(
    State(state): State<AppState>,
    _admin: AdminPrincipal,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.services.users.list_users().await?;
    let responses: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(responses))
}

/// GET /api/Users/{id} - Get user by ID
///
/// Returns the user with the specified ID or 404 if not found.
async fn get_user(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<UserResponse>> {
    let user = state.services.users.get_user(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// POST /api/Users - Create new user
///
/// Returns 201 Created with the created user data.
async fn create_user(
    State(state): State<AppState>,
    _admin: AdminPrincipal,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state.services.users.create_user(payload.into_draft()).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// PUT /api/Users/{id} - Update user
async fn update_user(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .services
        .users
        .update_user(&principal, id, payload.into_edit())
        .await?;
    Ok(Json(UserResponse::from(user)))
}

/// DELETE /api/Users/{id} - Delete user
///
/// Returns 204 No Content on success.
async fn delete_user(
    State(state): State<AppState>,
    _admin: AdminPrincipal,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.users.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
