//! Authentication handlers for registration and login.

use axum::{extract::State, routing::post, Json, Router};

use crate::api::dto::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::{AppJson, ValidatedJson};

/// Creates the authentication routes
///
/// # Routes
/// - `POST /register` - Create a non-admin account
/// - `POST /login` - Exchange credentials for a bearer token
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// POST /api/Auth/register
async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .services
        .auth
        .register(&payload.login, &payload.password)
        .await?;

    Ok(Json(MessageResponse::new("User registered successfully.")))
}

/// POST /api/Auth/login
///
/// Any failure, unknown login or wrong password, is a 401.
async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let (user, token) = state
        .services
        .auth
        .login(&payload.login, &payload.password)
        .await?;

    Ok(Json(LoginResponse::new(user, token)))
}
