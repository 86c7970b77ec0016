use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::api::dto::{CreateCuisineRequest, CuisineResponse};
use crate::api::middleware::AdminPrincipal;
use crate::error::AppResult;
use crate::models::Principal;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Routes:
/// - GET /        - List cuisines (public)
/// - POST /       - Create a cuisine (UserPolicy)
/// - GET /{id}    - Get a cuisine (public)
/// - DELETE /{id} - Delete a cuisine (AdminPolicy)
pub fn cuisine_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_cuisines).post(create_cuisine))
        .route("/{id}", get(get_cuisine).delete(delete_cuisine))
}

async fn list_cuisines(State(state): State<AppState>) -> AppResult<Json<Vec<CuisineResponse>>> {
    let cuisines = state.services.cuisines.list_cuisines().await?;
    Ok(Json(cuisines.into_iter().map(CuisineResponse::from).collect()))
}

async fn get_cuisine(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<CuisineResponse>> {
    let cuisine = state.services.cuisines.get_cuisine(id).await?;
    Ok(Json(cuisine.into()))
}

async fn create_cuisine(
    State(state): State<AppState>,
    _principal: Principal,
    ValidatedJson(payload): ValidatedJson<CreateCuisineRequest>,
) -> AppResult<(StatusCode, Json<CuisineResponse>)> {
    let cuisine = state.services.cuisines.create_cuisine(&payload.cuisine_name).await?;
    Ok((StatusCode::CREATED, Json(cuisine.into())))
}

async fn delete_cuisine(
    State(state): State<AppState>,
    _admin: AdminPrincipal,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.cuisines.delete_cuisine(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
