//! Restaurant request handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::api::dto::{
    CreateRestaurantRequest, EditRestaurantRequest, RestaurantDetailResponse, RestaurantSummaryResponse,
};
use crate::api::middleware::AdminPrincipal;
use crate::error::AppResult;
use crate::models::Principal;
use crate::state::AppState;
use crate::utils::validate::AppJson;

/// Routes:
/// - GET /                        - List restaurants with cuisine and address
/// - POST /                       - Create a restaurant (UserPolicy)
/// - GET /{id}                    - Full detail including reviews
/// - PUT /{id}                    - Partial edit (UserPolicy)
/// - DELETE /{id}                 - Delete (AdminPolicy)
/// - GET /byCuisine/{cuisineId}   - Filter by cuisine
pub fn restaurant_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_restaurants).post(create_restaurant))
        .route(
            "/{id}",
            get(get_restaurant).put(edit_restaurant).delete(delete_restaurant),
        )
        .route("/byCuisine/{cuisine_id}", get(list_by_cuisine))
}

async fn list_restaurants(State(state): State<AppState>) -> AppResult<Json<Vec<RestaurantSummaryResponse>>> {
    let records = state.services.restaurants.list_restaurants().await?;
    Ok(Json(records.into_iter().map(RestaurantSummaryResponse::from).collect()))
}

async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<RestaurantDetailResponse>> {
    let detail = state.services.restaurants.get_restaurant(id).await?;
    Ok(Json(detail.into()))
}

async fn list_by_cuisine(
    State(state): State<AppState>,
    Path(cuisine_id): Path<i32>,
) -> AppResult<Json<Vec<RestaurantSummaryResponse>>> {
    let records = state.services.restaurants.list_by_cuisine(cuisine_id).await?;
    Ok(Json(records.into_iter().map(RestaurantSummaryResponse::from).collect()))
}

/// POST /api/Restaurants
///
/// Returns 201 with the detail shape and an empty review list.
async fn create_restaurant(
    State(state): State<AppState>,
    _principal: Principal,
    AppJson(payload): AppJson<CreateRestaurantRequest>,
) -> AppResult<(StatusCode, Json<RestaurantDetailResponse>)> {
    let detail = state
        .services
        .restaurants
        .create_restaurant(payload.into_draft())
        .await?;
    Ok((StatusCode::CREATED, Json(detail.into())))
}

/// PUT /api/Restaurants/{id}
async fn edit_restaurant(
    State(state): State<AppState>,
    _principal: Principal,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<EditRestaurantRequest>,
) -> AppResult<Json<RestaurantDetailResponse>> {
    let detail = state
        .services
        .restaurants
        .edit_restaurant(id, payload.into_edit())
        .await?;
    Ok(Json(detail.into()))
}

async fn delete_restaurant(
    State(state): State<AppState>,
    _admin: AdminPrincipal,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.restaurants.delete_restaurant(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
