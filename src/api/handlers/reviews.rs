//! Review request handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::api::dto::{CreateReviewRequest, ReviewResponse, UpdateReviewRequest};
use crate::error::AppResult;
use crate::models::Principal;
use crate::state::AppState;
use crate::utils::validate::{AppJson, ValidatedJson};

/// Routes:
/// - GET /                            - All reviews with authors
/// - POST /                           - Post a review as the caller
/// - GET /{id}                        - One review
/// - PUT /{id}                        - Update (author or admin)
/// - DELETE /{id}                     - Delete (author or admin)
/// - GET /{id}/reviews              - Reviews of the restaurant `id`
pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reviews).post(create_review))
        .route("/{id}", get(get_review).put(update_review).delete(delete_review))
        .route("/{id}/reviews", get(list_for_restaurant))
}

async fn list_reviews(State(state): State<AppState>) -> AppResult<Json<Vec<ReviewResponse>>> {
    let reviews = state.services.reviews.list_reviews().await?;
    Ok(Json(reviews.into_iter().map(ReviewResponse::from).collect()))
}

async fn get_review(State(state): State<AppState>, Path(id): Path<i32>) -> AppResult<Json<ReviewResponse>> {
    let review = state.services.reviews.get_review(id).await?;
    Ok(Json(review.into()))
}

async fn list_for_restaurant(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i32>,
) -> AppResult<Json<Vec<ReviewResponse>>> {
    let reviews = state.services.reviews.list_for_restaurant(restaurant_id).await?;
    Ok(Json(reviews.into_iter().map(ReviewResponse::from).collect()))
}

async fn create_review(
    State(state): State<AppState>,
    principal: Principal,
    ValidatedJson(payload): ValidatedJson<CreateReviewRequest>,
) -> AppResult<(StatusCode, Json<ReviewResponse>)> {
    let review = state
        .services
        .reviews
        .create_review(&principal, payload.into_draft())
        .await?;
    Ok((StatusCode::CREATED, Json(review.into())))
}

async fn update_review(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateReviewRequest>,
) -> AppResult<Json<ReviewResponse>> {
    let review = state
        .services
        .reviews
        .update_review(&principal, id, payload.into_edit())
        .await?;
    Ok(Json(review.into()))
}

async fn delete_review(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.reviews.delete_review(&principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
