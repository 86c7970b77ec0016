//! Router configuration for the API.
//!
//! This module provides centralized route registration and middleware
//! configuration for the application.

use axum::{middleware, Router};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use crate::api::handlers;
use crate::api::middleware::{global_error_handler, logging_middleware, request_id_middleware};
use crate::state::AppState;

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order
/// Middleware is applied in reverse order of declaration (last added runs first):
/// 1. Request ID middleware - generates/propagates request IDs
/// 2. Logging middleware - logs requests with request IDs
/// 3. Global error handler - normalizes error bodies and stamps the request ID
///
/// # Routes
/// - `/api/Auth`, `/api/Users`, `/api/Cuisines`, `/api/Restaurants`, `/api/Reviews`
/// - `/health`
///
/// # Example
/// ```ignore
/// let state = AppState::new(pool, settings.jwt.clone());
/// let router = create_router(state);
/// ```
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .nest("/Auth", handlers::auth::auth_routes())
        .nest("/Users", handlers::users::user_routes())
        .nest("/Cuisines", handlers::cuisines::cuisine_routes())
        .nest("/Restaurants", handlers::restaurants::restaurant_routes())
        .nest("/Reviews", handlers::reviews::review_routes());

    Router::new()
        .nest("/api", api_routes)
        .merge(handlers::health::health_routes())
        .layer(middleware::from_fn(global_error_handler))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .with_state(state)
}
