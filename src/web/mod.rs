//! Server-rendered web frontend.
//!
//! Runs as its own process (`forkful web`) and reaches the REST API over
//! HTTP with the bearer token kept in the visitor's session cookie.

pub mod client;
mod handlers;
pub mod ranking;
pub mod session;
mod views;

use axum::{extract::FromRef, middleware, routing::get, Router};
use axum_extra::extract::cookie::Key;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tracing::{error, info};

pub use client::{ApiClient, ApiClientError, CANNOT_CONNECT};
pub use session::Session;

use crate::api::middleware::{logging_middleware, request_id_middleware};
use crate::config::{Environment, Settings};
use crate::server::shutdown_signal;

/// Shared state of the frontend: the API client and the cookie key.
#[derive(Clone)]
pub struct WebState {
    pub api: ApiClient,
    pub key: Key,
    /// Sets the `Secure` cookie attribute; enabled in production.
    pub secure_cookies: bool,
}

impl FromRef<WebState> for Key {
    fn from_ref(state: &WebState) -> Self {
        state.key.clone()
    }
}

/// All frontend pages.
pub fn create_web_router(state: WebState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/Authorization/Login",
            get(handlers::login_form).post(handlers::login),
        )
        .route("/Authorization/Logout", get(handlers::logout))
        .route(
            "/Register/Register",
            get(handlers::register_form).post(handlers::register),
        )
        .route(
            "/AddRestaurants",
            get(handlers::add_restaurant_form).post(handlers::add_restaurant),
        )
        .route(
            "/AddReviews",
            get(handlers::add_review_form).post(handlers::add_review),
        )
        .route("/CuisineFilter", get(handlers::cuisine_filter))
        .route(
            "/CuisineFilter/FilterByCuisineId",
            get(handlers::filter_by_cuisine_id),
        )
        .route("/Ranking", get(handlers::ranking))
        .route("/RestaurantReviews", get(handlers::restaurant_reviews))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CompressionLayer::new())
        .with_state(state)
}

/// Frontend server
pub struct WebServer {
    settings: Settings,
}

impl WebServer {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let web = &self.settings.web;
        web.validate().map_err(|e| {
            error!(error = %e, "Web configuration validation failed");
            anyhow::anyhow!("Web configuration validation failed: {}", e)
        })?;

        let key = Key::try_from(web.session_key.as_bytes())
            .map_err(|e| anyhow::anyhow!("Invalid session key: {}", e))?;
        let api = ApiClient::from_config(web)?;
        let secure_cookies = Environment::from_env().is_production();

        info!(
            api_base_url = %api.base_url(),
            request_timeout = %web.request_timeout,
            secure_cookies,
            "Web frontend configuration loaded"
        );

        let router = create_web_router(WebState {
            api,
            key,
            secure_cookies,
        });

        let address = web.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;

        info!(address = %address, "Web frontend listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Web frontend shutdown complete");
        Ok(())
    }
}
