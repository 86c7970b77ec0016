//! HTTP client for the REST API.
//!
//! The frontend never touches the database; every page is built from these
//! calls. Failures are split into "could not reach the API" and "the API
//! said no" so pages can word them differently.

use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::api::dto::{
    CreateRestaurantRequest, CreateReviewRequest, CuisineResponse, LoginRequest, LoginResponse,
    MessageResponse, RegisterRequest, RestaurantDetailResponse, RestaurantSummaryResponse,
    ReviewResponse,
};
use crate::config::WebConfig;

/// Shown whenever the API cannot be reached at all.
pub const CANNOT_CONNECT: &str = "Cannot connect to the server. Please try again later.";

#[derive(Debug, Error)]
pub enum ApiClientError {
    /// Connection refused, DNS failure or timeout.
    #[error("cannot reach the API server")]
    Unreachable(#[source] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API rejected the request with status {status}")]
    Rejected { status: StatusCode },

    /// The API answered 2xx with a body we could not read.
    #[error("unexpected API response")]
    Decode(#[source] reqwest::Error),
}

impl ApiClientError {
    pub fn is_unreachable(&self) -> bool {
        matches!(self, ApiClientError::Unreachable(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiClientError::Rejected { status } if *status == StatusCode::NOT_FOUND)
    }

    /// Text safe to put on a page: the connectivity message, or `rejected`.
    ///
    /// Never includes the API body, status or token.
    pub fn user_message(&self, rejected: &str) -> String {
        if self.is_unreachable() {
            CANNOT_CONNECT.to_string()
        } else {
            rejected.to_string()
        }
    }
}

pub type ApiResult<T> = Result<T, ApiClientError>;

/// Pooled client bound to one API base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .connect_timeout(Duration::from_secs(5))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(concat!("forkful-web/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &WebConfig) -> reqwest::Result<Self> {
        Self::new(&config.api_base_url, Duration::from_secs(config.request_timeout))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, base_url = %self.base_url, "API unreachable");
            ApiClientError::Unreachable(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), url = %response.url(), "API rejected request");
            return Err(ApiClientError::Rejected { status });
        }

        response.json::<T>().await.map_err(ApiClientError::Decode)
    }

    pub async fn login(&self, login: &str, password: &str) -> ApiResult<LoginResponse> {
        let body = LoginRequest {
            login: login.to_string(),
            password: password.to_string(),
        };
        self.send(self.http.post(self.url("/api/Auth/login")).json(&body)).await
    }

    pub async fn register(&self, login: &str, password: &str) -> ApiResult<MessageResponse> {
        let body = RegisterRequest {
            login: login.to_string(),
            password: password.to_string(),
        };
        self.send(self.http.post(self.url("/api/Auth/register")).json(&body)).await
    }

    pub async fn restaurants(&self) -> ApiResult<Vec<RestaurantSummaryResponse>> {
        self.send(self.http.get(self.url("/api/Restaurants"))).await
    }

    pub async fn restaurant(&self, id: i32) -> ApiResult<RestaurantDetailResponse> {
        self.send(self.http.get(self.url(&format!("/api/Restaurants/{id}")))).await
    }

    pub async fn restaurant_reviews(&self, restaurant_id: i32) -> ApiResult<Vec<ReviewResponse>> {
        self.send(
            self.http
                .get(self.url(&format!("/api/Reviews/{restaurant_id}/reviews"))),
        )
        .await
    }

    pub async fn cuisines(&self) -> ApiResult<Vec<CuisineResponse>> {
        self.send(self.http.get(self.url("/api/Cuisines"))).await
    }

    pub async fn cuisine(&self, id: i32) -> ApiResult<CuisineResponse> {
        self.send(self.http.get(self.url(&format!("/api/Cuisines/{id}")))).await
    }

    pub async fn create_restaurant(
        &self,
        token: &str,
        body: &CreateRestaurantRequest,
    ) -> ApiResult<RestaurantDetailResponse> {
        self.send(
            self.http
                .post(self.url("/api/Restaurants"))
                .bearer_auth(token)
                .json(body),
        )
        .await
    }

    pub async fn create_review(&self, token: &str, body: &CreateReviewRequest) -> ApiResult<ReviewResponse> {
        self.send(
            self.http
                .post(self.url("/api/Reviews"))
                .bearer_auth(token)
                .json(body),
        )
        .await
    }
}
