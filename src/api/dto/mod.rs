//! Data transfer objects for API requests and responses.
//!
//! Wire names are camelCase. Password hashes never appear in a response.

mod auth;
mod cuisine;
mod error;
mod health;
mod restaurant;
mod review;
mod user;

pub use auth::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest};
pub use cuisine::{CreateCuisineRequest, CuisineResponse};
pub use error::ErrorResponse;
pub use health::{HealthResponse, HealthStatus};
pub use restaurant::{
    AddressRequest, AddressResponse, CreateRestaurantRequest, EditRestaurantRequest,
    RestaurantDetailResponse, RestaurantSummaryResponse,
};
pub use review::{CreateReviewRequest, ReviewResponse, ReviewerResponse, UpdateReviewRequest};
pub use user::{CreateUserRequest, UpdateUserRequest, UserResponse};
