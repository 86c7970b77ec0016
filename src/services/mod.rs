//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers.

mod auth_service;
mod cuisine_service;
mod restaurant_service;
mod review_service;
mod user_service;

pub use auth_service::AuthService;
pub use cuisine_service::CuisineService;
pub use restaurant_service::{RestaurantDraft, RestaurantEdit, RestaurantService};
pub use review_service::{ReviewDraft, ReviewEdit, ReviewService};
pub use user_service::{UserDraft, UserEdit, UserService};

use crate::config::JwtConfig;
use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since every repository sits behind an `Arc`.
#[derive(Clone)]
pub struct Services {
    pub auth: AuthService,
    pub users: UserService,
    pub cuisines: CuisineService,
    pub restaurants: RestaurantService,
    pub reviews: ReviewService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories, jwt_config: JwtConfig) -> Self {
        Self {
            auth: AuthService::new(repos.users.clone(), jwt_config),
            users: UserService::new(repos.users),
            cuisines: CuisineService::new(repos.cuisines.clone()),
            restaurants: RestaurantService::new(
                repos.restaurants.clone(),
                repos.cuisines,
                repos.reviews.clone(),
            ),
            reviews: ReviewService::new(repos.reviews, repos.restaurants),
        }
    }
}
