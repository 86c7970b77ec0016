//! Repository layer for data access operations.
//!
//! Each repository is an `#[async_trait]` so services can run against
//! PostgreSQL in production and an in-memory store in tests.

mod cuisine_repo;
mod restaurant_repo;
mod review_repo;
mod user_repo;

use std::sync::Arc;

use diesel::define_sql_function;
use diesel::sql_types::Text;

pub use cuisine_repo::{CuisineRepository, PgCuisineRepository};
pub use restaurant_repo::{PgRestaurantRepository, RestaurantRepository};
pub use review_repo::{PgReviewRepository, ReviewRepository};
pub use user_repo::{PgUserRepository, UserRepository};

use crate::db::AsyncDbPool;

define_sql_function! {
    /// SQL `lower()`, used for case-insensitive name and login checks.
    fn lower(x: Text) -> Text;
}

/// Aggregates all repositories for convenient access.
///
/// Cloning only bumps reference counts.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub cuisines: Arc<dyn CuisineRepository>,
    pub restaurants: Arc<dyn RestaurantRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one pool.
    pub fn postgres(pool: AsyncDbPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            cuisines: Arc::new(PgCuisineRepository::new(pool.clone())),
            restaurants: Arc::new(PgRestaurantRepository::new(pool.clone())),
            reviews: Arc::new(PgReviewRepository::new(pool)),
        }
    }
}
