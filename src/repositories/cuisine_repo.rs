//! Cuisine repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::lower;
use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{Cuisine, NewCuisine};

#[async_trait]
pub trait CuisineRepository: Send + Sync {
    async fn create(&self, new_cuisine: NewCuisine) -> Result<Cuisine, AppError>;

    async fn find_by_id(&self, cuisine_id: i32) -> Result<Option<Cuisine>, AppError>;

    /// Case-insensitive name check. Advisory only, there is no unique index.
    async fn name_taken(&self, cuisine_name: &str) -> Result<bool, AppError>;

    async fn list_all(&self) -> Result<Vec<Cuisine>, AppError>;

    /// Restaurants pointing at the cuisine keep existing with a NULL cuisine.
    async fn delete(&self, cuisine_id: i32) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PgCuisineRepository {
    pool: AsyncDbPool,
}

impl PgCuisineRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CuisineRepository for PgCuisineRepository {
    async fn create(&self, new_cuisine: NewCuisine) -> Result<Cuisine, AppError> {
        use crate::schema::cuisines::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::insert_into(cuisines)
            .values(&new_cuisine)
            .returning(Cuisine::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_id(&self, cuisine_id: i32) -> Result<Option<Cuisine>, AppError> {
        use crate::schema::cuisines::dsl::*;
        let mut conn = self.pool.get().await?;

        cuisines
            .find(cuisine_id)
            .select(Cuisine::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn name_taken(&self, cuisine_name: &str) -> Result<bool, AppError> {
        use crate::schema::cuisines::dsl::*;
        let mut conn = self.pool.get().await?;

        cuisines
            .select(id)
            .filter(lower(name).eq(cuisine_name.to_lowercase()))
            .first::<i32>(&mut conn)
            .await
            .optional()
            .map(|found| found.is_some())
            .map_err(AppError::from)
    }

    async fn list_all(&self) -> Result<Vec<Cuisine>, AppError> {
        use crate::schema::cuisines::dsl::*;
        let mut conn = self.pool.get().await?;

        cuisines
            .select(Cuisine::as_select())
            .order(id.asc())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn delete(&self, cuisine_id: i32) -> Result<bool, AppError> {
        use crate::schema::cuisines::dsl::*;
        let mut conn = self.pool.get().await?;

        diesel::delete(cuisines.find(cuisine_id))
            .execute(&mut conn)
            .await
            .map(|affected| affected > 0)
            .map_err(AppError::from)
    }
}
