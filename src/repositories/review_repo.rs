//! Review repository. Every read joins the author so callers can render
//! the reviewer's login without a second round trip.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{NewReview, Review, ReviewChanges, ReviewWithAuthor, User};
use crate::schema::{reviews, users};

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn create(&self, new_review: NewReview) -> Result<Review, AppError>;

    async fn find_by_id(&self, review_id: i32) -> Result<Option<Review>, AppError>;

    async fn find_with_author(&self, review_id: i32) -> Result<Option<ReviewWithAuthor>, AppError>;

    async fn list_with_authors(&self) -> Result<Vec<ReviewWithAuthor>, AppError>;

    async fn list_for_restaurant(&self, restaurant_id: i32) -> Result<Vec<ReviewWithAuthor>, AppError>;

    async fn update(&self, review_id: i32, changes: ReviewChanges) -> Result<Review, AppError>;

    async fn delete(&self, review_id: i32) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PgReviewRepository {
    pool: AsyncDbPool,
}

impl PgReviewRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    async fn create(&self, new_review: NewReview) -> Result<Review, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(reviews::table)
            .values(&new_review)
            .returning(Review::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn find_by_id(&self, review_id: i32) -> Result<Option<Review>, AppError> {
        let mut conn = self.pool.get().await?;

        reviews::table
            .find(review_id)
            .select(Review::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn find_with_author(&self, review_id: i32) -> Result<Option<ReviewWithAuthor>, AppError> {
        let mut conn = self.pool.get().await?;

        reviews::table
            .inner_join(users::table)
            .filter(reviews::id.eq(review_id))
            .select((Review::as_select(), User::as_select()))
            .first::<(Review, User)>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(ReviewWithAuthor::from))
            .map_err(AppError::from)
    }

    async fn list_with_authors(&self) -> Result<Vec<ReviewWithAuthor>, AppError> {
        let mut conn = self.pool.get().await?;

        let rows = reviews::table
            .inner_join(users::table)
            .select((Review::as_select(), User::as_select()))
            .order(reviews::id.asc())
            .load::<(Review, User)>(&mut conn)
            .await?;

        Ok(rows.into_iter().map(ReviewWithAuthor::from).collect())
    }

    async fn list_for_restaurant(&self, restaurant_id: i32) -> Result<Vec<ReviewWithAuthor>, AppError> {
        let mut conn = self.pool.get().await?;

        let rows = reviews::table
            .inner_join(users::table)
            .filter(reviews::restaurant_id.eq(restaurant_id))
            .select((Review::as_select(), User::as_select()))
            .order(reviews::id.asc())
            .load::<(Review, User)>(&mut conn)
            .await?;

        Ok(rows.into_iter().map(ReviewWithAuthor::from).collect())
    }

    async fn update(&self, review_id: i32, changes: ReviewChanges) -> Result<Review, AppError> {
        let mut conn = self.pool.get().await?;

        if changes.is_empty() {
            return reviews::table
                .find(review_id)
                .select(Review::as_select())
                .first(&mut conn)
                .await
                .map_err(AppError::from);
        }

        diesel::update(reviews::table.find(review_id))
            .set(&changes)
            .returning(Review::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    async fn delete(&self, review_id: i32) -> Result<bool, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::delete(reviews::table.find(review_id))
            .execute(&mut conn)
            .await
            .map(|affected| affected > 0)
            .map_err(AppError::from)
    }
}
