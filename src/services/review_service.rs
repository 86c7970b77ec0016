//! Review service.

use std::sync::Arc;

use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{check_stars, NewReview, Principal, ReviewChanges, ReviewWithAuthor};
use crate::repositories::{RestaurantRepository, ReviewRepository};
use crate::utils::validate::non_blank;

#[derive(Debug, Clone)]
pub struct ReviewDraft {
    pub restaurant_id: i32,
    pub stars: i32,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ReviewEdit {
    /// Must match the path id when present.
    pub review_id: Option<i32>,
    pub stars: Option<i32>,
    pub comment: Option<String>,
}

#[derive(Clone)]
pub struct ReviewService {
    reviews: Arc<dyn ReviewRepository>,
    restaurants: Arc<dyn RestaurantRepository>,
}

impl ReviewService {
    pub fn new(reviews: Arc<dyn ReviewRepository>, restaurants: Arc<dyn RestaurantRepository>) -> Self {
        Self { reviews, restaurants }
    }

    async fn ensure_restaurant(&self, restaurant_id: i32) -> AppResult<()> {
        match self.restaurants.find_by_id(restaurant_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found("restaurant", "id", restaurant_id)),
        }
    }

    /// Posts a review authored by `principal`.
    pub async fn create_review(&self, principal: &Principal, draft: ReviewDraft) -> AppResult<ReviewWithAuthor> {
        check_stars(draft.stars)?;
        self.ensure_restaurant(draft.restaurant_id).await?;

        let review = self
            .reviews
            .create(NewReview {
                user_id: principal.user_id,
                restaurant_id: Some(draft.restaurant_id),
                stars: draft.stars,
                comment: non_blank(draft.comment),
            })
            .await?;

        info!(
            review_id = review.id,
            restaurant_id = draft.restaurant_id,
            user_id = principal.user_id,
            stars = review.stars,
            "Review created"
        );
        self.get_review(review.id).await
    }

    pub async fn get_review(&self, id: i32) -> AppResult<ReviewWithAuthor> {
        self.reviews
            .find_with_author(id)
            .await?
            .ok_or_else(|| AppError::not_found("review", "id", id))
    }

    pub async fn list_reviews(&self) -> AppResult<Vec<ReviewWithAuthor>> {
        self.reviews.list_with_authors().await
    }

    /// Reviews of one restaurant; empty when it has none, 404 when it does not exist.
    pub async fn list_for_restaurant(&self, restaurant_id: i32) -> AppResult<Vec<ReviewWithAuthor>> {
        self.ensure_restaurant(restaurant_id).await?;
        self.reviews.list_for_restaurant(restaurant_id).await
    }

    /// Partial update by the author or an administrator.
    ///
    /// Checks run in a fixed order: existence (404), ownership (403),
    /// body id (400), stars range (400).
    pub async fn update_review(&self, principal: &Principal, id: i32, edit: ReviewEdit) -> AppResult<ReviewWithAuthor> {
        let review = self
            .reviews
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("review", "id", id))?;
        principal.require_owner_or_admin(review.user_id, "modify this review")?;

        if edit.review_id.is_some_and(|body_id| body_id != id) {
            return Err(AppError::bad_request("Review ID mismatch."));
        }
        if let Some(stars) = edit.stars {
            check_stars(stars)?;
        }

        let changes = ReviewChanges {
            stars: edit.stars,
            comment: non_blank(edit.comment),
        };
        self.reviews.update(id, changes).await?;

        info!(review_id = id, actor_id = principal.user_id, "Review updated");
        self.get_review(id).await
    }

    pub async fn delete_review(&self, principal: &Principal, id: i32) -> AppResult<()> {
        let review = self
            .reviews
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("review", "id", id))?;
        principal.require_owner_or_admin(review.user_id, "delete this review")?;

        self.reviews.delete(id).await?;
        info!(review_id = id, actor_id = principal.user_id, "Review deleted");
        Ok(())
    }
}
