use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{ReviewWithAuthor, User, MAX_STARS, MIN_STARS};
use crate::services::{ReviewDraft, ReviewEdit};

/// The author is always the caller; any `userId` in the body is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub restaurant_id: i32,
    #[validate(range(min = MIN_STARS, max = MAX_STARS, message = "Stars must be between 1 and 5."))]
    pub stars: i32,
    #[serde(default)]
    pub comment: Option<String>,
}

impl CreateReviewRequest {
    pub fn into_draft(self) -> ReviewDraft {
        ReviewDraft {
            restaurant_id: self.restaurant_id,
            stars: self.stars,
            comment: self.comment,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReviewRequest {
    #[serde(default)]
    pub review_id: Option<i32>,
    #[serde(default)]
    pub stars: Option<i32>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl UpdateReviewRequest {
    pub fn into_edit(self) -> ReviewEdit {
        ReviewEdit {
            review_id: self.review_id,
            stars: self.stars,
            comment: self.comment,
        }
    }
}

/// The public face of a review's author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewerResponse {
    pub user_id: i32,
    pub login: String,
}

impl From<User> for ReviewerResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            login: user.login,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub review_id: i32,
    pub restaurant_id: Option<i32>,
    pub stars: i32,
    pub comment: Option<String>,
    pub user: ReviewerResponse,
}

impl From<ReviewWithAuthor> for ReviewResponse {
    fn from(ReviewWithAuthor { review, author }: ReviewWithAuthor) -> Self {
        Self {
            review_id: review.id,
            restaurant_id: review.restaurant_id,
            stars: review.stars,
            comment: review.comment,
            user: author.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Review;

    #[test]
    fn test_create_review_ignores_user_id_in_body() {
        let request: CreateReviewRequest =
            serde_json::from_str(r#"{"restaurantId":3,"stars":4,"userId":99}"#).unwrap();
        let draft = request.into_draft();
        assert_eq!(draft.restaurant_id, 3);
        assert_eq!(draft.stars, 4);
    }

    #[test]
    fn test_create_review_stars_out_of_range() {
        for stars in [0, 6] {
            let request = CreateReviewRequest {
                restaurant_id: 1,
                stars,
                comment: None,
            };
            assert!(request.validate().is_err(), "stars={stars} should be rejected");
        }
    }

    #[test]
    fn test_review_response_hides_password_hash() {
        let joined = ReviewWithAuthor {
            review: Review {
                id: 5,
                user_id: 2,
                restaurant_id: None,
                stars: 3,
                comment: Some("fine".to_string()),
            },
            author: User {
                id: 2,
                login: "carol".to_string(),
                password_hash: "secret-hash".to_string(),
                is_admin: false,
            },
        };
        let json = serde_json::to_string(&ReviewResponse::from(joined)).unwrap();

        assert!(json.contains(r#""reviewId":5"#));
        assert!(json.contains(r#""restaurantId":null"#));
        assert!(json.contains(r#""login":"carol""#));
        assert!(!json.contains("secret-hash"));
    }
}
