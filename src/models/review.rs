use diesel::prelude::*;

use super::User;
use crate::error::{AppError, AppResult};

pub const MIN_STARS: i32 = 1;
pub const MAX_STARS: i32 = 5;

/// Rejects star ratings outside the inclusive 1..=5 range.
pub fn check_stars(stars: i32) -> AppResult<()> {
    if (MIN_STARS..=MAX_STARS).contains(&stars) {
        Ok(())
    } else {
        Err(AppError::Validation {
            field: "stars".to_string(),
            reason: "Stars must be between 1 and 5.".to_string(),
        })
    }
}

#[derive(Debug, Queryable, Selectable, Identifiable, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Review {
    pub id: i32,
    pub user_id: i32,
    pub restaurant_id: Option<i32>,
    pub stars: i32,
    pub comment: Option<String>,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::reviews)]
pub struct NewReview {
    pub user_id: i32,
    pub restaurant_id: Option<i32>,
    pub stars: i32,
    pub comment: Option<String>,
}

#[derive(Debug, AsChangeset, Clone, Default, PartialEq, Eq)]
#[diesel(table_name = crate::schema::reviews)]
pub struct ReviewChanges {
    pub stars: Option<i32>,
    pub comment: Option<String>,
}

impl ReviewChanges {
    pub fn is_empty(&self) -> bool {
        self.stars.is_none() && self.comment.is_none()
    }
}

/// A review joined with the user who wrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewWithAuthor {
    pub review: Review,
    pub author: User,
}

impl From<(Review, User)> for ReviewWithAuthor {
    fn from((review, author): (Review, User)) -> Self {
        Self { review, author }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_stars_accepts_bounds() {
        assert!(check_stars(1).is_ok());
        assert!(check_stars(3).is_ok());
        assert!(check_stars(5).is_ok());
    }

    #[test]
    fn test_check_stars_rejects_out_of_range() {
        for stars in [-1, 0, 6, 100] {
            match check_stars(stars) {
                Err(AppError::Validation { field, reason }) => {
                    assert_eq!(field, "stars");
                    assert_eq!(reason, "Stars must be between 1 and 5.");
                }
                other => panic!("expected validation error for {stars}, got {other:?}"),
            }
        }
    }
}
