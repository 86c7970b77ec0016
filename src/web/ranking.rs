//! Views derived in the frontend from plain API data.

use std::cmp::Ordering;

use crate::api::dto::{RestaurantSummaryResponse, ReviewResponse};

/// A restaurant with its mean rating.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedRestaurant {
    pub restaurant: RestaurantSummaryResponse,
    pub average_stars: f64,
    pub review_count: usize,
}

/// Mean stars; a restaurant without reviews averages 0.
pub fn average_stars(reviews: &[ReviewResponse]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let total: i64 = reviews.iter().map(|r| i64::from(r.stars)).sum();
    total as f64 / reviews.len() as f64
}

/// Sorts by average stars, highest first. Ties keep their input order.
pub fn rank_by_average_stars(
    entries: Vec<(RestaurantSummaryResponse, Vec<ReviewResponse>)>,
) -> Vec<RankedRestaurant> {
    let mut ranked: Vec<RankedRestaurant> = entries
        .into_iter()
        .map(|(restaurant, reviews)| RankedRestaurant {
            average_stars: average_stars(&reviews),
            review_count: reviews.len(),
            restaurant,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.average_stars
            .partial_cmp(&a.average_stars)
            .unwrap_or(Ordering::Equal)
    });
    ranked
}

/// Keeps restaurants whose cuisine name matches, ignoring case and
/// surrounding whitespace. A blank name keeps everything.
pub fn filter_by_cuisine_name(
    restaurants: Vec<RestaurantSummaryResponse>,
    cuisine_name: &str,
) -> Vec<RestaurantSummaryResponse> {
    let wanted = cuisine_name.trim().to_lowercase();
    if wanted.is_empty() {
        return restaurants;
    }

    restaurants
        .into_iter()
        .filter(|restaurant| {
            restaurant
                .cuisine
                .as_ref()
                .is_some_and(|cuisine| cuisine.cuisine_name.trim().to_lowercase() == wanted)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::{CuisineResponse, ReviewerResponse};
    use proptest::prelude::*;

    fn restaurant(id: i32, cuisine: Option<&str>) -> RestaurantSummaryResponse {
        RestaurantSummaryResponse {
            restaurant_id: id,
            restaurant_name: format!("Restaurant {id}"),
            cuisine: cuisine.map(|name| CuisineResponse {
                cuisine_id: 1,
                cuisine_name: name.to_string(),
            }),
            address: None,
        }
    }

    fn review(stars: i32) -> ReviewResponse {
        ReviewResponse {
            review_id: 1,
            restaurant_id: Some(1),
            stars,
            comment: None,
            user: ReviewerResponse {
                user_id: 1,
                login: "eve".to_string(),
            },
        }
    }

    #[test]
    fn test_average_of_no_reviews_is_zero() {
        assert_eq!(average_stars(&[]), 0.0);
    }

    #[test]
    fn test_average_stars() {
        assert_eq!(average_stars(&[review(4), review(5)]), 4.5);
    }

    #[test]
    fn test_unreviewed_restaurant_ranks_below_reviewed() {
        let ranked = rank_by_average_stars(vec![
            (restaurant(1, None), vec![]),
            (restaurant(2, None), vec![review(1)]),
            (restaurant(3, None), vec![review(5), review(3)]),
        ]);

        let order: Vec<i32> = ranked.iter().map(|r| r.restaurant.restaurant_id).collect();
        assert_eq!(order, vec![3, 2, 1]);
        assert_eq!(ranked[2].average_stars, 0.0);
        assert_eq!(ranked[2].review_count, 0);
    }

    #[test]
    fn test_filter_by_cuisine_name_ignores_case() {
        let restaurants = vec![
            restaurant(1, Some("Italian")),
            restaurant(2, Some("Thai")),
            restaurant(3, None),
            restaurant(4, Some("ITALIAN")),
        ];

        let filtered = filter_by_cuisine_name(restaurants, " italian ");
        let ids: Vec<i32> = filtered.iter().map(|r| r.restaurant_id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_blank_filter_keeps_everything() {
        let restaurants = vec![restaurant(1, Some("Thai")), restaurant(2, None)];
        assert_eq!(filter_by_cuisine_name(restaurants, "  ").len(), 2);
    }

    proptest! {
        #[test]
        fn test_ranking_is_sorted_descending(
            star_lists in prop::collection::vec(prop::collection::vec(1i32..=5, 0..6), 0..12)
        ) {
            let entries = star_lists
                .into_iter()
                .enumerate()
                .map(|(i, stars)| (restaurant(i as i32, None), stars.into_iter().map(review).collect()))
                .collect();

            let ranked = rank_by_average_stars(entries);
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].average_stars >= pair[1].average_stars);
            }
            for entry in &ranked {
                prop_assert!(entry.review_count > 0 || entry.average_stars == 0.0);
                prop_assert!(entry.average_stars == 0.0 || entry.average_stars >= 1.0);
            }
        }
    }
}
