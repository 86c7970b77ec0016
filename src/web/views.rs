//! Server-rendered pages.

use maud::{html, Markup, DOCTYPE};

use super::ranking::RankedRestaurant;
use super::session::Session;
use crate::api::dto::{CuisineResponse, RestaurantSummaryResponse, ReviewResponse};
use crate::models::{MAX_STARS, MIN_STARS};

fn layout(title: &str, session: Option<&Session>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " - Forkful" }
            }
            body {
                nav {
                    a href="/" { "Restaurants" } " | "
                    a href="/CuisineFilter" { "By cuisine" } " | "
                    a href="/Ranking" { "Ranking" } " | "
                    @if let Some(session) = session {
                        a href="/AddRestaurants" { "Add restaurant" } " | "
                        span class="who" { "Signed in as " (session.login) } " "
                        a href="/Authorization/Logout" { "Log out" }
                    } @else {
                        a href="/Authorization/Login" { "Log in" } " | "
                        a href="/Register/Register" { "Register" }
                    }
                }
                main {
                    h1 { (title) }
                    (content)
                }
            }
        }
    }
}

fn error_banner(error: Option<&str>) -> Markup {
    html! {
        @if let Some(message) = error {
            p class="error" role="alert" { (message) }
        }
    }
}

fn address_line(restaurant: &RestaurantSummaryResponse) -> String {
    restaurant
        .address
        .as_ref()
        .map(|address| {
            [&address.street, &address.number, &address.city]
                .into_iter()
                .flatten()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default()
}

fn restaurant_table(restaurants: &[RestaurantSummaryResponse], with_actions: bool) -> Markup {
    html! {
        table {
            thead {
                tr {
                    th { "Name" } th { "Cuisine" } th { "Address" }
                    @if with_actions { th {} }
                }
            }
            tbody {
                @for restaurant in restaurants {
                    tr {
                        td { (restaurant.restaurant_name) }
                        td {
                            @if let Some(cuisine) = &restaurant.cuisine { (cuisine.cuisine_name) }
                        }
                        td { (address_line(restaurant)) }
                        @if with_actions {
                            td {
                                a href={ "/RestaurantReviews?restaurantId=" (restaurant.restaurant_id) } { "Reviews" }
                                " "
                                a href={ "/AddReviews?restaurantId=" (restaurant.restaurant_id) } { "Add review" }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub fn restaurant_list(session: Option<&Session>, restaurants: &[RestaurantSummaryResponse], error: Option<&str>) -> Markup {
    layout(
        "Restaurants",
        session,
        html! {
            (error_banner(error))
            @if restaurants.is_empty() && error.is_none() {
                p { "No restaurants yet." }
            } @else {
                (restaurant_table(restaurants, true))
            }
        },
    )
}

pub fn login_page(error: Option<&str>) -> Markup {
    layout(
        "Log in",
        None,
        html! {
            (error_banner(error))
            form method="post" action="/Authorization/Login" {
                label { "Login " input type="text" name="login" required; }
                label { "Password " input type="password" name="password" required; }
                button type="submit" { "Log in" }
            }
        },
    )
}

pub fn register_page(error: Option<&str>) -> Markup {
    layout(
        "Register",
        None,
        html! {
            (error_banner(error))
            form method="post" action="/Register/Register" {
                label { "Login " input type="text" name="login" required; }
                label { "Password " input type="password" name="password" required; }
                button type="submit" { "Register" }
            }
        },
    )
}

pub fn add_restaurant_page(session: Option<&Session>, cuisines: &[CuisineResponse], error: Option<&str>) -> Markup {
    layout(
        "Add a restaurant",
        session,
        html! {
            (error_banner(error))
            @if session.is_some() {
                form method="post" action="/AddRestaurants" {
                    label { "Name " input type="text" name="name" required; }
                    label {
                        "Cuisine "
                        select name="cuisine_id" {
                            @for cuisine in cuisines {
                                option value=(cuisine.cuisine_id) { (cuisine.cuisine_name) }
                            }
                        }
                    }
                    label { "City " input type="text" name="city"; }
                    label { "Number " input type="text" name="number"; }
                    label { "Street " input type="text" name="street"; }
                    button type="submit" { "Add" }
                }
            }
        },
    )
}

pub fn add_review_page(session: Option<&Session>, restaurant_id: Option<i32>, error: Option<&str>) -> Markup {
    layout(
        "Add a review",
        session,
        html! {
            (error_banner(error))
            @if let (Some(_), Some(restaurant_id)) = (session, restaurant_id) {
                form method="post" action="/AddReviews" {
                    input type="hidden" name="restaurant_id" value=(restaurant_id);
                    label {
                        "Stars "
                        select name="stars" {
                            @for stars in MIN_STARS..=MAX_STARS {
                                option value=(stars) { (stars) }
                            }
                        }
                    }
                    label { "Comment " textarea name="comment" {} }
                    button type="submit" { "Post review" }
                }
            }
        },
    )
}

pub fn cuisine_filter_page(
    session: Option<&Session>,
    cuisines: &[CuisineResponse],
    selected: &str,
    restaurants: &[RestaurantSummaryResponse],
    error: Option<&str>,
) -> Markup {
    layout(
        "Restaurants by cuisine",
        session,
        html! {
            form method="get" action="/CuisineFilter" {
                label { "Cuisine " input type="text" name="cuisine" value=(selected); }
                button type="submit" { "Filter" }
            }
            @if !cuisines.is_empty() {
                ul class="cuisines" {
                    @for cuisine in cuisines {
                        li {
                            a href={ "/CuisineFilter/FilterByCuisineId?cuisineId=" (cuisine.cuisine_id) } { (cuisine.cuisine_name) }
                        }
                    }
                }
            }
            (error_banner(error))
            @if error.is_none() {
                @if restaurants.is_empty() {
                    p { "No restaurants match this cuisine." }
                } @else {
                    (restaurant_table(restaurants, true))
                }
            }
        },
    )
}

pub fn ranking_page(session: Option<&Session>, ranked: &[RankedRestaurant], error: Option<&str>) -> Markup {
    layout(
        "Ranking",
        session,
        html! {
            (error_banner(error))
            @if error.is_none() {
                ol class="ranking" {
                    @for entry in ranked {
                        li {
                            a href={ "/RestaurantReviews?restaurantId=" (entry.restaurant.restaurant_id) } {
                                (entry.restaurant.restaurant_name)
                            }
                            " " span class="average" { (format!("{:.2}", entry.average_stars)) }
                            " (" (entry.review_count) " reviews)"
                        }
                    }
                }
            }
        },
    )
}

pub fn restaurant_reviews_page(
    session: Option<&Session>,
    restaurant_name: Option<&str>,
    reviews: &[ReviewResponse],
    message: Option<&str>,
) -> Markup {
    let title = match restaurant_name {
        Some(name) => format!("Reviews of {name}"),
        None => "Reviews".to_string(),
    };
    layout(
        &title,
        session,
        html! {
            @if let Some(message) = message {
                p class="notice" { (message) }
            }
            @if !reviews.is_empty() {
                ul class="reviews" {
                    @for review in reviews {
                        li {
                            strong { (review.user.login) }
                            " " span class="stars" { (review.stars) "/" (MAX_STARS) }
                            @if let Some(comment) = &review.comment {
                                p { (comment) }
                            }
                        }
                    }
                }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::{AddressResponse, ReviewerResponse};

    #[test]
    fn test_address_line_skips_missing_parts() {
        let restaurant = RestaurantSummaryResponse {
            restaurant_id: 1,
            restaurant_name: "Noodle Bar".to_string(),
            cuisine: None,
            address: Some(AddressResponse {
                address_id: 1,
                city: Some("Oslo".to_string()),
                number: None,
                street: Some("Storgata".to_string()),
            }),
        };
        assert_eq!(address_line(&restaurant), "Storgata, Oslo");
    }

    #[test]
    fn test_user_content_is_escaped() {
        let reviews = vec![ReviewResponse {
            review_id: 1,
            restaurant_id: Some(1),
            stars: 4,
            comment: Some("<script>alert(1)</script>".to_string()),
            user: ReviewerResponse {
                user_id: 1,
                login: "frank".to_string(),
            },
        }];
        let page = restaurant_reviews_page(None, Some("Noodle Bar"), &reviews, None).into_string();

        assert!(page.contains("Reviews of Noodle Bar"));
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script>"));
    }

    #[test]
    fn test_login_page_shows_error() {
        let page = login_page(Some("Invalid login or password.")).into_string();
        assert!(page.contains("Invalid login or password."));
        assert!(page.contains(r#"action="/Authorization/Login""#));
    }
}
