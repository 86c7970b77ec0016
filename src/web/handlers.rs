//! Page handlers. Each one is a thin HTTP client of the REST API.

use axum::{
    extract::{Form, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use futures::future::join_all;
use maud::Markup;
use serde::Deserialize;
use tracing::{info, warn};

use super::ranking::{filter_by_cuisine_name, rank_by_average_stars};
use super::session::Session;
use super::views;
use super::WebState;
use crate::api::dto::{AddressRequest, CreateRestaurantRequest, CreateReviewRequest};

const INVALID_LOGIN: &str = "Invalid login or password.";
const REGISTRATION_FAILED: &str = "Registration failed. The login may already be taken.";
const LOGIN_REQUIRED_RESTAURANT: &str = "You must be logged in to add a restaurant.";
const LOGIN_REQUIRED_REVIEW: &str = "You must be logged in to add a review.";
const REVIEW_NOT_ADDED: &str = "The review could not be added.";

fn render(markup: Markup) -> Response {
    Html(markup.into_string()).into_response()
}

pub async fn index(State(state): State<WebState>, jar: PrivateCookieJar) -> Response {
    let session = Session::from_jar(&jar);
    match state.api.restaurants().await {
        Ok(restaurants) => render(views::restaurant_list(session.as_ref(), &restaurants, None)),
        Err(e) => {
            let message = e.user_message("The restaurant list could not be loaded.");
            render(views::restaurant_list(session.as_ref(), &[], Some(&message)))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub password: String,
}

pub async fn login_form() -> Response {
    render(views::login_page(None))
}

pub async fn login(
    State(state): State<WebState>,
    jar: PrivateCookieJar,
    Form(form): Form<CredentialsForm>,
) -> Response {
    match state.api.login(&form.login, &form.password).await {
        Ok(response) => {
            let session = Session::from(response);
            info!(user_id = session.user_id, "Web session started");
            let jar = session.store(jar, state.secure_cookies);
            (jar, Redirect::to("/")).into_response()
        }
        Err(e) => render(views::login_page(Some(&e.user_message(INVALID_LOGIN)))),
    }
}

pub async fn logout(jar: PrivateCookieJar) -> Response {
    (Session::clear(jar), Redirect::to("/Authorization/Login")).into_response()
}

pub async fn register_form() -> Response {
    render(views::register_page(None))
}

pub async fn register(State(state): State<WebState>, Form(form): Form<CredentialsForm>) -> Response {
    match state.api.register(&form.login, &form.password).await {
        Ok(_) => Redirect::to("/Authorization/Login").into_response(),
        Err(e) => render(views::register_page(Some(&e.user_message(REGISTRATION_FAILED)))),
    }
}

pub async fn add_restaurant_form(State(state): State<WebState>, jar: PrivateCookieJar) -> Response {
    let Some(session) = Session::from_jar(&jar) else {
        return render(views::add_restaurant_page(None, &[], Some(LOGIN_REQUIRED_RESTAURANT)));
    };

    match state.api.cuisines().await {
        Ok(cuisines) => render(views::add_restaurant_page(Some(&session), &cuisines, None)),
        Err(e) => {
            let message = e.user_message("The cuisine list could not be loaded.");
            render(views::add_restaurant_page(Some(&session), &[], Some(&message)))
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddRestaurantForm {
    #[serde(default)]
    pub name: String,
    /// Kept as text: an empty select submits `""`.
    #[serde(default)]
    pub cuisine_id: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub street: String,
}

impl AddRestaurantForm {
    fn into_request(self) -> CreateRestaurantRequest {
        CreateRestaurantRequest {
            restaurant_name: Some(self.name),
            cuisine_id: self.cuisine_id.trim().parse().ok(),
            address: Some(AddressRequest {
                address_id: None,
                city: Some(self.city),
                number: Some(self.number),
                street: Some(self.street),
            }),
        }
    }
}

pub async fn add_restaurant(
    State(state): State<WebState>,
    jar: PrivateCookieJar,
    Form(form): Form<AddRestaurantForm>,
) -> Response {
    let Some(session) = Session::from_jar(&jar) else {
        return render(views::add_restaurant_page(None, &[], Some(LOGIN_REQUIRED_RESTAURANT)));
    };

    match state.api.create_restaurant(&session.token, &form.into_request()).await {
        Ok(_) => Redirect::to("/").into_response(),
        Err(e) => {
            warn!(user_id = session.user_id, error = %e, "Adding restaurant failed");
            let cuisines = state.api.cuisines().await.unwrap_or_default();
            let message = e.user_message("The restaurant could not be added.");
            render(views::add_restaurant_page(Some(&session), &cuisines, Some(&message)))
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RestaurantQuery {
    #[serde(rename = "restaurantId")]
    pub restaurant_id: Option<i32>,
}

pub async fn add_review_form(jar: PrivateCookieJar, Query(query): Query<RestaurantQuery>) -> Response {
    let session = Session::from_jar(&jar);
    let error = if session.is_none() {
        Some(LOGIN_REQUIRED_REVIEW)
    } else if query.restaurant_id.is_none() {
        Some("Choose a restaurant to review.")
    } else {
        None
    };
    render(views::add_review_page(session.as_ref(), query.restaurant_id, error))
}

/// Fields stay text so a tampered or empty form still renders the page.
#[derive(Debug, Default, Deserialize)]
pub struct AddReviewForm {
    #[serde(default)]
    pub restaurant_id: String,
    #[serde(default)]
    pub stars: String,
    #[serde(default)]
    pub comment: String,
}

impl AddReviewForm {
    fn restaurant_id(&self) -> Option<i32> {
        self.restaurant_id.trim().parse().ok()
    }

    /// `None` when the restaurant id or the star count is not a number.
    fn into_request(self) -> Option<CreateReviewRequest> {
        Some(CreateReviewRequest {
            restaurant_id: self.restaurant_id()?,
            stars: self.stars.trim().parse().ok()?,
            comment: Some(self.comment),
        })
    }
}

pub async fn add_review(
    State(state): State<WebState>,
    jar: PrivateCookieJar,
    Form(form): Form<AddReviewForm>,
) -> Response {
    let Some(session) = Session::from_jar(&jar) else {
        return render(views::add_review_page(None, None, Some(LOGIN_REQUIRED_REVIEW)));
    };

    let restaurant_id = form.restaurant_id();
    let Some(request) = form.into_request() else {
        warn!(user_id = session.user_id, "Review form carried non-numeric fields");
        return render(views::add_review_page(Some(&session), restaurant_id, Some(REVIEW_NOT_ADDED)));
    };

    match state.api.create_review(&session.token, &request).await {
        Ok(_) => Redirect::to(&format!("/RestaurantReviews?restaurantId={}", request.restaurant_id)).into_response(),
        Err(e) => {
            let message = e.user_message(REVIEW_NOT_ADDED);
            render(views::add_review_page(Some(&session), restaurant_id, Some(&message)))
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct CuisineNameQuery {
    #[serde(default)]
    pub cuisine: String,
}

pub async fn cuisine_filter(
    State(state): State<WebState>,
    jar: PrivateCookieJar,
    Query(query): Query<CuisineNameQuery>,
) -> Response {
    let session = Session::from_jar(&jar);
    render_cuisine_filter(&state, session.as_ref(), &query.cuisine).await
}

#[derive(Debug, Default, Deserialize)]
pub struct CuisineIdQuery {
    #[serde(rename = "cuisineId")]
    pub cuisine_id: Option<i32>,
}

/// Resolves the cuisine name by id, then filters exactly like `/CuisineFilter`.
pub async fn filter_by_cuisine_id(
    State(state): State<WebState>,
    jar: PrivateCookieJar,
    Query(query): Query<CuisineIdQuery>,
) -> Response {
    let session = Session::from_jar(&jar);
    let Some(cuisine_id) = query.cuisine_id else {
        return render_cuisine_filter(&state, session.as_ref(), "").await;
    };

    match state.api.cuisine(cuisine_id).await {
        Ok(cuisine) => render_cuisine_filter(&state, session.as_ref(), &cuisine.cuisine_name).await,
        Err(e) => {
            let message = e.user_message("Cuisine not found.");
            let cuisines = state.api.cuisines().await.unwrap_or_default();
            render(views::cuisine_filter_page(session.as_ref(), &cuisines, "", &[], Some(&message)))
        }
    }
}

async fn render_cuisine_filter(state: &WebState, session: Option<&Session>, cuisine_name: &str) -> Response {
    let (restaurants, cuisines) = tokio::join!(state.api.restaurants(), state.api.cuisines());
    let cuisines = cuisines.unwrap_or_default();

    match restaurants {
        Ok(restaurants) => {
            let filtered = filter_by_cuisine_name(restaurants, cuisine_name);
            render(views::cuisine_filter_page(session, &cuisines, cuisine_name, &filtered, None))
        }
        Err(e) => {
            let message = e.user_message("The restaurant list could not be loaded.");
            render(views::cuisine_filter_page(session, &cuisines, cuisine_name, &[], Some(&message)))
        }
    }
}

pub async fn ranking(State(state): State<WebState>, jar: PrivateCookieJar) -> Response {
    let session = Session::from_jar(&jar);

    let restaurants = match state.api.restaurants().await {
        Ok(restaurants) => restaurants,
        Err(e) => {
            let message = e.user_message("The ranking could not be computed.");
            return render(views::ranking_page(session.as_ref(), &[], Some(&message)));
        }
    };

    let lookups = restaurants
        .iter()
        .map(|restaurant| state.api.restaurant_reviews(restaurant.restaurant_id));
    let results = join_all(lookups).await;

    let mut entries = Vec::with_capacity(restaurants.len());
    for (restaurant, result) in restaurants.into_iter().zip(results) {
        match result {
            Ok(reviews) => entries.push((restaurant, reviews)),
            // Deleted between the two calls.
            Err(e) if e.is_not_found() => continue,
            Err(e) => {
                let message = e.user_message("The ranking could not be computed.");
                return render(views::ranking_page(session.as_ref(), &[], Some(&message)));
            }
        }
    }

    let ranked = rank_by_average_stars(entries);
    render(views::ranking_page(session.as_ref(), &ranked, None))
}

pub async fn restaurant_reviews(
    State(state): State<WebState>,
    jar: PrivateCookieJar,
    Query(query): Query<RestaurantQuery>,
) -> Response {
    let session = Session::from_jar(&jar);
    let Some(restaurant_id) = query.restaurant_id else {
        return render(views::restaurant_reviews_page(
            session.as_ref(),
            None,
            &[],
            Some("Choose a restaurant to see its reviews."),
        ));
    };

    match state.api.restaurant(restaurant_id).await {
        Ok(detail) => {
            let message = detail.reviews.is_empty().then_some("No reviews yet.");
            render(views::restaurant_reviews_page(
                session.as_ref(),
                Some(&detail.summary.restaurant_name),
                &detail.reviews,
                message,
            ))
        }
        Err(e) if e.is_not_found() => render(views::restaurant_reviews_page(
            session.as_ref(),
            None,
            &[],
            Some("Restaurant not found."),
        )),
        Err(e) => {
            let message = e.user_message("The reviews could not be loaded.");
            render(views::restaurant_reviews_page(session.as_ref(), None, &[], Some(&message)))
        }
    }
}
