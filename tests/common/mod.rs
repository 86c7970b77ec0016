//! Shared fixtures for the HTTP-level tests.
//!
//! `MemoryStore` implements every repository trait over plain maps and
//! follows the same foreign-key rules as the migration:
//! - deleting a cuisine nulls `restaurants.cuisine_id`
//! - deleting a restaurant removes its address and nulls `reviews.restaurant_id`
//! - deleting a user removes their reviews
//! - logins are unique case-insensitively

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use axum::http::{header, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

use forkful::api::create_router;
use forkful::config::JwtConfig;
use forkful::error::AppError;
use forkful::models::{
    Address, AddressChanges, Cuisine, NewAddress, NewCuisine, NewRestaurant, NewReview, NewUser,
    Restaurant, RestaurantChanges, RestaurantRecord, Review, ReviewChanges, ReviewWithAuthor,
    UpdateUser, User,
};
use forkful::repositories::{
    CuisineRepository, Repositories, RestaurantRepository, ReviewRepository, UserRepository,
};
use forkful::utils::password::hash_password;
use forkful::AppState;

pub const ADMIN_LOGIN: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin-password";

#[derive(Default)]
struct Tables {
    next_id: i32,
    users: BTreeMap<i32, User>,
    cuisines: BTreeMap<i32, Cuisine>,
    restaurants: BTreeMap<i32, Restaurant>,
    addresses: BTreeMap<i32, Address>,
    reviews: BTreeMap<i32, Review>,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn login_taken(&self, login: &str, except: Option<i32>) -> bool {
        let login = login.to_lowercase();
        self.users
            .values()
            .any(|u| Some(u.id) != except && u.login.to_lowercase() == login)
    }

    fn record(&self, restaurant: &Restaurant) -> RestaurantRecord {
        RestaurantRecord {
            restaurant: restaurant.clone(),
            cuisine: restaurant
                .cuisine_id
                .and_then(|id| self.cuisines.get(&id).cloned()),
            address: self
                .addresses
                .values()
                .find(|a| a.restaurant_id == restaurant.id)
                .cloned(),
        }
    }

    fn with_author(&self, review: &Review) -> Option<ReviewWithAuthor> {
        self.users.get(&review.user_id).map(|author| ReviewWithAuthor {
            review: review.clone(),
            author: author.clone(),
        })
    }

    fn insert_address(&mut self, restaurant_id: i32, fields: AddressChanges) {
        let new = NewAddress::for_restaurant(restaurant_id, fields);
        let id = self.next_id();
        self.addresses.insert(
            id,
            Address {
                id,
                restaurant_id: new.restaurant_id,
                city: new.city,
                number: new.number,
                street: new.street,
            },
        );
    }
}

/// Row-missing error shaped like the diesel `NotFound` conversion.
fn missing_row() -> AppError {
    AppError::not_found("resource", "id", "unknown")
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("memory store poisoned")
    }

    pub fn repositories(&self) -> Repositories {
        Repositories {
            users: Arc::new(self.clone()),
            cuisines: Arc::new(self.clone()),
            restaurants: Arc::new(self.clone()),
            reviews: Arc::new(self.clone()),
        }
    }

    /// Inserts a user with an argon2 hash, bypassing the API.
    pub fn seed_user(&self, login: &str, password: &str, is_admin: bool) -> User {
        let mut tables = self.lock();
        let id = tables.next_id();
        let user = User {
            id,
            login: login.to_string(),
            password_hash: hash_password(password).expect("hash password"),
            is_admin,
        };
        tables.users.insert(id, user.clone());
        user
    }

    pub fn address_count(&self) -> usize {
        self.lock().addresses.len()
    }

    pub fn review_count(&self) -> usize {
        self.lock().reviews.len()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut tables = self.lock();
        if tables.login_taken(&new_user.login, None) {
            return Err(AppError::Duplicate {
                entity: "user".to_string(),
                field: "login".to_string(),
                value: new_user.login,
            });
        }
        let id = tables.next_id();
        let user = User {
            id,
            login: new_user.login,
            password_hash: new_user.password_hash,
            is_admin: new_user.is_admin,
        };
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, user_id: i32) -> Result<Option<User>, AppError> {
        Ok(self.lock().users.get(&user_id).cloned())
    }

    async fn find_by_login(&self, user_login: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|u| u.login == user_login)
            .cloned())
    }

    async fn login_taken(&self, user_login: &str, except: Option<i32>) -> Result<bool, AppError> {
        Ok(self.lock().login_taken(user_login, except))
    }

    async fn list_all(&self) -> Result<Vec<User>, AppError> {
        Ok(self.lock().users.values().cloned().collect())
    }

    async fn update(&self, user_id: i32, update_data: UpdateUser) -> Result<User, AppError> {
        let mut tables = self.lock();
        if let Some(login) = &update_data.login
            && tables.login_taken(login, Some(user_id))
        {
            return Err(AppError::Duplicate {
                entity: "user".to_string(),
                field: "login".to_string(),
                value: login.clone(),
            });
        }

        let user = tables.users.get_mut(&user_id).ok_or_else(missing_row)?;
        if let Some(login) = update_data.login {
            user.login = login;
        }
        if let Some(hash) = update_data.password_hash {
            user.password_hash = hash;
        }
        if let Some(is_admin) = update_data.is_admin {
            user.is_admin = is_admin;
        }
        Ok(user.clone())
    }

    async fn delete(&self, user_id: i32) -> Result<bool, AppError> {
        let mut tables = self.lock();
        let removed = tables.users.remove(&user_id).is_some();
        tables.reviews.retain(|_, r| r.user_id != user_id);
        Ok(removed)
    }
}

#[async_trait]
impl CuisineRepository for MemoryStore {
    async fn create(&self, new_cuisine: NewCuisine) -> Result<Cuisine, AppError> {
        let mut tables = self.lock();
        let id = tables.next_id();
        let cuisine = Cuisine {
            id,
            name: new_cuisine.name,
        };
        tables.cuisines.insert(id, cuisine.clone());
        Ok(cuisine)
    }

    async fn find_by_id(&self, cuisine_id: i32) -> Result<Option<Cuisine>, AppError> {
        Ok(self.lock().cuisines.get(&cuisine_id).cloned())
    }

    async fn name_taken(&self, cuisine_name: &str) -> Result<bool, AppError> {
        let name = cuisine_name.to_lowercase();
        Ok(self
            .lock()
            .cuisines
            .values()
            .any(|c| c.name.to_lowercase() == name))
    }

    async fn list_all(&self) -> Result<Vec<Cuisine>, AppError> {
        Ok(self.lock().cuisines.values().cloned().collect())
    }

    async fn delete(&self, cuisine_id: i32) -> Result<bool, AppError> {
        let mut tables = self.lock();
        let removed = tables.cuisines.remove(&cuisine_id).is_some();
        for restaurant in tables.restaurants.values_mut() {
            if restaurant.cuisine_id == Some(cuisine_id) {
                restaurant.cuisine_id = None;
            }
        }
        Ok(removed)
    }
}

#[async_trait]
impl RestaurantRepository for MemoryStore {
    async fn create(
        &self,
        new_restaurant: NewRestaurant,
        address: Option<AddressChanges>,
    ) -> Result<Restaurant, AppError> {
        let mut tables = self.lock();
        let id = tables.next_id();
        let restaurant = Restaurant {
            id,
            name: new_restaurant.name,
            cuisine_id: new_restaurant.cuisine_id,
        };
        tables.restaurants.insert(id, restaurant.clone());
        if let Some(fields) = address {
            tables.insert_address(id, fields);
        }
        Ok(restaurant)
    }

    async fn find_by_id(&self, restaurant_id: i32) -> Result<Option<Restaurant>, AppError> {
        Ok(self.lock().restaurants.get(&restaurant_id).cloned())
    }

    async fn find_record(&self, restaurant_id: i32) -> Result<Option<RestaurantRecord>, AppError> {
        let tables = self.lock();
        Ok(tables
            .restaurants
            .get(&restaurant_id)
            .map(|r| tables.record(r)))
    }

    async fn list_records(&self) -> Result<Vec<RestaurantRecord>, AppError> {
        let tables = self.lock();
        Ok(tables.restaurants.values().map(|r| tables.record(r)).collect())
    }

    async fn list_records_by_cuisine(
        &self,
        cuisine_id: i32,
    ) -> Result<Vec<RestaurantRecord>, AppError> {
        let tables = self.lock();
        Ok(tables
            .restaurants
            .values()
            .filter(|r| r.cuisine_id == Some(cuisine_id))
            .map(|r| tables.record(r))
            .collect())
    }

    async fn update(
        &self,
        restaurant_id: i32,
        changes: RestaurantChanges,
        address: Option<AddressChanges>,
    ) -> Result<(), AppError> {
        let mut tables = self.lock();
        let restaurant = tables
            .restaurants
            .get_mut(&restaurant_id)
            .ok_or_else(missing_row)?;
        if let Some(name) = changes.name {
            restaurant.name = name;
        }
        if let Some(cuisine_id) = changes.cuisine_id {
            restaurant.cuisine_id = cuisine_id;
        }

        if let Some(fields) = address {
            let existing = tables
                .addresses
                .values()
                .find(|a| a.restaurant_id == restaurant_id)
                .map(|a| a.id);
            match existing.and_then(|id| tables.addresses.get_mut(&id)) {
                Some(existing) => {
                    if let Some(city) = fields.city {
                        existing.city = Some(city);
                    }
                    if let Some(number) = fields.number {
                        existing.number = Some(number);
                    }
                    if let Some(street) = fields.street {
                        existing.street = Some(street);
                    }
                }
                None => tables.insert_address(restaurant_id, fields),
            }
        }
        Ok(())
    }

    async fn delete(&self, restaurant_id: i32) -> Result<bool, AppError> {
        let mut tables = self.lock();
        let removed = tables.restaurants.remove(&restaurant_id).is_some();
        tables.addresses.retain(|_, a| a.restaurant_id != restaurant_id);
        for review in tables.reviews.values_mut() {
            if review.restaurant_id == Some(restaurant_id) {
                review.restaurant_id = None;
            }
        }
        Ok(removed)
    }
}

#[async_trait]
impl ReviewRepository for MemoryStore {
    async fn create(&self, new_review: NewReview) -> Result<Review, AppError> {
        let mut tables = self.lock();
        let id = tables.next_id();
        let review = Review {
            id,
            user_id: new_review.user_id,
            restaurant_id: new_review.restaurant_id,
            stars: new_review.stars,
            comment: new_review.comment,
        };
        tables.reviews.insert(id, review.clone());
        Ok(review)
    }

    async fn find_by_id(&self, review_id: i32) -> Result<Option<Review>, AppError> {
        Ok(self.lock().reviews.get(&review_id).cloned())
    }

    async fn find_with_author(&self, review_id: i32) -> Result<Option<ReviewWithAuthor>, AppError> {
        let tables = self.lock();
        Ok(tables
            .reviews
            .get(&review_id)
            .and_then(|r| tables.with_author(r)))
    }

    async fn list_with_authors(&self) -> Result<Vec<ReviewWithAuthor>, AppError> {
        let tables = self.lock();
        Ok(tables
            .reviews
            .values()
            .filter_map(|r| tables.with_author(r))
            .collect())
    }

    async fn list_for_restaurant(
        &self,
        restaurant_id: i32,
    ) -> Result<Vec<ReviewWithAuthor>, AppError> {
        let tables = self.lock();
        Ok(tables
            .reviews
            .values()
            .filter(|r| r.restaurant_id == Some(restaurant_id))
            .filter_map(|r| tables.with_author(r))
            .collect())
    }

    async fn update(&self, review_id: i32, changes: ReviewChanges) -> Result<Review, AppError> {
        let mut tables = self.lock();
        let review = tables.reviews.get_mut(&review_id).ok_or_else(missing_row)?;
        if let Some(stars) = changes.stars {
            review.stars = stars;
        }
        if let Some(comment) = changes.comment {
            review.comment = Some(comment);
        }
        Ok(review.clone())
    }

    async fn delete(&self, review_id: i32) -> Result<bool, AppError> {
        Ok(self.lock().reviews.remove(&review_id).is_some())
    }
}

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "forkful-test-secret-0123456789abcdef".to_string(),
        ..JwtConfig::default()
    }
}

pub fn app_state(store: &MemoryStore) -> AppState {
    AppState::from_repositories(store.repositories(), jwt_config())
}

/// API under test plus direct access to its store.
pub struct TestApp {
    pub server: TestServer,
    pub store: MemoryStore,
}

impl TestApp {
    /// Fresh API with a seeded administrator account.
    pub fn new() -> Self {
        let store = MemoryStore::new();
        store.seed_user(ADMIN_LOGIN, ADMIN_PASSWORD, true);
        let server = TestServer::new(create_router(app_state(&store))).expect("test server");
        Self { server, store }
    }

    pub async fn register(&self, login: &str, password: &str) {
        self.server
            .post("/api/Auth/register")
            .json(&json!({ "login": login, "password": password }))
            .await
            .assert_status_ok();
    }

    pub async fn login(&self, login: &str, password: &str) -> Value {
        let response = self
            .server
            .post("/api/Auth/login")
            .json(&json!({ "login": login, "password": password }))
            .await;
        response.assert_status_ok();
        response.json()
    }

    pub async fn token_for(&self, login: &str, password: &str) -> String {
        self.login(login, password).await["token"]
            .as_str()
            .expect("token")
            .to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.token_for(ADMIN_LOGIN, ADMIN_PASSWORD).await
    }

    /// Registers a regular user and returns (user id, token).
    pub async fn user(&self, login: &str) -> (i64, String) {
        self.register(login, "secret-pass").await;
        let body = self.login(login, "secret-pass").await;
        (
            body["userId"].as_i64().expect("userId"),
            body["token"].as_str().expect("token").to_string(),
        )
    }

    pub async fn cuisine(&self, token: &str, name: &str) -> i64 {
        let response = self
            .server
            .post("/api/Cuisines")
            .add_header(header::AUTHORIZATION, bearer(token))
            .json(&json!({ "cuisineName": name }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<Value>()["cuisineId"]
            .as_i64()
            .expect("cuisineId")
    }

    pub async fn restaurant(&self, token: &str, body: Value) -> Value {
        let response = self
            .server
            .post("/api/Restaurants")
            .add_header(header::AUTHORIZATION, bearer(token))
            .json(&body)
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json()
    }

    pub async fn review(&self, token: &str, restaurant_id: i64, stars: i32) -> Value {
        let response = self
            .server
            .post("/api/Reviews")
            .add_header(header::AUTHORIZATION, bearer(token))
            .json(&json!({ "restaurantId": restaurant_id, "stars": stars, "comment": "Tasty" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json()
    }
}

pub fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {token}")).expect("header value")
}
