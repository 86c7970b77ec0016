//! Restaurant service.
//!
//! Owns the create and edit flows that keep a restaurant, its cuisine link
//! and its address consistent.

use std::sync::Arc;

use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{AddressChanges, NewRestaurant, RestaurantChanges, RestaurantDetail, RestaurantRecord};
use crate::repositories::{CuisineRepository, RestaurantRepository, ReviewRepository};
use crate::utils::validate::non_blank;

/// Input for creating a restaurant.
#[derive(Debug, Clone, Default)]
pub struct RestaurantDraft {
    pub name: Option<String>,
    pub cuisine_id: Option<i32>,
    pub address: Option<AddressChanges>,
}

/// Partial restaurant edit.
#[derive(Debug, Clone, Default)]
pub struct RestaurantEdit {
    pub restaurant_id: i32,
    pub name: Option<String>,
    /// `None` keeps the cuisine, `Some(None)` clears it.
    pub cuisine_id: Option<Option<i32>>,
    pub address: Option<AddressChanges>,
}

#[derive(Clone)]
pub struct RestaurantService {
    restaurants: Arc<dyn RestaurantRepository>,
    cuisines: Arc<dyn CuisineRepository>,
    reviews: Arc<dyn ReviewRepository>,
}

impl RestaurantService {
    pub fn new(
        restaurants: Arc<dyn RestaurantRepository>,
        cuisines: Arc<dyn CuisineRepository>,
        reviews: Arc<dyn ReviewRepository>,
    ) -> Self {
        Self {
            restaurants,
            cuisines,
            reviews,
        }
    }

    async fn ensure_cuisine(&self, cuisine_id: i32) -> AppResult<()> {
        match self.cuisines.find_by_id(cuisine_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found("cuisine", "id", cuisine_id)),
        }
    }

    /// Creates the restaurant and its optional address in one transaction.
    ///
    /// # Returns
    /// The detail view of the new restaurant, with no reviews yet
    pub async fn create_restaurant(&self, draft: RestaurantDraft) -> AppResult<RestaurantDetail> {
        let name = non_blank(draft.name)
            .ok_or_else(|| AppError::validation("restaurantName", "Restaurant name is required."))?;
        let cuisine_id = draft
            .cuisine_id
            .ok_or_else(|| AppError::validation("cuisineId", "Cuisine ID is required."))?;
        self.ensure_cuisine(cuisine_id).await?;

        let restaurant = self
            .restaurants
            .create(
                NewRestaurant {
                    name,
                    cuisine_id: Some(cuisine_id),
                },
                draft.address,
            )
            .await?;

        info!(restaurant_id = restaurant.id, cuisine_id, "Restaurant created");
        self.get_restaurant(restaurant.id).await
    }

    pub async fn list_restaurants(&self) -> AppResult<Vec<RestaurantRecord>> {
        self.restaurants.list_records().await
    }

    /// Loads the joined record plus every review with its author.
    pub async fn get_restaurant(&self, id: i32) -> AppResult<RestaurantDetail> {
        let record = self
            .restaurants
            .find_record(id)
            .await?
            .ok_or_else(|| AppError::not_found("restaurant", "id", id))?;
        let reviews = self.reviews.list_for_restaurant(id).await?;
        Ok(RestaurantDetail { record, reviews })
    }

    /// Lists restaurants of one cuisine.
    ///
    /// An empty result is an error: either the cuisine does not exist or it
    /// has no restaurants, and the two are reported differently.
    pub async fn list_by_cuisine(&self, cuisine_id: i32) -> AppResult<Vec<RestaurantRecord>> {
        let records = self.restaurants.list_records_by_cuisine(cuisine_id).await?;
        if !records.is_empty() {
            return Ok(records);
        }

        self.ensure_cuisine(cuisine_id).await?;
        Err(AppError::not_found("restaurant", "cuisine_id", cuisine_id))
    }

    /// Applies a partial edit and returns the re-joined detail.
    ///
    /// A supplied address is created when the restaurant has none; otherwise
    /// the existing row is overwritten in place and keeps its id.
    pub async fn edit_restaurant(&self, id: i32, edit: RestaurantEdit) -> AppResult<RestaurantDetail> {
        if edit.restaurant_id != id {
            return Err(AppError::bad_request("Restaurant ID mismatch."));
        }
        if self.restaurants.find_by_id(id).await?.is_none() {
            return Err(AppError::not_found("restaurant", "id", id));
        }
        if let Some(Some(cuisine_id)) = edit.cuisine_id {
            self.ensure_cuisine(cuisine_id).await?;
        }

        let changes = RestaurantChanges {
            name: non_blank(edit.name),
            cuisine_id: edit.cuisine_id,
        };
        let address_touched = edit.address.is_some();
        self.restaurants.update(id, changes, edit.address).await?;

        info!(restaurant_id = id, address_touched, "Restaurant updated");
        self.get_restaurant(id).await
    }

    /// Deletes the restaurant. Its address goes with it and its reviews are
    /// detached.
    pub async fn delete_restaurant(&self, id: i32) -> AppResult<()> {
        if !self.restaurants.delete(id).await? {
            return Err(AppError::not_found("restaurant", "id", id));
        }
        info!(restaurant_id = id, "Restaurant deleted");
        Ok(())
    }
}
