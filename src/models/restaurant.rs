use diesel::prelude::*;

use super::{Address, Cuisine, ReviewWithAuthor};

#[derive(Debug, Queryable, Selectable, Identifiable, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::restaurants)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub cuisine_id: Option<i32>,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::restaurants)]
pub struct NewRestaurant {
    pub name: String,
    pub cuisine_id: Option<i32>,
}

/// Partial update for a restaurant row.
///
/// `cuisine_id` is doubly optional: the outer `None` skips the column,
/// `Some(None)` writes NULL.
#[derive(Debug, AsChangeset, Clone, Default, PartialEq, Eq)]
#[diesel(table_name = crate::schema::restaurants)]
pub struct RestaurantChanges {
    pub name: Option<String>,
    pub cuisine_id: Option<Option<i32>>,
}

impl RestaurantChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.cuisine_id.is_none()
    }
}

/// A restaurant together with its joined cuisine and address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantRecord {
    pub restaurant: Restaurant,
    pub cuisine: Option<Cuisine>,
    pub address: Option<Address>,
}

impl From<(Restaurant, Option<Cuisine>, Option<Address>)> for RestaurantRecord {
    fn from((restaurant, cuisine, address): (Restaurant, Option<Cuisine>, Option<Address>)) -> Self {
        Self {
            restaurant,
            cuisine,
            address,
        }
    }
}

/// Full restaurant view: the joined record plus every review with its author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantDetail {
    pub record: RestaurantRecord,
    pub reviews: Vec<ReviewWithAuthor>,
}
