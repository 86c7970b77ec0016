//! Restaurant repository.
//!
//! A restaurant owns at most one address, so creation and edits touch both
//! tables inside a single transaction.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{
    Address, AddressChanges, Cuisine, NewAddress, NewRestaurant, Restaurant, RestaurantChanges,
    RestaurantRecord,
};
use crate::schema::{addresses, cuisines, restaurants};

#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// Inserts the restaurant and, when given, its address.
    async fn create(
        &self,
        new_restaurant: NewRestaurant,
        address: Option<AddressChanges>,
    ) -> Result<Restaurant, AppError>;

    async fn find_by_id(&self, restaurant_id: i32) -> Result<Option<Restaurant>, AppError>;

    async fn find_record(&self, restaurant_id: i32) -> Result<Option<RestaurantRecord>, AppError>;

    async fn list_records(&self) -> Result<Vec<RestaurantRecord>, AppError>;

    async fn list_records_by_cuisine(&self, cuisine_id: i32) -> Result<Vec<RestaurantRecord>, AppError>;

    /// Applies column changes and creates or overwrites the address in place.
    async fn update(
        &self,
        restaurant_id: i32,
        changes: RestaurantChanges,
        address: Option<AddressChanges>,
    ) -> Result<(), AppError>;

    /// Removes the restaurant and its address. Reviews survive with no restaurant.
    async fn delete(&self, restaurant_id: i32) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PgRestaurantRepository {
    pool: AsyncDbPool,
}

impl PgRestaurantRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

type RecordRow = (Restaurant, Option<Cuisine>, Option<Address>);

async fn upsert_address(
    conn: &mut AsyncPgConnection,
    restaurant_id: i32,
    changes: AddressChanges,
) -> Result<(), AppError> {
    let existing = addresses::table
        .filter(addresses::restaurant_id.eq(restaurant_id))
        .select(Address::as_select())
        .first(conn)
        .await
        .optional()?;

    match existing {
        Some(address) if !changes.is_empty() => {
            diesel::update(addresses::table.find(address.id))
                .set(&changes)
                .execute(conn)
                .await?;
        }
        Some(_) => {}
        None => {
            diesel::insert_into(addresses::table)
                .values(&NewAddress::for_restaurant(restaurant_id, changes))
                .execute(conn)
                .await?;
        }
    }
    Ok(())
}

#[async_trait]
impl RestaurantRepository for PgRestaurantRepository {
    async fn create(
        &self,
        new_restaurant: NewRestaurant,
        address: Option<AddressChanges>,
    ) -> Result<Restaurant, AppError> {
        let mut conn = self.pool.get().await?;

        conn.transaction::<_, AppError, _>(|conn| {
            async move {
                let restaurant = diesel::insert_into(restaurants::table)
                    .values(&new_restaurant)
                    .returning(Restaurant::as_returning())
                    .get_result(conn)
                    .await?;

                if let Some(fields) = address {
                    diesel::insert_into(addresses::table)
                        .values(&NewAddress::for_restaurant(restaurant.id, fields))
                        .execute(conn)
                        .await?;
                }
                Ok(restaurant)
            }
            .scope_boxed()
        })
        .await
    }

    async fn find_by_id(&self, restaurant_id: i32) -> Result<Option<Restaurant>, AppError> {
        let mut conn = self.pool.get().await?;

        restaurants::table
            .find(restaurant_id)
            .select(Restaurant::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    async fn find_record(&self, restaurant_id: i32) -> Result<Option<RestaurantRecord>, AppError> {
        let mut conn = self.pool.get().await?;

        restaurants::table
            .left_join(cuisines::table)
            .left_join(addresses::table)
            .filter(restaurants::id.eq(restaurant_id))
            .select((
                Restaurant::as_select(),
                Option::<Cuisine>::as_select(),
                Option::<Address>::as_select(),
            ))
            .first::<RecordRow>(&mut conn)
            .await
            .optional()
            .map(|row| row.map(RestaurantRecord::from))
            .map_err(AppError::from)
    }

    async fn list_records(&self) -> Result<Vec<RestaurantRecord>, AppError> {
        let mut conn = self.pool.get().await?;

        let rows = restaurants::table
            .left_join(cuisines::table)
            .left_join(addresses::table)
            .select((
                Restaurant::as_select(),
                Option::<Cuisine>::as_select(),
                Option::<Address>::as_select(),
            ))
            .order(restaurants::id.asc())
            .load::<RecordRow>(&mut conn)
            .await?;

        Ok(rows.into_iter().map(RestaurantRecord::from).collect())
    }

    async fn list_records_by_cuisine(&self, cuisine_id: i32) -> Result<Vec<RestaurantRecord>, AppError> {
        let mut conn = self.pool.get().await?;

        let rows = restaurants::table
            .left_join(cuisines::table)
            .left_join(addresses::table)
            .filter(restaurants::cuisine_id.eq(cuisine_id))
            .select((
                Restaurant::as_select(),
                Option::<Cuisine>::as_select(),
                Option::<Address>::as_select(),
            ))
            .order(restaurants::id.asc())
            .load::<RecordRow>(&mut conn)
            .await?;

        Ok(rows.into_iter().map(RestaurantRecord::from).collect())
    }

    async fn update(
        &self,
        restaurant_id: i32,
        changes: RestaurantChanges,
        address: Option<AddressChanges>,
    ) -> Result<(), AppError> {
        let mut conn = self.pool.get().await?;

        conn.transaction::<_, AppError, _>(|conn| {
            async move {
                if !changes.is_empty() {
                    diesel::update(restaurants::table.find(restaurant_id))
                        .set(&changes)
                        .execute(conn)
                        .await?;
                }
                if let Some(fields) = address {
                    upsert_address(conn, restaurant_id, fields).await?;
                }
                Ok(())
            }
            .scope_boxed()
        })
        .await
    }

    async fn delete(&self, restaurant_id: i32) -> Result<bool, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::delete(restaurants::table.find(restaurant_id))
            .execute(&mut conn)
            .await
            .map(|affected| affected > 0)
            .map_err(AppError::from)
    }
}
