//! Restaurant DTOs, including the nested address sub-resource.

use serde::{Deserialize, Deserializer, Serialize};

use super::{CuisineResponse, ReviewResponse};
use crate::models::{Address, AddressChanges, RestaurantDetail, RestaurantRecord};
use crate::services::{RestaurantDraft, RestaurantEdit};
use crate::utils::validate::non_blank;

/// Distinguishes an absent field from an explicit `null`.
///
/// Paired with `#[serde(default)]`: a missing key stays `None`, `null`
/// becomes `Some(None)` and a value becomes `Some(Some(v))`.
fn tri_state<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Address fields in a create or edit body. `addressId` is accepted and ignored;
/// the stored address is always located through its restaurant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_id: Option<i32>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
}

impl AddressRequest {
    pub fn into_changes(self) -> AddressChanges {
        AddressChanges {
            city: non_blank(self.city),
            number: non_blank(self.number),
            street: non_blank(self.street),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRestaurantRequest {
    #[serde(default)]
    pub restaurant_name: Option<String>,
    #[serde(default)]
    pub cuisine_id: Option<i32>,
    #[serde(default)]
    pub address: Option<AddressRequest>,
}

impl CreateRestaurantRequest {
    pub fn into_draft(self) -> RestaurantDraft {
        RestaurantDraft {
            name: self.restaurant_name,
            cuisine_id: self.cuisine_id,
            address: self.address.map(AddressRequest::into_changes),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRestaurantRequest {
    pub restaurant_id: i32,
    #[serde(default)]
    pub restaurant_name: Option<String>,
    #[serde(default, deserialize_with = "tri_state", skip_serializing_if = "Option::is_none")]
    pub cuisine_id: Option<Option<i32>>,
    #[serde(default)]
    pub address: Option<AddressRequest>,
}

impl EditRestaurantRequest {
    pub fn into_edit(self) -> RestaurantEdit {
        RestaurantEdit {
            restaurant_id: self.restaurant_id,
            name: self.restaurant_name,
            cuisine_id: self.cuisine_id,
            address: self.address.map(AddressRequest::into_changes),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
    pub address_id: i32,
    pub city: Option<String>,
    pub number: Option<String>,
    pub street: Option<String>,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            address_id: address.id,
            city: address.city,
            number: address.number,
            street: address.street,
        }
    }
}

/// List item: the restaurant with its cuisine and address, no reviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSummaryResponse {
    pub restaurant_id: i32,
    pub restaurant_name: String,
    pub cuisine: Option<CuisineResponse>,
    pub address: Option<AddressResponse>,
}

impl From<RestaurantRecord> for RestaurantSummaryResponse {
    fn from(record: RestaurantRecord) -> Self {
        Self {
            restaurant_id: record.restaurant.id,
            restaurant_name: record.restaurant.name,
            cuisine: record.cuisine.map(CuisineResponse::from),
            address: record.address.map(AddressResponse::from),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDetailResponse {
    #[serde(flatten)]
    pub summary: RestaurantSummaryResponse,
    pub reviews: Vec<ReviewResponse>,
}

impl From<RestaurantDetail> for RestaurantDetailResponse {
    fn from(detail: RestaurantDetail) -> Self {
        Self {
            summary: detail.record.into(),
            reviews: detail.reviews.into_iter().map(ReviewResponse::from).collect(),
        }
    }
}
