use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Cuisine;
use crate::utils::validate::not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCuisineRequest {
    #[validate(custom(function = "not_blank", message = "Cuisine name is required."))]
    pub cuisine_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CuisineResponse {
    pub cuisine_id: i32,
    pub cuisine_name: String,
}

impl From<Cuisine> for CuisineResponse {
    fn from(cuisine: Cuisine) -> Self {
        Self {
            cuisine_id: cuisine.id,
            cuisine_name: cuisine.name,
        }
    }
}
