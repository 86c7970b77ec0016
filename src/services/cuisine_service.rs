use std::sync::Arc;

use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{Cuisine, NewCuisine};
use crate::repositories::CuisineRepository;

#[derive(Clone)]
pub struct CuisineService {
    repo: Arc<dyn CuisineRepository>,
}

impl CuisineService {
    pub fn new(repo: Arc<dyn CuisineRepository>) -> Self {
        Self { repo }
    }

    /// Creates a cuisine after a case-insensitive duplicate check.
    pub async fn create_cuisine(&self, name: &str) -> AppResult<Cuisine> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("cuisineName", "Cuisine name is required."));
        }
        if self.repo.name_taken(name).await? {
            return Err(AppError::Duplicate {
                entity: "cuisine".to_string(),
                field: "name".to_string(),
                value: name.to_string(),
            });
        }

        let cuisine = self
            .repo
            .create(NewCuisine {
                name: name.to_string(),
            })
            .await?;
        info!(cuisine_id = cuisine.id, name = %cuisine.name, "Cuisine created");
        Ok(cuisine)
    }

    pub async fn get_cuisine(&self, id: i32) -> AppResult<Cuisine> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("cuisine", "id", id))
    }

    pub async fn list_cuisines(&self) -> AppResult<Vec<Cuisine>> {
        self.repo.list_all().await
    }

    /// Restaurants of the deleted cuisine are kept with no cuisine.
    pub async fn delete_cuisine(&self, id: i32) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(AppError::not_found("cuisine", "id", id));
        }
        info!(cuisine_id = id, "Cuisine deleted");
        Ok(())
    }
}
