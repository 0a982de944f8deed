//! Category registry service

use crate::{
    error::{AppError, AppResult},
    models::category::{Category, CreateCategory},
    repository::Repository,
};

#[derive(Clone)]
pub struct CategoriesService {
    repository: Repository,
}

impl CategoriesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Category>> {
        self.repository.categories.list().await
    }

    /// Create a category from a trimmed, non-empty name
    pub async fn create(&self, mut data: CreateCategory) -> AppResult<Category> {
        data.name = data.name.trim().to_string();
        if data.name.is_empty() {
            return Err(AppError::Validation(
                "Category name cannot be empty".to_string(),
            ));
        }
        self.repository.categories.create(&data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.categories.delete(id).await
    }
}
