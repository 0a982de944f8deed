//! Equipment ledger service

use chrono::{DateTime, Utc};

use super::parse_datetime;
use crate::{
    error::{AppError, AppResult},
    models::equipment::{CreateEquipment, Equipment, EquipmentQuery, UpdateEquipment},
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<Equipment>> {
        self.repository.equipment.list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        if data.category.trim().is_empty() {
            return Err(AppError::Validation("Category is required".to_string()));
        }
        let acquisition_date = data
            .acquisition_date
            .as_deref()
            .map(|s| parse_datetime(s, "acquisition_date"))
            .transpose()?;
        self.repository.equipment.create(data, acquisition_date).await
    }

    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        if let Some(ref category) = data.category {
            if category.trim().is_empty() {
                return Err(AppError::Validation(
                    "Category cannot be empty".to_string(),
                ));
            }
        }
        let acquisition_date: Option<Option<DateTime<Utc>>> = match &data.acquisition_date {
            None => None,
            Some(None) => Some(None),
            Some(Some(s)) => Some(Some(parse_datetime(s, "acquisition_date")?)),
        };
        self.repository.equipment.update(id, data, acquisition_date).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.equipment.delete(id).await
    }
}
