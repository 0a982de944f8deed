//! Movement log service

use super::parse_datetime;
use crate::{
    error::AppResult,
    models::movement::{CreateMovement, Movement},
    repository::Repository,
};

#[derive(Clone)]
pub struct MovementsService {
    repository: Repository,
}

impl MovementsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, equipment_id: Option<i32>) -> AppResult<Vec<Movement>> {
        self.repository.movements.list(equipment_id).await
    }

    /// Record a custody movement, deriving the equipment's new status
    pub async fn record(&self, data: &CreateMovement) -> AppResult<Movement> {
        let moved_at = data
            .moved_at
            .as_deref()
            .map(|s| parse_datetime(s, "moved_at"))
            .transpose()?;
        self.repository.movements.record(data, moved_at).await
    }
}
