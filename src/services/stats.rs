//! Statistics service

use sqlx::Row;

use crate::{
    api::stats::{StatEntry, StatsResponse},
    error::AppResult,
    models::equipment::EquipmentStatus,
    repository::Repository,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Get inventory statistics, computed live over the equipment ledger
    pub async fn get_stats(&self) -> AppResult<StatsResponse> {
        let pool = &self.repository.pool;

        let total_equipment: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM equipment")
            .fetch_one(pool)
            .await?;

        let in_storage: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM equipment WHERE status = $1")
            .bind(EquipmentStatus::InStorage)
            .fetch_one(pool)
            .await?;

        let in_use: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM equipment WHERE status = $1")
            .bind(EquipmentStatus::InUse)
            .fetch_one(pool)
            .await?;

        let faulty: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM equipment WHERE status = $1")
            .bind(EquipmentStatus::Faulty)
            .fetch_one(pool)
            .await?;

        let by_category = sqlx::query(
            r#"
            SELECT category as label, COUNT(*) as value
            FROM equipment
            GROUP BY category
            ORDER BY value DESC, label
            "#,
        )
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|row| StatEntry {
            label: row.get("label"),
            value: row.get("value"),
        })
        .collect();

        Ok(StatsResponse {
            total_equipment,
            in_storage,
            in_use,
            faulty,
            by_category,
        })
    }
}
