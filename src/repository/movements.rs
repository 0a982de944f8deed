//! Movement log repository

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::movement::{CreateMovement, Movement},
};

#[derive(Clone)]
pub struct MovementsRepository {
    pool: Pool<Postgres>,
}

impl MovementsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List movements, newest first, optionally scoped to one equipment item
    pub async fn list(&self, equipment_id: Option<i32>) -> AppResult<Vec<Movement>> {
        let rows = if let Some(id) = equipment_id {
            sqlx::query_as::<_, Movement>(
                "SELECT * FROM movements WHERE equipment_id = $1 ORDER BY moved_at DESC",
            )
            .bind(id)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, Movement>("SELECT * FROM movements ORDER BY moved_at DESC")
                .fetch_all(&self.pool)
                .await?
        };
        Ok(rows)
    }

    /// Record a custody movement and apply its status transition to the
    /// referenced equipment. Both writes commit together or not at all.
    pub async fn record(
        &self,
        data: &CreateMovement,
        moved_at: Option<DateTime<Utc>>,
    ) -> AppResult<Movement> {
        let now = Utc::now();
        let moved_at = moved_at.unwrap_or(now);

        let mut tx = self.pool.begin().await?;

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM equipment WHERE id = $1)")
            .bind(data.equipment_id)
            .fetch_one(&mut *tx)
            .await?;
        if !exists {
            return Err(AppError::NotFound(format!(
                "Equipment {} not found",
                data.equipment_id
            )));
        }

        let movement = sqlx::query_as::<_, Movement>(
            r#"
            INSERT INTO movements (
                equipment_id, movement_type, moved_at, user_name, user_staff_id,
                department, location, description, handled_by, approved_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(data.equipment_id)
        .bind(data.movement_type)
        .bind(moved_at)
        .bind(&data.user_name)
        .bind(&data.user_staff_id)
        .bind(&data.department)
        .bind(&data.location)
        .bind(&data.description)
        .bind(&data.handled_by)
        .bind(&data.approved_by)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(status) = data.movement_type.resulting_status() {
            sqlx::query("UPDATE equipment SET status = $1, updated_at = $2 WHERE id = $3")
                .bind(status)
                .bind(now)
                .bind(data.equipment_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(movement)
    }
}
