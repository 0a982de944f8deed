//! Equipment ledger repository

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres, Transaction};

use super::categories::CategoriesRepository;
use crate::{
    error::{AppError, AppResult},
    models::equipment::{
        CreateEquipment, Equipment, EquipmentQuery, EquipmentStatus, UpdateEquipment,
    },
};

/// Map a unique-constraint violation to a conflict; anything else stays a
/// database error. Backstop for writers racing past the pre-checks.
fn unique_conflict(e: sqlx::Error) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict("Serial number or barcode is already registered".to_string())
        }
        _ => AppError::Database(e),
    }
}

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List equipment, newest first, with optional category/status filters
    /// and a case-insensitive substring search over brand, model, serial
    /// number and barcode.
    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<Equipment>> {
        let mut conditions: Vec<String> = Vec::new();
        let mut idx = 0;

        if query.category.is_some() {
            idx += 1;
            conditions.push(format!("category = ${}", idx));
        }
        if query.status.is_some() {
            idx += 1;
            conditions.push(format!("status = ${}", idx));
        }
        if query.search.is_some() {
            idx += 1;
            conditions.push(format!(
                "(brand ILIKE ${i} OR model ILIKE ${i} OR serial_number ILIKE ${i} OR barcode ILIKE ${i})",
                i = idx
            ));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };
        let sql = format!(
            "SELECT * FROM equipment{} ORDER BY created_at DESC",
            where_clause
        );

        let mut builder = sqlx::query_as::<_, Equipment>(&sql);
        if let Some(ref category) = query.category {
            builder = builder.bind(category);
        }
        if let Some(status) = query.status {
            builder = builder.bind(status);
        }
        if let Some(ref search) = query.search {
            builder = builder.bind(format!("%{}%", search));
        }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Create equipment. Registers the category when unknown and inserts the
    /// row in one transaction; serial number and barcode must be unused.
    pub async fn create(
        &self,
        data: &CreateEquipment,
        acquisition_date: Option<DateTime<Utc>>,
    ) -> AppResult<Equipment> {
        let now = Utc::now();
        let status = data.status.unwrap_or(EquipmentStatus::InStorage);

        let mut tx = self.pool.begin().await?;

        CategoriesRepository::ensure(&mut tx, &data.category).await?;

        if let Some(ref serial) = data.serial_number {
            Self::check_serial_free(&mut tx, serial, None).await?;
        }
        if let Some(ref barcode) = data.barcode {
            Self::check_barcode_free(&mut tx, barcode, None).await?;
        }

        let row = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment (
                category, brand, model, serial_number, barcode, status, notes,
                acquisition_date, acquisition_price, supplier, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(&data.category)
        .bind(&data.brand)
        .bind(&data.model)
        .bind(&data.serial_number)
        .bind(&data.barcode)
        .bind(status)
        .bind(&data.notes)
        .bind(acquisition_date)
        .bind(data.acquisition_price)
        .bind(&data.supplier)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(unique_conflict)?;

        tx.commit().await?;
        Ok(row)
    }

    /// Partially update equipment: only fields present in the request are
    /// touched, `updated_at` always refreshes.
    pub async fn update(
        &self,
        id: i32,
        data: &UpdateEquipment,
        acquisition_date: Option<Option<DateTime<Utc>>>,
    ) -> AppResult<Equipment> {
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        if let Some(Some(ref serial)) = data.serial_number {
            Self::check_serial_free(&mut tx, serial, Some(id)).await?;
        }
        if let Some(Some(ref barcode)) = data.barcode {
            Self::check_barcode_free(&mut tx, barcode, Some(id)).await?;
        }
        if let Some(ref category) = data.category {
            CategoriesRepository::ensure(&mut tx, category).await?;
        }

        let mut sets = vec!["updated_at = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.category, "category");
        add_field!(data.brand, "brand");
        add_field!(data.model, "model");
        add_field!(data.serial_number, "serial_number");
        add_field!(data.barcode, "barcode");
        add_field!(data.status, "status");
        add_field!(data.notes, "notes");
        add_field!(acquisition_date, "acquisition_date");
        add_field!(data.acquisition_price, "acquisition_price");
        add_field!(data.supplier, "supplier");
        let _ = idx;

        let query = format!(
            "UPDATE equipment SET {} WHERE id = {} RETURNING *",
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query_as::<_, Equipment>(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val.clone());
                }
            };
        }

        bind_field!(data.category);
        bind_field!(data.brand);
        bind_field!(data.model);
        bind_field!(data.serial_number);
        bind_field!(data.barcode);
        bind_field!(data.status);
        bind_field!(data.notes);
        bind_field!(acquisition_date);
        bind_field!(data.acquisition_price);
        bind_field!(data.supplier);

        let row = builder
            .fetch_optional(&mut *tx)
            .await
            .map_err(unique_conflict)?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))?;

        tx.commit().await?;
        Ok(row)
    }

    /// Delete equipment. The movements foreign key cascades, so the item's
    /// custody history goes with it atomically.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Equipment {} not found", id)));
        }
        Ok(())
    }

    async fn check_serial_free(
        tx: &mut Transaction<'_, Postgres>,
        serial: &str,
        exclude_id: Option<i32>,
    ) -> AppResult<()> {
        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM equipment WHERE serial_number = $1 AND id != $2)",
        )
        .bind(serial)
        .bind(exclude_id.unwrap_or(-1))
        .fetch_one(&mut **tx)
        .await?;
        if taken {
            return Err(AppError::Conflict(format!(
                "Serial number \"{}\" is already registered",
                serial
            )));
        }
        Ok(())
    }

    async fn check_barcode_free(
        tx: &mut Transaction<'_, Postgres>,
        barcode: &str,
        exclude_id: Option<i32>,
    ) -> AppResult<()> {
        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM equipment WHERE barcode = $1 AND id != $2)",
        )
        .bind(barcode)
        .bind(exclude_id.unwrap_or(-1))
        .fetch_one(&mut **tx)
        .await?;
        if taken {
            return Err(AppError::Conflict(format!(
                "Barcode \"{}\" is already registered",
                barcode
            )));
        }
        Ok(())
    }
}
