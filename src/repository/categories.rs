//! Category registry repository

use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::{AppError, AppResult},
    models::category::{Category, CreateCategory, USER_DEFINED_DESCRIPTION},
};

#[derive(Clone)]
pub struct CategoriesRepository {
    pool: Pool<Postgres>,
}

impl CategoriesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all categories
    pub async fn list(&self) -> AppResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get category by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Category> {
        sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))
    }

    /// Create a category. The unique-name constraint arbitrates concurrent
    /// creates; a losing writer gets the conflict, not a duplicate row.
    pub async fn create(&self, data: &CreateCategory) -> AppResult<Category> {
        let row = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description)
            VALUES ($1, $2)
            ON CONFLICT (name) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.description)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| AppError::Conflict(format!("Category \"{}\" already exists", data.name)))
    }

    /// Delete a category, refusing while any equipment still references its
    /// name. Count and delete run in one transaction.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;

        let in_use: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM equipment WHERE category = $1")
            .bind(&category.name)
            .fetch_one(&mut *tx)
            .await?;

        if in_use > 0 {
            return Err(AppError::Conflict(format!(
                "Category \"{}\" is referenced by {} equipment item(s); move or delete them first",
                category.name, in_use
            )));
        }

        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Make sure `name` exists in the registry, creating it with the default
    /// description when absent. Runs inside the caller's transaction and is
    /// idempotent under concurrency.
    pub async fn ensure(tx: &mut Transaction<'_, Postgres>, name: &str) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO categories (name, description)
            VALUES ($1, $2)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(name)
        .bind(USER_DEFINED_DESCRIPTION)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
