//! Repository for the `complexity_levels` table.

use estimator_core::types::DbId;
use sqlx::PgPool;

use crate::models::complexity::{ComplexityLevel, CreateComplexityLevel, UpdateComplexityLevel};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, hours, description, created_at, updated_at";

/// Provides CRUD operations for complexity levels.
pub struct ComplexityRepo;

impl ComplexityRepo {
    /// Insert a new complexity level, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateComplexityLevel,
    ) -> Result<ComplexityLevel, sqlx::Error> {
        let query = format!(
            "INSERT INTO complexity_levels (name, hours, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ComplexityLevel>(&query)
            .bind(&input.name)
            .bind(input.hours)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a complexity level by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ComplexityLevel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM complexity_levels WHERE id = $1");
        sqlx::query_as::<_, ComplexityLevel>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a level with exactly this name exists.
    pub async fn exists_by_name(pool: &PgPool, name: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM complexity_levels WHERE name = $1)")
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Fetch every level whose ID is in `ids`. Missing IDs are simply absent.
    pub async fn find_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<ComplexityLevel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM complexity_levels WHERE id = ANY($1)");
        sqlx::query_as::<_, ComplexityLevel>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List all complexity levels, lightest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ComplexityLevel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM complexity_levels ORDER BY hours, name");
        sqlx::query_as::<_, ComplexityLevel>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a complexity level. Only non-`None` fields in `input` are applied.
    ///
    /// A rename is carried over to every `hour_mappings` row keyed by the old
    /// name in the same transaction. Returns `None` if no row with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateComplexityLevel,
    ) -> Result<Option<ComplexityLevel>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let previous_name: Option<String> =
            sqlx::query_scalar("SELECT name FROM complexity_levels WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(previous_name) = previous_name else {
            return Ok(None);
        };

        let query = format!(
            "UPDATE complexity_levels SET
                name = COALESCE($2, name),
                hours = COALESCE($3, hours),
                description = COALESCE($4, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let level = sqlx::query_as::<_, ComplexityLevel>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.hours)
            .bind(&input.description)
            .fetch_one(&mut *tx)
            .await?;

        if level.name != previous_name {
            let renamed = sqlx::query(
                "UPDATE hour_mappings SET complexity_name = $2 WHERE complexity_name = $1",
            )
            .bind(&previous_name)
            .bind(&level.name)
            .execute(&mut *tx)
            .await?;
            tracing::debug!(
                from = %previous_name,
                to = %level.name,
                mappings = renamed.rows_affected(),
                "Renamed complexity in hour mappings",
            );
        }

        tx.commit().await?;
        Ok(Some(level))
    }

    /// Whether any estimation line references this level.
    pub async fn is_referenced(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM estimation_details WHERE complexity_id = $1)",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }

    /// Permanently delete a complexity level along with its hour mapping rows.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let name: Option<String> =
            sqlx::query_scalar("DELETE FROM complexity_levels WHERE id = $1 RETURNING name")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(name) = name else {
            return Ok(false);
        };

        sqlx::query("DELETE FROM hour_mappings WHERE complexity_name = $1")
            .bind(&name)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}
