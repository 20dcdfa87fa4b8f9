//! Repository for the `hour_mappings` table.

use estimator_core::hour_mapping::HourMatrix;
use estimator_core::types::{DbId, Hours};
use sqlx::PgPool;

use crate::models::hour_mapping::{HourMapping, UpsertHourMapping};

/// Column list for the `hour_mappings` table.
const COLUMNS: &str = "id, complexity_name, screen_type_name, hours, created_at, updated_at";

/// Provides lookup and upsert access to the hour mapping table.
pub struct HourMappingRepo;

impl HourMappingRepo {
    /// List every mapping row, grouped by complexity then screen type name.
    pub async fn list(pool: &PgPool) -> Result<Vec<HourMapping>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM hour_mappings ORDER BY complexity_name, screen_type_name"
        );
        sqlx::query_as::<_, HourMapping>(&query)
            .fetch_all(pool)
            .await
    }

    /// Hours mapped for a single pair, or `None` when the pair is unmapped.
    pub async fn lookup(
        pool: &PgPool,
        complexity_name: &str,
        screen_type_name: &str,
    ) -> Result<Option<Hours>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT hours FROM hour_mappings \
             WHERE complexity_name = $1 AND screen_type_name = $2",
        )
        .bind(complexity_name)
        .bind(screen_type_name)
        .fetch_optional(pool)
        .await
    }

    /// Load the whole table into an in-memory [`HourMatrix`].
    pub async fn load_matrix(pool: &PgPool) -> Result<HourMatrix, sqlx::Error> {
        let rows = Self::list(pool).await?;
        Ok(rows
            .into_iter()
            .map(|m| (m.complexity_name, m.screen_type_name, m.hours))
            .collect())
    }

    /// Insert a mapping, or replace the hours of an existing pair.
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertHourMapping,
    ) -> Result<HourMapping, sqlx::Error> {
        let query = format!(
            "INSERT INTO hour_mappings (complexity_name, screen_type_name, hours) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (complexity_name, screen_type_name) \
             DO UPDATE SET hours = EXCLUDED.hours \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HourMapping>(&query)
            .bind(&input.complexity_name)
            .bind(&input.screen_type_name)
            .bind(input.hours)
            .fetch_one(pool)
            .await
    }

    /// Delete a mapping row. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM hour_mappings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
