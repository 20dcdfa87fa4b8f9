//! Repository for the `screen_types` table.

use estimator_core::types::DbId;
use sqlx::PgPool;

use crate::models::screen_type::{ScreenType, CreateScreenType, UpdateScreenType};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, hours, description, created_at, updated_at";

/// Provides CRUD operations for screen types.
pub struct ScreenTypeRepo;

impl ScreenTypeRepo {
    /// Insert a new screen type, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateScreenType,
    ) -> Result<ScreenType, sqlx::Error> {
        let query = format!(
            "INSERT INTO screen_types (name, hours, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ScreenType>(&query)
            .bind(&input.name)
            .bind(input.hours)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a screen type by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ScreenType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM screen_types WHERE id = $1");
        sqlx::query_as::<_, ScreenType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether a screen type with exactly this name exists.
    pub async fn exists_by_name(pool: &PgPool, name: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM screen_types WHERE name = $1)")
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Fetch every screen type whose ID is in `ids`. Missing IDs are simply absent.
    pub async fn find_by_ids(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<ScreenType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM screen_types WHERE id = ANY($1)");
        sqlx::query_as::<_, ScreenType>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List all screen types, lightest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ScreenType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM screen_types ORDER BY hours, name");
        sqlx::query_as::<_, ScreenType>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a screen type. Only non-`None` fields in `input` are applied.
    ///
    /// A rename is carried over to every `hour_mappings` row keyed by the old
    /// name in the same transaction. Returns `None` if no row with `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateScreenType,
    ) -> Result<Option<ScreenType>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let previous_name: Option<String> =
            sqlx::query_scalar("SELECT name FROM screen_types WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(previous_name) = previous_name else {
            return Ok(None);
        };

        let query = format!(
            "UPDATE screen_types SET
                name = COALESCE($2, name),
                hours = COALESCE($3, hours),
                description = COALESCE($4, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let screen_type = sqlx::query_as::<_, ScreenType>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.hours)
            .bind(&input.description)
            .fetch_one(&mut *tx)
            .await?;

        if screen_type.name != previous_name {
            let renamed = sqlx::query(
                "UPDATE hour_mappings SET screen_type_name = $2 WHERE screen_type_name = $1",
            )
            .bind(&previous_name)
            .bind(&screen_type.name)
            .execute(&mut *tx)
            .await?;
            tracing::debug!(
                from = %previous_name,
                to = %screen_type.name,
                mappings = renamed.rows_affected(),
                "Renamed screen type in hour mappings",
            );
        }

        tx.commit().await?;
        Ok(Some(screen_type))
    }

    /// Whether any estimation line references this screen type.
    pub async fn is_referenced(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM estimation_details WHERE screen_type_id = $1)",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }

    /// Permanently delete a screen type along with its hour mapping rows.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let name: Option<String> =
            sqlx::query_scalar("DELETE FROM screen_types WHERE id = $1 RETURNING name")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some(name) = name else {
            return Ok(false);
        };

        sqlx::query("DELETE FROM hour_mappings WHERE screen_type_name = $1")
            .bind(&name)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}
