//! Repository for the `screens` table.

use estimator_core::types::DbId;
use sqlx::PgPool;

use crate::models::screen::{CreateScreen, Screen, UpdateScreen};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, name, description, created_at, updated_at";

/// Provides CRUD operations for screens.
pub struct ScreenRepo;

impl ScreenRepo {
    /// Insert a new screen under `project_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateScreen,
    ) -> Result<Screen, sqlx::Error> {
        let query = format!(
            "INSERT INTO screens (project_id, name, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Screen>(&query)
            .bind(project_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a screen by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Screen>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM screens WHERE id = $1");
        sqlx::query_as::<_, Screen>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch every screen whose ID is in `ids`.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Screen>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM screens WHERE id = ANY($1)");
        sqlx::query_as::<_, Screen>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List the screens of a project in creation order.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Screen>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM screens WHERE project_id = $1 ORDER BY id");
        sqlx::query_as::<_, Screen>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a screen. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateScreen,
    ) -> Result<Option<Screen>, sqlx::Error> {
        let query = format!(
            "UPDATE screens SET
                name = COALESCE($2, name),
                description = COALESCE($3, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Screen>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Whether any estimation line references this screen.
    pub async fn is_referenced(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM estimation_details WHERE screen_id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Permanently delete a screen. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM screens WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
