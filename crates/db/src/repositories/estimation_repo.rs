//! Repository for the `estimations` and `estimation_details` tables.
//!
//! An estimation and its lines are written together in one transaction and
//! never modified afterwards.

use estimator_core::types::DbId;
use sqlx::PgPool;

use crate::models::estimation::{Estimation, EstimationDetail, NewEstimation, NewEstimationDetail};

/// Column list for the `estimations` table.
const COLUMNS: &str =
    "id, project_id, name, version_number, total_hours, notes, created_by, created_at";

/// Detail columns joined with the screen, complexity and screen type names.
const DETAIL_COLUMNS: &str = "d.id, d.estimation_id, d.line_number, \
    d.screen_id, s.name AS screen_name, \
    d.complexity_id, c.name AS complexity_name, \
    d.screen_type_id, t.name AS screen_type_name, \
    d.calculated_hours";

/// Provides create and read access to estimations. There is no update or delete.
pub struct EstimationRepo;

impl EstimationRepo {
    /// Insert the header and every detail row atomically.
    ///
    /// Any failure (including a foreign key violation on a later detail row)
    /// rolls back the header as well. Lines are numbered from 1 in input order.
    pub async fn create(
        pool: &PgPool,
        header: &NewEstimation,
        details: &[NewEstimationDetail],
    ) -> Result<Estimation, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_header = format!(
            "INSERT INTO estimations \
                (project_id, name, version_number, total_hours, notes, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let estimation = sqlx::query_as::<_, Estimation>(&insert_header)
            .bind(header.project_id)
            .bind(&header.name)
            .bind(&header.version_number)
            .bind(header.total_hours)
            .bind(&header.notes)
            .bind(&header.created_by)
            .fetch_one(&mut *tx)
            .await?;

        for (index, detail) in details.iter().enumerate() {
            sqlx::query(
                "INSERT INTO estimation_details \
                    (estimation_id, line_number, screen_id, complexity_id, \
                     screen_type_id, calculated_hours) \
                 VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(estimation.id)
            .bind(index as i32 + 1)
            .bind(detail.screen_id)
            .bind(detail.complexity_id)
            .bind(detail.screen_type_id)
            .bind(detail.calculated_hours)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(estimation)
    }

    /// Find an estimation header by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Estimation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM estimations WHERE id = $1");
        sqlx::query_as::<_, Estimation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List estimation headers, newest first.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Estimation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM estimations \
             ORDER BY created_at DESC, id DESC \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Estimation>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List the estimation headers of one project, newest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Estimation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM estimations \
             WHERE project_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Estimation>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Line items of an estimation in line order, with referenced names.
    pub async fn list_details(
        pool: &PgPool,
        estimation_id: DbId,
    ) -> Result<Vec<EstimationDetail>, sqlx::Error> {
        let query = format!(
            "SELECT {DETAIL_COLUMNS} \
             FROM estimation_details d \
             JOIN screens s ON s.id = d.screen_id \
             JOIN complexity_levels c ON c.id = d.complexity_id \
             JOIN screen_types t ON t.id = d.screen_type_id \
             WHERE d.estimation_id = $1 \
             ORDER BY d.line_number"
        );
        sqlx::query_as::<_, EstimationDetail>(&query)
            .bind(estimation_id)
            .fetch_all(pool)
            .await
    }
}
