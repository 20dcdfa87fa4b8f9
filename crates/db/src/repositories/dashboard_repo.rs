//! Aggregate queries backing the dashboard.

use sqlx::PgPool;

use crate::models::dashboard::{DashboardCounts, ProjectEstimationSummary};

/// Read-only rollups across projects, screens and estimations.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Global counts and the sum of every estimation's total hours.
    pub async fn counts(pool: &PgPool) -> Result<DashboardCounts, sqlx::Error> {
        sqlx::query_as::<_, DashboardCounts>(
            "SELECT \
                (SELECT COUNT(*) FROM projects) AS project_count, \
                (SELECT COUNT(*) FROM screens) AS screen_count, \
                (SELECT COUNT(*) FROM estimations) AS estimation_count, \
                (SELECT COALESCE(SUM(total_hours), 0)::BIGINT FROM estimations) \
                    AS total_estimated_hours",
        )
        .fetch_one(pool)
        .await
    }

    /// One row per project with its latest estimation, if any.
    pub async fn project_summaries(
        pool: &PgPool,
    ) -> Result<Vec<ProjectEstimationSummary>, sqlx::Error> {
        sqlx::query_as::<_, ProjectEstimationSummary>(
            "SELECT \
                p.id AS project_id, \
                p.name AS project_name, \
                (SELECT COUNT(*) FROM screens s WHERE s.project_id = p.id) AS screen_count, \
                (SELECT COUNT(*) FROM estimations e WHERE e.project_id = p.id) \
                    AS estimation_count, \
                latest.id AS latest_estimation_id, \
                latest.version_number AS latest_version_number, \
                latest.total_hours AS latest_total_hours \
             FROM projects p \
             LEFT JOIN LATERAL ( \
                SELECT e.id, e.version_number, e.total_hours \
                FROM estimations e \
                WHERE e.project_id = p.id \
                ORDER BY e.created_at DESC, e.id DESC \
                LIMIT 1 \
             ) latest ON true \
             ORDER BY p.name, p.id",
        )
        .fetch_all(pool)
        .await
    }
}
