//! Read-only aggregate rows for the dashboard.

use estimator_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// Global counts across the whole workspace.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DashboardCounts {
    pub project_count: i64,
    pub screen_count: i64,
    pub estimation_count: i64,
    pub total_estimated_hours: i64,
}

/// Per-project estimation rollup. `latest_*` is `None` for projects with no estimations.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectEstimationSummary {
    pub project_id: DbId,
    pub project_name: String,
    pub screen_count: i64,
    pub estimation_count: i64,
    pub latest_estimation_id: Option<DbId>,
    pub latest_version_number: Option<String>,
    pub latest_total_hours: Option<i64>,
}
