//! Handler for the dashboard summary.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use estimator_core::estimation::{days_for_hours, DayCount, EstimationTotals};
use estimator_db::models::dashboard::{DashboardCounts, ProjectEstimationSummary};
use estimator_db::repositories::DashboardRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// A project rollup with the latest estimation converted to days.
#[derive(Debug, Serialize)]
pub struct ProjectSummaryView {
    #[serde(flatten)]
    pub summary: ProjectEstimationSummary,
    pub latest_days: Option<DayCount>,
}

/// Payload of `GET /dashboard/summary`.
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    #[serde(flatten)]
    pub counts: DashboardCounts,
    pub totals: EstimationTotals,
    pub projects: Vec<ProjectSummaryView>,
}

/// GET /api/v1/dashboard/summary
pub async fn summary(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let counts = DashboardRepo::counts(&state.pool).await?;
    let projects = DashboardRepo::project_summaries(&state.pool)
        .await?
        .into_iter()
        .map(|summary| ProjectSummaryView {
            latest_days: summary.latest_total_hours.map(days_for_hours),
            summary,
        })
        .collect();

    Ok(Json(DataResponse {
        data: DashboardSummary {
            totals: EstimationTotals::from_total(counts.total_estimated_hours),
            counts,
            projects,
        },
    }))
}
