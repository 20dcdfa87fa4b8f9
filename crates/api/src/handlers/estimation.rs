//! Handlers for estimations: live preview, atomic creation, reads and reports.
//!
//! Hours are always recomputed here from the hour mapping. Figures sent by
//! the client are only checked against the recomputed values, never stored
//! as-is.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use estimator_core::error::CoreError;
use estimator_core::estimation::{
    breakdown, calculate_line, summarize, validate_estimation, validate_line_count,
    validate_line_hours, verify_submitted_line, verify_submitted_total, BreakdownEntry, DayCount,
    EstimationTotals, LineEstimate, MissingMappingPolicy,
};
use estimator_core::pagination::{clamp_limit, clamp_offset};
use estimator_core::types::{DbId, Hours};
use estimator_db::models::estimation::{
    CreateEstimation, Estimation, EstimationDetail, NewEstimation, NewEstimationDetail,
    PreviewEstimation,
};
use estimator_db::models::screen::Screen;
use estimator_db::repositories::{
    ComplexityRepo, EstimationRepo, HourMappingRepo, ScreenRepo, ScreenTypeRepo,
};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::handlers::project::require_project;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// An estimation header with its day conversion and line items.
#[derive(Debug, Serialize)]
pub struct EstimationView {
    #[serde(flatten)]
    pub estimation: Estimation,
    pub days: DayCount,
    pub days_label: String,
    pub details: Vec<EstimationDetail>,
}

impl EstimationView {
    fn new(estimation: Estimation, details: Vec<EstimationDetail>) -> Self {
        let totals = EstimationTotals::from_total(estimation.total_hours);
        Self {
            estimation,
            days: totals.days,
            days_label: totals.days_label,
            details,
        }
    }
}

/// One priced line of a preview.
#[derive(Debug, Serialize)]
pub struct PreviewLineResult {
    pub line_number: usize,
    pub screen_id: Option<DbId>,
    pub complexity_id: DbId,
    pub complexity_name: String,
    pub screen_type_id: DbId,
    pub screen_type_name: String,
    pub calculated_hours: Hours,
    pub mapped: bool,
}

/// Live totals for a set of lines that has not been saved.
#[derive(Debug, Serialize)]
pub struct PreviewResult {
    pub lines: Vec<PreviewLineResult>,
    #[serde(flatten)]
    pub totals: EstimationTotals,
    pub unmapped_lines: usize,
    pub missing_mapping_policy: MissingMappingPolicy,
}

/// Breakdown of a saved estimation by complexity and by screen type.
#[derive(Debug, Serialize)]
pub struct EstimationReport {
    pub estimation: Estimation,
    #[serde(flatten)]
    pub totals: EstimationTotals,
    pub line_count: usize,
    /// Sum of the stored line hours; equals `total_hours` for every estimation.
    pub details_total_hours: i64,
    pub by_complexity: Vec<BreakdownEntry>,
    pub by_screen_type: Vec<BreakdownEntry>,
    pub lines: Vec<EstimationDetail>,
}

// ---------------------------------------------------------------------------
// Pricing
// ---------------------------------------------------------------------------

/// A line resolved against master data and priced from the hour mapping.
struct PricedLine {
    complexity_id: DbId,
    complexity_name: String,
    screen_type_id: DbId,
    screen_type_name: String,
    estimate: LineEstimate,
}

/// Resolve each `(complexity_id, screen_type_id)` pair and calculate its hours.
///
/// The hour mapping is loaded once and handed to the pure calculator.
async fn price_lines(state: &AppState, pairs: &[(DbId, DbId)]) -> AppResult<Vec<PricedLine>> {
    let complexity_ids: Vec<DbId> = pairs.iter().map(|&(c, _)| c).collect();
    let screen_type_ids: Vec<DbId> = pairs.iter().map(|&(_, s)| s).collect();

    let complexities: HashMap<DbId, String> = ComplexityRepo::find_by_ids(&state.pool, &complexity_ids)
        .await?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();
    let screen_types: HashMap<DbId, String> = ScreenTypeRepo::find_by_ids(&state.pool, &screen_type_ids)
        .await?
        .into_iter()
        .map(|s| (s.id, s.name))
        .collect();
    let matrix = HourMappingRepo::load_matrix(&state.pool).await?;
    let policy = state.config.missing_mapping_policy;

    pairs
        .iter()
        .enumerate()
        .map(|(index, &(complexity_id, screen_type_id))| -> AppResult<PricedLine> {
            let complexity_name = complexities.get(&complexity_id).ok_or(CoreError::NotFound {
                entity: "ComplexityLevel",
                id: complexity_id,
            })?;
            let screen_type_name = screen_types.get(&screen_type_id).ok_or(CoreError::NotFound {
                entity: "ScreenType",
                id: screen_type_id,
            })?;

            let estimate = calculate_line(&matrix, complexity_name, screen_type_name, policy)?;
            if !estimate.mapped {
                tracing::warn!(
                    line = index + 1,
                    complexity = %complexity_name,
                    screen_type = %screen_type_name,
                    "No hour mapping for pair, counting the line as 0 hours",
                );
            }

            Ok(PricedLine {
                complexity_id,
                complexity_name: complexity_name.clone(),
                screen_type_id,
                screen_type_name: screen_type_name.clone(),
                estimate,
            })
        })
        .collect()
}

/// Load the given screens, failing with 404 on the first unknown ID.
async fn require_screens(state: &AppState, ids: &[DbId]) -> AppResult<HashMap<DbId, Screen>> {
    let screens: HashMap<DbId, Screen> = ScreenRepo::find_by_ids(&state.pool, ids)
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();
    if let Some(&missing) = ids.iter().find(|id| !screens.contains_key(id)) {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Screen",
            id: missing,
        }));
    }
    Ok(screens)
}

// ---------------------------------------------------------------------------
// POST /estimations/preview
// ---------------------------------------------------------------------------

/// Price a set of lines and return live totals without saving anything.
pub async fn preview(
    State(state): State<AppState>,
    AppJson(body): AppJson<PreviewEstimation>,
) -> AppResult<impl IntoResponse> {
    validate_line_count(body.lines.len())?;

    let screen_ids: Vec<DbId> = body.lines.iter().filter_map(|l| l.screen_id).collect();
    if !screen_ids.is_empty() {
        require_screens(&state, &screen_ids).await?;
    }

    let pairs: Vec<(DbId, DbId)> = body
        .lines
        .iter()
        .map(|l| (l.complexity_id, l.screen_type_id))
        .collect();
    let priced = price_lines(&state, &pairs).await?;

    let totals = summarize(priced.iter().map(|p| p.estimate.hours));
    let unmapped_lines = priced.iter().filter(|p| !p.estimate.mapped).count();
    let lines = body
        .lines
        .iter()
        .zip(priced)
        .enumerate()
        .map(|(index, (line, p))| PreviewLineResult {
            line_number: index + 1,
            screen_id: line.screen_id,
            complexity_id: p.complexity_id,
            complexity_name: p.complexity_name,
            screen_type_id: p.screen_type_id,
            screen_type_name: p.screen_type_name,
            calculated_hours: p.estimate.hours,
            mapped: p.estimate.mapped,
        })
        .collect();

    Ok(Json(DataResponse {
        data: PreviewResult {
            lines,
            totals,
            unmapped_lines,
            missing_mapping_policy: state.config.missing_mapping_policy,
        },
    }))
}

// ---------------------------------------------------------------------------
// POST /estimations
// ---------------------------------------------------------------------------

/// Create an estimation and all of its lines in one transaction.
///
/// Line hours and the total are recomputed from the hour mapping. A
/// client-supplied `total_hours` or line `calculated_hours` that disagrees
/// is rejected with 400 rather than stored.
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateEstimation>,
) -> AppResult<(StatusCode, Json<EstimationView>)> {
    let header = validate_estimation(&input.name, &input.version_number, input.details.len())?;
    require_project(&state, input.project_id).await?;

    let screen_ids: Vec<DbId> = input.details.iter().map(|d| d.screen_id).collect();
    let screens = require_screens(&state, &screen_ids).await?;
    if let Some(foreign) = screens.values().find(|s| s.project_id != input.project_id) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Screen {} does not belong to project {}",
            foreign.id, input.project_id
        ))));
    }

    let pairs: Vec<(DbId, DbId)> = input
        .details
        .iter()
        .map(|d| (d.complexity_id, d.screen_type_id))
        .collect();
    let priced = price_lines(&state, &pairs).await?;

    for (index, (detail, line)) in input.details.iter().zip(&priced).enumerate() {
        validate_line_hours(line.estimate.hours)?;
        verify_submitted_line(index, detail.calculated_hours, line.estimate.hours)?;
    }
    let totals = summarize(priced.iter().map(|p| p.estimate.hours));
    verify_submitted_total(input.total_hours, totals.total_hours)?;

    let details: Vec<NewEstimationDetail> = input
        .details
        .iter()
        .zip(&priced)
        .map(|(detail, line)| NewEstimationDetail {
            screen_id: detail.screen_id,
            complexity_id: line.complexity_id,
            screen_type_id: line.screen_type_id,
            calculated_hours: line.estimate.hours,
        })
        .collect();
    let new_estimation = NewEstimation {
        project_id: input.project_id,
        name: header.name,
        version_number: header.version_number,
        total_hours: totals.total_hours,
        notes: input.notes,
        created_by: input.created_by,
    };

    let estimation = EstimationRepo::create(&state.pool, &new_estimation, &details).await?;
    tracing::info!(
        id = estimation.id,
        project_id = estimation.project_id,
        version = %estimation.version_number,
        lines = details.len(),
        total_hours = estimation.total_hours,
        "Estimation created",
    );

    let stored = EstimationRepo::list_details(&state.pool, estimation.id).await?;
    Ok((StatusCode::CREATED, Json(EstimationView::new(estimation, stored))))
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/v1/estimations?limit=&offset=
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PaginationParams>,
) -> AppResult<Json<Vec<Estimation>>> {
    let limit = clamp_limit(params.limit, 50, 200);
    let offset = clamp_offset(params.offset);

    let estimations = EstimationRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(estimations))
}

/// GET /api/v1/projects/{id}/estimations
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<Estimation>>> {
    require_project(&state, project_id).await?;
    let estimations = EstimationRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(estimations))
}

/// GET /api/v1/estimations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<EstimationView>> {
    let estimation = require_estimation(&state, id).await?;
    let details = EstimationRepo::list_details(&state.pool, id).await?;
    Ok(Json(EstimationView::new(estimation, details)))
}

/// GET /api/v1/estimations/{id}/report
pub async fn report(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let estimation = require_estimation(&state, id).await?;
    let lines = EstimationRepo::list_details(&state.pool, id).await?;

    let by_complexity = breakdown(
        lines
            .iter()
            .map(|l| (l.complexity_name.as_str(), l.calculated_hours)),
    );
    let by_screen_type = breakdown(
        lines
            .iter()
            .map(|l| (l.screen_type_name.as_str(), l.calculated_hours)),
    );
    let details_total_hours = summarize(lines.iter().map(|l| l.calculated_hours)).total_hours;

    Ok(Json(DataResponse {
        data: EstimationReport {
            totals: EstimationTotals::from_total(estimation.total_hours),
            estimation,
            line_count: lines.len(),
            details_total_hours,
            by_complexity,
            by_screen_type,
            lines,
        },
    }))
}

async fn require_estimation(state: &AppState, id: DbId) -> AppResult<Estimation> {
    EstimationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Estimation",
            id,
        }))
}
