//! Handlers for the hour mapping table and its matrix view.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use estimator_core::error::CoreError;
use estimator_core::hour_mapping::{build_grid, MatrixRow};
use estimator_core::types::{DbId, Hours};
use estimator_core::validation::{validate_name, validate_non_negative_hours};
use estimator_db::models::hour_mapping::{HourMapping, UpsertHourMapping};
use estimator_db::repositories::{ComplexityRepo, HourMappingRepo, ScreenTypeRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::query::LookupParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Result of a single-pair lookup.
#[derive(Debug, Serialize)]
pub struct LookupResult {
    pub complexity: String,
    pub screen_type: String,
    pub hours: Option<Hours>,
    pub mapped: bool,
}

/// Matrix view: the row and column order plus every cell.
#[derive(Debug, Serialize)]
pub struct MatrixView {
    pub complexities: Vec<String>,
    pub screen_types: Vec<String>,
    pub rows: Vec<MatrixRow>,
}

/// GET /api/v1/hour-mappings
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<HourMapping>>> {
    let mappings = HourMappingRepo::list(&state.pool).await?;
    Ok(Json(mappings))
}

/// PUT /api/v1/hour-mappings
///
/// Inserts the pair or replaces its hours (last write wins). Existing
/// estimations keep the hours they were created with.
pub async fn upsert(
    State(state): State<AppState>,
    AppJson(input): AppJson<UpsertHourMapping>,
) -> AppResult<Json<HourMapping>> {
    validate_non_negative_hours(input.hours, "hours")?;
    let input = UpsertHourMapping {
        complexity_name: validate_name(&input.complexity_name, "complexity_name")?,
        screen_type_name: validate_name(&input.screen_type_name, "screen_type_name")?,
        hours: input.hours,
    };

    if !ComplexityRepo::exists_by_name(&state.pool, &input.complexity_name).await? {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown complexity '{}'",
            input.complexity_name
        ))));
    }
    if !ScreenTypeRepo::exists_by_name(&state.pool, &input.screen_type_name).await? {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown screen type '{}'",
            input.screen_type_name
        ))));
    }

    let mapping = HourMappingRepo::upsert(&state.pool, &input).await?;
    tracing::info!(
        id = mapping.id,
        complexity = %mapping.complexity_name,
        screen_type = %mapping.screen_type_name,
        hours = mapping.hours,
        "Hour mapping saved",
    );
    Ok(Json(mapping))
}

/// GET /api/v1/hour-mappings/lookup?complexity=&screen_type=
pub async fn lookup(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<LookupParams>,
) -> AppResult<impl IntoResponse> {
    let hours = HourMappingRepo::lookup(&state.pool, &params.complexity, &params.screen_type).await?;
    Ok(Json(DataResponse {
        data: LookupResult {
            complexity: params.complexity,
            screen_type: params.screen_type,
            hours,
            mapped: hours.is_some(),
        },
    }))
}

/// GET /api/v1/hour-mappings/matrix
///
/// Every complexity against every screen type, in master-data order, with
/// `null` for unmapped cells.
pub async fn matrix(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let complexities: Vec<String> = ComplexityRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(|c| c.name)
        .collect();
    let screen_types: Vec<String> = ScreenTypeRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(|s| s.name)
        .collect();
    let matrix = HourMappingRepo::load_matrix(&state.pool).await?;

    let complexity_refs: Vec<&str> = complexities.iter().map(String::as_str).collect();
    let screen_type_refs: Vec<&str> = screen_types.iter().map(String::as_str).collect();
    let rows = build_grid(&matrix, &complexity_refs, &screen_type_refs);

    Ok(Json(DataResponse {
        data: MatrixView {
            complexities,
            screen_types,
            rows,
        },
    }))
}

/// DELETE /api/v1/hour-mappings/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = HourMappingRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(id, "Hour mapping deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "HourMapping",
            id,
        }))
    }
}
