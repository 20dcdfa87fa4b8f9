//! Handlers for the `/complexities` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use estimator_core::error::CoreError;
use estimator_core::types::DbId;
use estimator_core::validation::{validate_name, validate_optional_name, validate_positive_hours};
use estimator_db::models::complexity::{
    ComplexityLevel, CreateComplexityLevel, UpdateComplexityLevel,
};
use estimator_db::repositories::ComplexityRepo;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::state::AppState;

/// POST /api/v1/complexities
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateComplexityLevel>,
) -> AppResult<(StatusCode, Json<ComplexityLevel>)> {
    validate_positive_hours(input.hours, "hours")?;
    let input = CreateComplexityLevel {
        name: validate_name(&input.name, "name")?,
        ..input
    };

    let level = ComplexityRepo::create(&state.pool, &input).await?;
    tracing::info!(id = level.id, name = %level.name, hours = level.hours, "Complexity level created");
    Ok((StatusCode::CREATED, Json(level)))
}

/// GET /api/v1/complexities
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ComplexityLevel>>> {
    let levels = ComplexityRepo::list(&state.pool).await?;
    Ok(Json(levels))
}

/// GET /api/v1/complexities/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ComplexityLevel>> {
    let level = ComplexityRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ComplexityLevel",
            id,
        }))?;
    Ok(Json(level))
}

/// PUT /api/v1/complexities/{id}
///
/// Renaming also renames the level in every hour mapping row.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateComplexityLevel>,
) -> AppResult<Json<ComplexityLevel>> {
    if let Some(hours) = input.hours {
        validate_positive_hours(hours, "hours")?;
    }
    let input = UpdateComplexityLevel {
        name: validate_optional_name(input.name.as_deref(), "name")?,
        ..input
    };

    let level = ComplexityRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ComplexityLevel",
            id,
        }))?;
    tracing::info!(id, name = %level.name, hours = level.hours, "Complexity level updated");
    Ok(Json(level))
}

/// DELETE /api/v1/complexities/{id}
///
/// Refused with 409 while any estimation line references the level.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if ComplexityRepo::is_referenced(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "ComplexityLevel {id} is used by existing estimations"
        ))));
    }

    let deleted = ComplexityRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(id, "Complexity level deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "ComplexityLevel",
            id,
        }))
    }
}
