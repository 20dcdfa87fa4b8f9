//! Handlers for the `/screen-types` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use estimator_core::error::CoreError;
use estimator_core::types::DbId;
use estimator_core::validation::{validate_name, validate_optional_name, validate_positive_hours};
use estimator_db::models::screen_type::{CreateScreenType, ScreenType, UpdateScreenType};
use estimator_db::repositories::ScreenTypeRepo;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::state::AppState;

/// POST /api/v1/screen-types
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateScreenType>,
) -> AppResult<(StatusCode, Json<ScreenType>)> {
    validate_positive_hours(input.hours, "hours")?;
    let input = CreateScreenType {
        name: validate_name(&input.name, "name")?,
        ..input
    };

    let screen_type = ScreenTypeRepo::create(&state.pool, &input).await?;
    tracing::info!(id = screen_type.id, name = %screen_type.name, hours = screen_type.hours, "Screen type created");
    Ok((StatusCode::CREATED, Json(screen_type)))
}

/// GET /api/v1/screen-types
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ScreenType>>> {
    let screen_types = ScreenTypeRepo::list(&state.pool).await?;
    Ok(Json(screen_types))
}

/// GET /api/v1/screen-types/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ScreenType>> {
    let screen_type = ScreenTypeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ScreenType",
            id,
        }))?;
    Ok(Json(screen_type))
}

/// PUT /api/v1/screen-types/{id}
///
/// Renaming also renames the screen type in every hour mapping row.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateScreenType>,
) -> AppResult<Json<ScreenType>> {
    if let Some(hours) = input.hours {
        validate_positive_hours(hours, "hours")?;
    }
    let input = UpdateScreenType {
        name: validate_optional_name(input.name.as_deref(), "name")?,
        ..input
    };

    let screen_type = ScreenTypeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ScreenType",
            id,
        }))?;
    tracing::info!(id, name = %screen_type.name, hours = screen_type.hours, "Screen type updated");
    Ok(Json(screen_type))
}

/// DELETE /api/v1/screen-types/{id}
///
/// Refused with 409 while any estimation line references the screen type.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if ScreenTypeRepo::is_referenced(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "ScreenType {id} is used by existing estimations"
        ))));
    }

    let deleted = ScreenTypeRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(id, "Screen type deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "ScreenType",
            id,
        }))
    }
}
