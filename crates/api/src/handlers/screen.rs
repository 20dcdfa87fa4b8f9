//! Handlers for screens. Creation and listing are scoped to a project.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use estimator_core::error::CoreError;
use estimator_core::types::DbId;
use estimator_core::validation::{validate_name, validate_optional_name};
use estimator_db::models::screen::{CreateScreen, Screen, UpdateScreen};
use estimator_db::repositories::ScreenRepo;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::handlers::project::require_project;
use crate::state::AppState;

/// POST /api/v1/projects/{id}/screens
pub async fn create(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    AppJson(input): AppJson<CreateScreen>,
) -> AppResult<(StatusCode, Json<Screen>)> {
    require_project(&state, project_id).await?;
    let input = CreateScreen {
        name: validate_name(&input.name, "name")?,
        ..input
    };

    let screen = ScreenRepo::create(&state.pool, project_id, &input).await?;
    tracing::info!(id = screen.id, project_id, name = %screen.name, "Screen created");
    Ok((StatusCode::CREATED, Json(screen)))
}

/// GET /api/v1/projects/{id}/screens
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<Screen>>> {
    require_project(&state, project_id).await?;
    let screens = ScreenRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(screens))
}

/// GET /api/v1/screens/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Screen>> {
    let screen = ScreenRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Screen",
            id,
        }))?;
    Ok(Json(screen))
}

/// PUT /api/v1/screens/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateScreen>,
) -> AppResult<Json<Screen>> {
    let input = UpdateScreen {
        name: validate_optional_name(input.name.as_deref(), "name")?,
        ..input
    };
    let screen = ScreenRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Screen",
            id,
        }))?;
    tracing::info!(id, project_id = screen.project_id, name = %screen.name, "Screen updated");
    Ok(Json(screen))
}

/// DELETE /api/v1/screens/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if ScreenRepo::is_referenced(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Screen {id} is used by existing estimations"
        ))));
    }

    let deleted = ScreenRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(id, "Screen deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Screen",
            id,
        }))
    }
}
