//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use estimator_core::error::CoreError;
use estimator_core::types::DbId;
use estimator_core::validation::{validate_name, validate_optional_name};
use estimator_db::models::project::{CreateProject, Project, UpdateProject};
use estimator_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::state::AppState;

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let input = CreateProject {
        name: validate_name(&input.name, "name")?,
        ..input
    };
    let project = ProjectRepo::create(&state.pool, &input).await?;
    tracing::info!(id = project.id, name = %project.name, "Project created");
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list(&state.pool).await?;
    Ok(Json(projects))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(project))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<UpdateProject>,
) -> AppResult<Json<Project>> {
    let input = UpdateProject {
        name: validate_optional_name(input.name.as_deref(), "name")?,
        ..input
    };
    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    tracing::info!(id, name = %project.name, "Project updated");
    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
///
/// Removes the project's screens with it. Refused with 409 once the project
/// has estimations, which are never deleted.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if ProjectRepo::has_estimations(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Project {id} has estimations and cannot be deleted"
        ))));
    }

    let deleted = ProjectRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(id, "Project deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
    }
}

/// Load a project or fail with 404. Shared by project-scoped handlers.
pub(crate) async fn require_project(state: &AppState, id: DbId) -> AppResult<Project> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
}
