//! Route definitions for the `/projects` resource.
//!
//! Also mounts project-scoped screen and estimation routes under
//! `/projects/{id}/...`. All routes in a segment must share the `{id}` name.

use axum::routing::get;
use axum::Router;

use crate::handlers::{estimation, project, screen};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                              -> list
/// POST   /                              -> create
/// GET    /{id}                          -> get_by_id
/// PUT    /{id}                          -> update
/// DELETE /{id}                          -> delete
///
/// GET    /{id}/screens                  -> screen::list_by_project
/// POST   /{id}/screens                  -> screen::create
///
/// GET    /{id}/estimations              -> estimation::list_by_project
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route(
            "/{id}/screens",
            get(screen::list_by_project).post(screen::create),
        )
        .route("/{id}/estimations", get(estimation::list_by_project))
}
