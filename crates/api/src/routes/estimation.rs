//! Route definitions for estimations.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::estimation;
use crate::state::AppState;

/// Routes mounted at `/estimations`.
///
/// ```text
/// GET  /               -> list
/// POST /               -> create
/// POST /preview        -> preview
/// GET  /{id}           -> get_by_id
/// GET  /{id}/report    -> report
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(estimation::list).post(estimation::create))
        .route("/preview", post(estimation::preview))
        .route("/{id}", get(estimation::get_by_id))
        .route("/{id}/report", get(estimation::report))
}
