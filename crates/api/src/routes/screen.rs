//! Route definitions for individual screens.

use axum::routing::get;
use axum::Router;

use crate::handlers::screen;
use crate::state::AppState;

/// Routes mounted at `/screens`.
///
/// ```text
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(screen::get_by_id)
            .put(screen::update)
            .delete(screen::delete),
    )
}
