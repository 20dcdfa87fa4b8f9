//! Route definitions for complexity levels and screen types.

use axum::routing::get;
use axum::Router;

use crate::handlers::{complexity, screen_type};
use crate::state::AppState;

/// Routes mounted at `/complexities`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn complexity_router() -> Router<AppState> {
    Router::new()
        .route("/", get(complexity::list).post(complexity::create))
        .route(
            "/{id}",
            get(complexity::get_by_id)
                .put(complexity::update)
                .delete(complexity::delete),
        )
}

/// Routes mounted at `/screen-types`. Same shape as [`complexity_router`].
pub fn screen_type_router() -> Router<AppState> {
    Router::new()
        .route("/", get(screen_type::list).post(screen_type::create))
        .route(
            "/{id}",
            get(screen_type::get_by_id)
                .put(screen_type::update)
                .delete(screen_type::delete),
        )
}
