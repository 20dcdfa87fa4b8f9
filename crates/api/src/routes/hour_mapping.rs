//! Route definitions for the hour mapping table.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::hour_mapping;
use crate::state::AppState;

/// Routes mounted at `/hour-mappings`.
///
/// ```text
/// GET    /          -> list
/// PUT    /          -> upsert
/// GET    /lookup    -> lookup
/// GET    /matrix    -> matrix
/// DELETE /{id}      -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(hour_mapping::list).put(hour_mapping::upsert))
        .route("/lookup", get(hour_mapping::lookup))
        .route("/matrix", get(hour_mapping::matrix))
        .route("/{id}", delete(hour_mapping::delete))
}
