pub mod dashboard;
pub mod estimation;
pub mod health;
pub mod hour_mapping;
pub mod master_data;
pub mod project;
pub mod screen;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /complexities                                    list, create
/// /complexities/{id}                               get, update, delete
/// /screen-types                                    list, create
/// /screen-types/{id}                               get, update, delete
///
/// /hour-mappings                                   list, upsert (PUT)
/// /hour-mappings/lookup                            single pair lookup (GET)
/// /hour-mappings/matrix                            complexity x screen type grid (GET)
/// /hour-mappings/{id}                              delete
///
/// /projects                                        list, create
/// /projects/{id}                                   get, update, delete
/// /projects/{id}/screens                           list, create
/// /projects/{id}/estimations                       list
/// /screens/{id}                                    get, update, delete
///
/// /estimations                                     list (paginated), create
/// /estimations/preview                             live totals, nothing saved (POST)
/// /estimations/{id}                                get with details
/// /estimations/{id}/report                         breakdown report (GET)
///
/// /dashboard/summary                               counts and per-project rollup (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/complexities", master_data::complexity_router())
        .nest("/screen-types", master_data::screen_type_router())
        .nest("/hour-mappings", hour_mapping::router())
        .nest("/projects", project::router())
        .nest("/screens", screen::router())
        .nest("/estimations", estimation::router())
        .nest("/dashboard", dashboard::router())
}
