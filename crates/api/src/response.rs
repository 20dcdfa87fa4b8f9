//! Shared response envelope types for API handlers.
//!
//! Computed payloads (previews, reports, dashboards) use a `{ "data": ... }`
//! envelope. Plain entity CRUD responses return the entity directly.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: report }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
