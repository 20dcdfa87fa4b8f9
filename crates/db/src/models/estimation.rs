//! Estimation header and line-item models, plus request DTOs.
//!
//! Estimations are append-only: there is no update DTO.

use estimator_core::types::{DbId, Hours, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `estimations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Estimation {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub version_number: String,
    pub total_hours: i64,
    pub notes: Option<String>,
    pub created_by: Option<String>,
    pub created_at: Timestamp,
}

/// A row from `estimation_details` joined with the names it references.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EstimationDetail {
    pub id: DbId,
    pub estimation_id: DbId,
    pub line_number: i32,
    pub screen_id: DbId,
    pub screen_name: String,
    pub complexity_id: DbId,
    pub complexity_name: String,
    pub screen_type_id: DbId,
    pub screen_type_name: String,
    pub calculated_hours: Hours,
}

/// Header fields written by [`EstimationRepo::create`](crate::repositories::EstimationRepo::create).
///
/// `total_hours` has already been recomputed from the details by the caller.
#[derive(Debug, Clone)]
pub struct NewEstimation {
    pub project_id: DbId,
    pub name: String,
    pub version_number: String,
    pub total_hours: i64,
    pub notes: Option<String>,
    pub created_by: Option<String>,
}

/// One line item written alongside a [`NewEstimation`].
#[derive(Debug, Clone)]
pub struct NewEstimationDetail {
    pub screen_id: DbId,
    pub complexity_id: DbId,
    pub screen_type_id: DbId,
    pub calculated_hours: Hours,
}

/// Request body for `POST /estimations`.
///
/// `total_hours` and each line's `calculated_hours` are optional; when given
/// they must match what the server computes from the hour mapping.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEstimation {
    pub project_id: DbId,
    pub name: String,
    pub version_number: String,
    pub total_hours: Option<i64>,
    pub notes: Option<String>,
    pub created_by: Option<String>,
    pub details: Vec<CreateEstimationDetail>,
}

/// One line item in a [`CreateEstimation`] request.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEstimationDetail {
    pub screen_id: DbId,
    pub complexity_id: DbId,
    pub screen_type_id: DbId,
    pub calculated_hours: Option<Hours>,
}

/// Request body for `POST /estimations/preview`.
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewEstimation {
    pub lines: Vec<PreviewLine>,
}

/// One line of a preview. The screen is optional since nothing is saved.
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewLine {
    pub screen_id: Option<DbId>,
    pub complexity_id: DbId,
    pub screen_type_id: DbId,
}
