//! Complexity level entity model and DTOs.

use estimator_core::types::{DbId, Hours, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `complexity_levels` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ComplexityLevel {
    pub id: DbId,
    pub name: String,
    pub hours: Hours,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new complexity level.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateComplexityLevel {
    pub name: String,
    pub hours: Hours,
    pub description: Option<String>,
}

/// DTO for updating an existing complexity level. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateComplexityLevel {
    pub name: Option<String>,
    pub hours: Option<Hours>,
    pub description: Option<String>,
}
