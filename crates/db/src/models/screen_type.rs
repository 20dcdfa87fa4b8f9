//! Screen type entity model and DTOs.

use estimator_core::types::{DbId, Hours, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `screen_types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ScreenType {
    pub id: DbId,
    pub name: String,
    pub hours: Hours,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new screen type.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScreenType {
    pub name: String,
    pub hours: Hours,
    pub description: Option<String>,
}

/// DTO for updating an existing screen type. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateScreenType {
    pub name: Option<String>,
    pub hours: Option<Hours>,
    pub description: Option<String>,
}
