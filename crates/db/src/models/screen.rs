//! Screen entity model and DTOs. Every screen belongs to one project.

use estimator_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `screens` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Screen {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a screen. The project comes from the URL path.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScreen {
    pub name: String,
    pub description: Option<String>,
}

/// DTO for updating an existing screen. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateScreen {
    pub name: Option<String>,
    pub description: Option<String>,
}
