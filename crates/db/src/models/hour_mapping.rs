//! Hour mapping model: the (complexity, screen type) -> hours table.

use estimator_core::types::{DbId, Hours, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `hour_mappings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HourMapping {
    pub id: DbId,
    pub complexity_name: String,
    pub screen_type_name: String,
    pub hours: Hours,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting or replacing the hours of one pair.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertHourMapping {
    pub complexity_name: String,
    pub screen_type_name: String,
    pub hours: Hours,
}
