use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("No hour mapping for complexity '{complexity}' and screen type '{screen_type}'")]
    MappingMissing {
        complexity: String,
        screen_type: String,
    },

    #[error("Conflict: {0}")]
    Conflict(String),
}
