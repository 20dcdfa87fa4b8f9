//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod complexity;
pub mod dashboard;
pub mod estimation;
pub mod hour_mapping;
pub mod project;
pub mod screen;
pub mod screen_type;
