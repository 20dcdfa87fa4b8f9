//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod complexity_repo;
pub mod dashboard_repo;
pub mod estimation_repo;
pub mod hour_mapping_repo;
pub mod project_repo;
pub mod screen_repo;
pub mod screen_type_repo;

pub use complexity_repo::ComplexityRepo;
pub use dashboard_repo::DashboardRepo;
pub use estimation_repo::EstimationRepo;
pub use hour_mapping_repo::HourMappingRepo;
pub use project_repo::ProjectRepo;
pub use screen_repo::ScreenRepo;
pub use screen_type_repo::ScreenTypeRepo;
