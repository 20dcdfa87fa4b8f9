pub mod complexity;
pub mod dashboard;
pub mod estimation;
pub mod hour_mapping;
pub mod project;
pub mod screen;
pub mod screen_type;
