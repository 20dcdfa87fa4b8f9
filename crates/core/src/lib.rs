//! Domain types and pure logic for screen-based project estimation.
//!
//! Nothing in this crate performs I/O. The database and HTTP layers feed it
//! rows and call into it for hour calculation, aggregation and validation.

pub mod error;
pub mod estimation;
pub mod hour_mapping;
pub mod pagination;
pub mod types;
pub mod validation;
