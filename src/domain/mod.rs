//! Domain layer: Admin API records and the insights computed over them
pub mod aggregates;
pub mod insights;
pub mod value_objects;
