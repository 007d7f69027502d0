//! Domain types and DTOs
//!
//! Wire shapes shared with the frontend; all JSON field names are camelCase.

pub mod plan;

pub use plan::*;
