//! Validation helpers for matrix layouts
//!
//! Pure checks with no I/O: row bounds and overflow-safe size arithmetic.

pub mod bounds;

pub use bounds::{check_row, checked_product, validate_array_bounds};
