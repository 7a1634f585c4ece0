//! Element and index type abstractions
//!
//! These traits constrain what can be stored in a matrix file and which
//! integer types may describe its dimensions.

pub mod element;
pub mod index;

pub use element::{DataType, MatrixElement};
pub use index::IndexType;
