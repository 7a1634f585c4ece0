#![no_std]

//! filematrix-core - Binary Layout Definitions for Disk-Resident Dense Matrices
//!
//! This crate provides the pure format definitions, element traits and
//! validation helpers shared by `filematrix`. Nothing here performs I/O.

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod error;
pub mod format;
pub mod traits;
pub mod validation;

pub use error::*;
pub use format::*;
pub use traits::*;
pub use validation::*;
