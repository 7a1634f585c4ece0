//! filematrix - Disk-Resident Dense Matrices
//!
//! This library stores a dense two-dimensional matrix in a flat binary file
//! and keeps exactly one row in memory at a time. Working sets far larger
//! than RAM can be processed row by row.
//!
//! ## Architecture
//!
//! filematrix follows a format/implementation separation:
//!
//! - **filematrix-core**: Header layout, element encoding and bounds checks (no I/O)
//! - **filematrix**: The file-backed matrix, its row cache and file lifecycle
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use filematrix::FileMatrix;
//!
//! fn example() -> filematrix::Result<()> {
//!     let mut matrix = FileMatrix::<f64>::create(3, 3, "data/m.matrix")?;
//!     matrix.row_mut(1)?.copy_from_slice(&[4.0, 5.0, 6.0]);
//!
//!     // Byte-identical sibling at data/m_copy.matrix
//!     let copy = matrix.try_clone()?;
//!     assert!(matrix == copy);
//!
//!     matrix.scale(2.0)?;
//!     matrix.flush()?;
//!     for value in matrix.elements()? {
//!         println!("{}", value?);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## File format
//!
//! A matrix file is the row count and column count, each encoded as a
//! fixed-width little-endian integer, followed by `rows * columns` elements
//! in row-major order, also little-endian.

pub use filematrix_core::{
    // Element and index traits
    DataType, IndexType, MatrixElement,
    // Format definitions
    MatrixHeader, MatrixLayout,
    // Format errors
    FormatError,
};

pub mod config;
pub mod error;
pub mod iter;
pub mod lifecycle;
pub mod matrix;
pub mod row_cache;

pub use config::{MatrixOptions, WriteBack};
pub use error::{MatrixError, Result};
pub use iter::Elements;
pub use matrix::FileMatrix;
pub use row_cache::{CacheStats, PageFile, RowCache};
