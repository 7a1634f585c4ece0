//! Error types for matrix file operations

use filematrix_core::FormatError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while operating on a file-backed matrix
#[derive(Debug, Error)]
pub enum MatrixError {
    /// Row index at or beyond the row count; raised before any I/O
    #[error("row {row} out of range for matrix with {rows} rows")]
    OutOfRange { row: u64, rows: u64 },

    /// Column index at or beyond the column count
    #[error("column {column} out of range for matrix with {columns} columns")]
    ColumnOutOfRange { column: usize, columns: usize },

    /// The resident row has mutations not yet written to the file
    #[error("row {row} has unflushed changes; call flush first")]
    UnflushedRow { row: u64 },

    /// Underlying read, write, seek, open or rename failed
    #[error("failed to {op} {}: {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File length disagrees with the dimensions in its header
    #[error("{} is {actual} bytes but its header describes {expected} bytes", .path.display())]
    SizeMismatch {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },

    /// Header or layout could not be encoded or decoded
    #[error("invalid matrix format: {0}")]
    Format(#[from] FormatError),
}

impl MatrixError {
    pub(crate) fn io(
        op: &'static str,
        path: impl Into<PathBuf>,
    ) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| MatrixError::Io { op, path, source }
    }
}

/// Result type for matrix operations
pub type Result<T> = std::result::Result<T, MatrixError>;
