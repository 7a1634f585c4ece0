//! Byte offsets within a matrix file
//!
//! `MatrixLayout` validates every size product once at construction so that
//! offset lookups for in-range rows can never overflow.

use crate::validation::bounds::{check_row, checked_product};
use crate::Result;

/// Resolved byte layout of a matrix file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixLayout {
    rows: usize,
    columns: usize,
    element_size: usize,
    header_size: usize,
    row_bytes: usize,
    file_len: u64,
}

impl MatrixLayout {
    /// Build a layout with overflow-checked sizes
    pub fn new(
        rows: usize,
        columns: usize,
        element_size: usize,
        header_size: usize,
    ) -> Result<Self> {
        let row_bytes = checked_product(columns, element_size)?;
        let data_len = checked_product(rows, row_bytes)?;
        let file_len = (header_size as u64)
            .checked_add(data_len as u64)
            .ok_or(crate::FormatError::SizeOverflow)?;

        Ok(Self {
            rows,
            columns,
            element_size,
            header_size,
            row_bytes,
            file_len,
        })
    }

    pub const fn rows(&self) -> usize {
        self.rows
    }

    pub const fn columns(&self) -> usize {
        self.columns
    }

    pub const fn element_size(&self) -> usize {
        self.element_size
    }

    pub const fn header_size(&self) -> usize {
        self.header_size
    }

    /// Size of one row in bytes
    pub const fn row_bytes(&self) -> usize {
        self.row_bytes
    }

    /// Size of the element region in bytes
    pub const fn data_len(&self) -> u64 {
        self.file_len - self.header_size as u64
    }

    /// Expected total file length in bytes
    pub const fn file_len(&self) -> u64 {
        self.file_len
    }

    /// Byte offset of the first element of `row`
    pub fn row_offset(&self, row: usize) -> Result<u64> {
        check_row(row, self.rows)?;
        // row < rows, so this is bounded by file_len
        Ok(self.header_size as u64 + (row as u64) * (self.row_bytes as u64))
    }

    /// Byte range of `row` within the file
    pub fn row_range(&self, row: usize) -> Result<core::ops::Range<u64>> {
        let start = self.row_offset(row)?;
        Ok(start..start + self.row_bytes as u64)
    }
}
