//! Matrix file header format
//!
//! The header is two fixed-width index fields, rows then columns, stored
//! little-endian at the start of the file. The element data follows
//! immediately with no padding.

use super::constants::HEADER_FIELDS;
use super::layout::MatrixLayout;
use crate::{FormatError, IndexType, MatrixElement, Result};

#[cfg(feature = "alloc")]
extern crate alloc;

/// Header for .matrix files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatrixHeader<I: IndexType> {
    /// Number of rows
    pub rows: I,
    /// Number of columns
    pub columns: I,
}

impl<I: IndexType> MatrixHeader<I> {
    /// Size of the header in bytes
    pub const SIZE: usize = HEADER_FIELDS * I::WIDTH;

    /// Create a header for the given dimensions
    pub const fn new(rows: I, columns: I) -> Self {
        Self { rows, columns }
    }

    /// Dimensions as host indices
    pub fn dimensions(&self) -> Result<(usize, usize)> {
        let rows = self.rows.to_usize().ok_or(FormatError::IndexOverflow)?;
        let columns = self.columns.to_usize().ok_or(FormatError::IndexOverflow)?;
        Ok((rows, columns))
    }

    /// Compute the file layout for element type `T`
    pub fn layout<T: MatrixElement>(&self) -> Result<MatrixLayout> {
        let (rows, columns) = self.dimensions()?;
        MatrixLayout::new(rows, columns, T::data_type().size_bytes(), Self::SIZE)
    }

    /// Parse header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(FormatError::InsufficientBuffer);
        }

        let rows = I::read_le(&bytes[..I::WIDTH])?;
        let columns = I::read_le(&bytes[I::WIDTH..Self::SIZE])?;

        Ok(Self { rows, columns })
    }

    /// Encode the header into the first `SIZE` bytes of `out`
    pub fn write_to(&self, out: &mut [u8]) -> Result<()> {
        if out.len() < Self::SIZE {
            return Err(FormatError::InsufficientBuffer);
        }
        self.rows.write_le(&mut out[..I::WIDTH])?;
        self.columns.write_le(&mut out[I::WIDTH..Self::SIZE])?;
        Ok(())
    }

    /// Convert header to bytes (requires alloc feature)
    #[cfg(feature = "alloc")]
    pub fn to_bytes(&self) -> alloc::vec::Vec<u8> {
        let mut bytes = alloc::vec![0u8; Self::SIZE];
        // The buffer is exactly SIZE bytes, so encoding cannot fail
        let _ = self.write_to(&mut bytes);
        bytes
    }
}
