//! Bounds and size validation for matrix layouts

use crate::FormatError;

/// Validate that `row` addresses an existing row
pub const fn check_row(row: usize, rows: usize) -> Result<(), FormatError> {
    if row >= rows {
        return Err(FormatError::RowOutOfRange);
    }
    Ok(())
}

/// Multiply two sizes with overflow protection
pub const fn checked_product(a: usize, b: usize) -> Result<usize, FormatError> {
    match a.checked_mul(b) {
        Some(product) => Ok(product),
        None => Err(FormatError::SizeOverflow),
    }
}

/// Validate that a byte length holds a whole number of `T` elements
///
/// Returns the element count.
pub const fn validate_array_bounds<T>(byte_len: u64) -> Result<u64, FormatError> {
    let element_size = core::mem::size_of::<T>() as u64;

    if element_size == 0 || byte_len % element_size != 0 {
        return Err(FormatError::InsufficientBuffer);
    }

    Ok(byte_len / element_size)
}
