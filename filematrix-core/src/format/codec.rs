//! Row encoding between native element buffers and little-endian file bytes
//!
//! On little-endian targets both directions are a plain byte view of the
//! buffer; big-endian targets swap every element.

use crate::MatrixElement;

#[cfg(feature = "alloc")]
use alloc::{borrow::Cow, vec::Vec};

/// View a row buffer as the bytes a file read should fill
///
/// After filling, call [`decode_row_in_place`] to convert to native order.
pub fn row_bytes_mut<T: MatrixElement>(row: &mut [T]) -> &mut [u8] {
    bytemuck::cast_slice_mut(row)
}

/// Convert a row just read from disk to native byte order
pub fn decode_row_in_place<T: MatrixElement>(row: &mut [T]) {
    if cfg!(target_endian = "big") {
        for value in row.iter_mut() {
            *value = T::from_le(*value);
        }
    }
}

/// Decode a single element from its little-endian bytes
pub fn decode_element<T: MatrixElement>(bytes: &[u8]) -> crate::Result<T> {
    if bytes.len() < T::size_bytes() {
        return Err(crate::FormatError::InsufficientBuffer);
    }
    let stored: T = bytemuck::pod_read_unaligned(&bytes[..T::size_bytes()]);
    Ok(T::from_le(stored))
}

/// Encode a row into the bytes written to disk
#[cfg(feature = "alloc")]
pub fn encode_row<T: MatrixElement>(row: &[T]) -> Cow<'_, [u8]> {
    if cfg!(target_endian = "little") {
        Cow::Borrowed(bytemuck::cast_slice(row))
    } else {
        let stored: Vec<T> = row.iter().map(|value| value.to_le()).collect();
        Cow::Owned(bytemuck::cast_slice(&stored).to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_element_little_endian() {
        let bytes = [0x01, 0x00, 0x00, 0x00, 0xFF];
        assert_eq!(decode_element::<i32>(&bytes), Ok(1));
        assert_eq!(
            decode_element::<u64>(&bytes),
            Err(crate::FormatError::InsufficientBuffer)
        );
    }

    #[test]
    fn test_row_bytes_view_length() {
        let mut row = [0u32; 5];
        assert_eq!(row_bytes_mut(&mut row).len(), 20);
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_encode_then_decode_restores_row() {
        let row = [1.5f32, -2.0, 0.0];
        let encoded = encode_row(&row);
        assert_eq!(encoded.len(), 12);
        assert_eq!(&encoded[..4], &1.5f32.to_le_bytes());

        let mut decoded = [0f32; 3];
        row_bytes_mut(&mut decoded).copy_from_slice(&encoded);
        decode_row_in_place(&mut decoded);
        assert_eq!(decoded, row);
    }
}
