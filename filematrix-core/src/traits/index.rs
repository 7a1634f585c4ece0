//! Index integer types used for matrix dimensions
//!
//! The row and column counts stored in the file header are encoded with a
//! fixed width and little-endian byte order, independent of the host.

/// Trait for integer types that can describe matrix dimensions
pub trait IndexType:
    Copy
    + Default
    + Ord
    + core::hash::Hash
    + core::fmt::Debug
    + core::fmt::Display
    + Send
    + Sync
    + 'static
{
    /// Encoded width of one header field in bytes
    const WIDTH: usize;

    /// Widen to u64
    fn to_u64(self) -> u64;

    /// Narrow from u64, `None` if the value does not fit
    fn from_u64(value: u64) -> Option<Self>;

    /// Convert to a host index, `None` if the value does not fit
    fn to_usize(self) -> Option<usize> {
        usize::try_from(self.to_u64()).ok()
    }

    /// Write the little-endian encoding into the first `WIDTH` bytes of `out`
    fn write_le(self, out: &mut [u8]) -> crate::Result<()> {
        if out.len() < Self::WIDTH {
            return Err(crate::FormatError::InsufficientBuffer);
        }
        let bytes = self.to_u64().to_le_bytes();
        out[..Self::WIDTH].copy_from_slice(&bytes[..Self::WIDTH]);
        Ok(())
    }

    /// Read a little-endian encoded value from the first `WIDTH` bytes
    fn read_le(bytes: &[u8]) -> crate::Result<Self> {
        if bytes.len() < Self::WIDTH {
            return Err(crate::FormatError::InsufficientBuffer);
        }
        let mut wide = [0u8; 8];
        wide[..Self::WIDTH].copy_from_slice(&bytes[..Self::WIDTH]);
        Self::from_u64(u64::from_le_bytes(wide)).ok_or(crate::FormatError::IndexOverflow)
    }
}

macro_rules! impl_index_type {
    ($type:ty, $width:expr) => {
        impl IndexType for $type {
            const WIDTH: usize = $width;

            fn to_u64(self) -> u64 {
                self as u64
            }

            fn from_u64(value: u64) -> Option<Self> {
                <$type>::try_from(value).ok()
            }
        }
    };
}

impl_index_type!(u16, 2);
impl_index_type!(u32, 4);
impl_index_type!(u64, 8);
// usize is always stored as 8 bytes so files move between 32- and 64-bit hosts
impl_index_type!(usize, 8);
