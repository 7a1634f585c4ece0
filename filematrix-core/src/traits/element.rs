//! Matrix element type constraints
//!
//! This module defines the trait that constrains what types can be
//! stored as elements of a dense matrix file.

use bytemuck::Pod;

/// Element types supported by the matrix file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum DataType {
    /// 32-bit floating point
    F32 = 0,
    /// 64-bit floating point
    F64 = 1,
    /// 32-bit signed integer
    I32 = 2,
    /// 64-bit signed integer
    I64 = 3,
    /// 32-bit unsigned integer
    U32 = 4,
    /// 64-bit unsigned integer
    U64 = 5,
}

impl DataType {
    /// Get the size in bytes for this data type
    pub const fn size_bytes(self) -> usize {
        match self {
            DataType::F32 | DataType::I32 | DataType::U32 => 4,
            DataType::F64 | DataType::I64 | DataType::U64 => 8,
        }
    }
}

impl core::fmt::Display for DataType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DataType::F32 => write!(f, "f32"),
            DataType::F64 => write!(f, "f64"),
            DataType::I32 => write!(f, "i32"),
            DataType::I64 => write!(f, "i64"),
            DataType::U32 => write!(f, "u32"),
            DataType::U64 => write!(f, "u64"),
        }
    }
}

/// Trait for types that can be stored as matrix elements
///
/// Elements must be plain old data so a row buffer can be viewed as raw
/// bytes, and the all-zero bit pattern must be a valid value so a freshly
/// created file decodes to zeros.
pub trait MatrixElement:
    Pod + PartialEq + core::fmt::Debug + Send + Sync + 'static
{
    /// Get the DataType representation for this element type
    fn data_type() -> DataType;

    /// Get the size in bytes of this element type
    fn size_bytes() -> usize {
        core::mem::size_of::<Self>()
    }

    /// Convert a native value to its little-endian storage representation
    ///
    /// On little-endian targets this is the identity. The conversion is its
    /// own inverse, so it is also used when decoding.
    fn to_le(self) -> Self;

    /// Convert a little-endian storage value back to native representation
    fn from_le(stored: Self) -> Self {
        stored.to_le()
    }

    /// Multiply by a scalar
    ///
    /// Integer products wrap on overflow in every build profile; floats
    /// follow IEEE 754.
    fn scale_by(self, factor: Self) -> Self;
}

macro_rules! impl_int_element {
    ($type:ty, $variant:ident) => {
        impl MatrixElement for $type {
            fn data_type() -> DataType {
                DataType::$variant
            }

            fn to_le(self) -> Self {
                <$type>::to_le(self)
            }

            fn scale_by(self, factor: Self) -> Self {
                self.wrapping_mul(factor)
            }
        }
    };
}

macro_rules! impl_float_element {
    ($type:ty, $variant:ident) => {
        impl MatrixElement for $type {
            fn data_type() -> DataType {
                DataType::$variant
            }

            fn to_le(self) -> Self {
                <$type>::from_bits(self.to_bits().to_le())
            }

            fn scale_by(self, factor: Self) -> Self {
                self * factor
            }
        }
    };
}

impl_float_element!(f32, F32);
impl_float_element!(f64, F64);
impl_int_element!(i32, I32);
impl_int_element!(i64, I64);
impl_int_element!(u32, U32);
impl_int_element!(u64, U64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_sizes_match_elements() {
        assert_eq!(f32::data_type().size_bytes(), f32::size_bytes());
        assert_eq!(f64::data_type().size_bytes(), f64::size_bytes());
        assert_eq!(i32::data_type().size_bytes(), i32::size_bytes());
        assert_eq!(u64::data_type().size_bytes(), u64::size_bytes());
    }

    #[test]
    fn test_le_conversion_is_involution() {
        let value = 0x0102_0304_i32;
        assert_eq!(<i32 as MatrixElement>::from_le(MatrixElement::to_le(value)), value);

        let value = -3.25_f64;
        assert_eq!(<f64 as MatrixElement>::from_le(MatrixElement::to_le(value)), value);
    }

    #[test]
    fn test_integer_scaling_wraps() {
        assert_eq!(u32::MAX.scale_by(2), u32::MAX - 1);
        assert_eq!(i64::MIN.scale_by(-1), i64::MIN);
        assert_eq!(7i32.scale_by(-3), -21);
    }

    #[test]
    fn test_float_scaling() {
        assert_eq!(1.5f32.scale_by(2.0), 3.0);
        assert!(f64::MAX.scale_by(2.0).is_infinite());
    }
}
