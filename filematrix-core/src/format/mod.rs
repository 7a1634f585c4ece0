//! Binary format definitions for matrix files
//!
//! This module contains pure data structure definitions for the on-disk
//! layout. No I/O operations - only encoding, decoding and offsets.

pub mod codec;
pub mod constants;
pub mod header;
pub mod layout;

pub use codec::{decode_element, decode_row_in_place, row_bytes_mut};
#[cfg(feature = "alloc")]
pub use codec::encode_row;
pub use header::MatrixHeader;
pub use layout::MatrixLayout;
