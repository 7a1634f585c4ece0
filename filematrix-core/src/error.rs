//! Error types for matrix format operations

/// Errors that can occur while encoding, decoding or laying out a matrix file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// Buffer too short to hold the requested structure
    InsufficientBuffer,
    /// A stored index does not fit the index type or the host `usize`
    IndexOverflow,
    /// Layout size calculation would overflow
    SizeOverflow,
    /// Row index at or beyond the row count
    RowOutOfRange,
}

impl core::fmt::Display for FormatError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            FormatError::InsufficientBuffer => "Insufficient buffer space",
            FormatError::IndexOverflow => "Index value does not fit the index type",
            FormatError::SizeOverflow => "Matrix size calculation would overflow",
            FormatError::RowOutOfRange => "Row index out of range",
        };
        write!(f, "{msg}")
    }
}

impl core::error::Error for FormatError {}

/// Result type for format operations
pub type Result<T> = core::result::Result<T, FormatError>;
