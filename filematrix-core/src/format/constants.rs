//! Format constants for matrix files

/// File extension used for matrix files
pub const EXTENSION: &str = ".matrix";

/// Suffix inserted before the extension of a copied matrix file
pub const COPY_SUFFIX: &str = "_copy";

/// Suffix inserted before the extension of a moved matrix file
pub const MOVE_SUFFIX: &str = "_move";

/// Number of index fields in the header (rows, columns)
pub const HEADER_FIELDS: usize = 2;
