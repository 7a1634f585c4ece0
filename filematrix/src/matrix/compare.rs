//! Content equality for file-backed matrices
//!
//! Both backing files are memory mapped and compared byte for byte. A
//! resident row is compared from its in-memory buffer instead of the file,
//! so the answer matches what flushing both sides first would give without
//! writing anything.

use super::FileMatrix;
use crate::error::{MatrixError, Result};
use filematrix_core::format::codec::encode_row;
use filematrix_core::{IndexType, MatrixElement, MatrixLayout};
use memmap2::{Mmap, MmapOptions};
use std::borrow::Cow;
use std::fs::File;
use std::path::Path;
use tracing::warn;

impl<T: MatrixElement, I: IndexType> FileMatrix<T, I> {
    /// Compare dimensions, then file contents
    ///
    /// Two matrices that are only bound (no dimensions established) compare
    /// equal to each other and unequal to any opened matrix.
    pub fn try_eq(&self, other: &Self) -> Result<bool> {
        if self.rows != other.rows || self.columns != other.columns {
            return Ok(false);
        }

        let (lhs, rhs) = match (self.mapped()?, other.mapped()?) {
            (Some(lhs), Some(rhs)) => (lhs, rhs),
            (None, None) => return Ok(true),
            _ => return Ok(false),
        };

        if lhs.map.len() != rhs.map.len() {
            return Ok(false);
        }

        let layout = lhs.layout;
        let header = layout.header_size();
        if lhs.map[..header] != rhs.map[..header] {
            return Ok(false);
        }

        for row in 0..layout.rows() {
            if self.logical_row(&lhs, row)? != other.logical_row(&rhs, row)? {
                return Ok(false);
            }
        }

        let tail = layout.file_len() as usize;
        Ok(lhs.map[tail..] == rhs.map[tail..])
    }

    fn mapped(&self) -> Result<Option<MappedFile>> {
        let (Some(handle), Some(layout)) = (self.handle.as_ref(), self.layout) else {
            return Ok(None);
        };
        let map = map_file(handle, &self.path)?;
        if (map.len() as u64) < layout.file_len() {
            return Err(MatrixError::SizeMismatch {
                path: self.path.clone(),
                expected: layout.file_len(),
                actual: map.len() as u64,
            });
        }
        Ok(Some(MappedFile { map, layout }))
    }

    /// Bytes of `row` as they would be on disk after a flush
    fn logical_row<'a>(&'a self, file: &'a MappedFile, row: usize) -> Result<Cow<'a, [u8]>> {
        if self.cache.resident() == Some(row) {
            if let Some(buffer) = self.cache.row() {
                return Ok(encode_row(buffer));
            }
        }
        let range = file.layout.row_range(row)?;
        Ok(Cow::Borrowed(&file.map[range.start as usize..range.end as usize]))
    }
}

impl<T: MatrixElement, I: IndexType> PartialEq for FileMatrix<T, I> {
    /// I/O failures during comparison are logged and reported as unequal
    fn eq(&self, other: &Self) -> bool {
        self.try_eq(other).unwrap_or_else(|err| {
            warn!(
                lhs = %self.path.display(),
                rhs = %other.path.display(),
                error = %err,
                "matrix comparison failed"
            );
            false
        })
    }
}

struct MappedFile {
    map: Mmap,
    layout: MatrixLayout,
}

fn map_file(handle: &File, path: &Path) -> Result<Mmap> {
    // SAFETY: The mapping is read-only and dropped before this comparison
    // returns. The file is exclusively owned by one FileMatrix, which cannot
    // be mutated while borrowed here; external modification of the file is
    // unsupported.
    unsafe { MmapOptions::new().map(handle) }.map_err(MatrixError::io("memory map", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    #[allow(clippy::eq_op)]
    fn test_equal_to_itself() {
        let dir = TempDir::new().unwrap();
        let mut matrix = FileMatrix::<i32>::create(2, 2, dir.path().join("a.matrix")).unwrap();
        matrix.row_mut(1).unwrap()[1] = 4;

        assert!(matrix.try_eq(&matrix).unwrap());
        assert!(matrix == matrix);
    }

    #[test]
    fn test_dimension_mismatch() {
        let dir = TempDir::new().unwrap();
        let a = FileMatrix::<i32>::create(2, 3, dir.path().join("a.matrix")).unwrap();
        let b = FileMatrix::<i32>::create(3, 2, dir.path().join("b.matrix")).unwrap();
        assert!(a != b);
    }

    #[test]
    fn test_unflushed_row_is_compared() {
        let dir = TempDir::new().unwrap();
        let mut a = FileMatrix::<i32>::create(2, 2, dir.path().join("a.matrix")).unwrap();
        let mut b = FileMatrix::<i32>::create(2, 2, dir.path().join("b.matrix")).unwrap();
        assert!(a == b);

        // Only in memory, not yet written back
        a.row_mut(0).unwrap()[0] = 1;
        assert!(a != b);

        // Same value, but b has it on disk and a row 1 resident
        b.row_mut(0).unwrap()[0] = 1;
        b.row(1).unwrap();
        assert!(a == b);
        assert_eq!(a.cache_stats().write_backs, 0);
    }

    #[test]
    fn test_bound_only_matrices() {
        let dir = TempDir::new().unwrap();
        let a = FileMatrix::<i32>::bind(dir.path().join("x.matrix"));
        let b = FileMatrix::<i32>::bind(dir.path().join("y.matrix"));
        assert!(a == b);

        let c = FileMatrix::<i32>::create(0, 0, dir.path().join("z.matrix")).unwrap();
        assert!(a != c);
    }
}
