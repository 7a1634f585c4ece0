//! Row-major element iteration over a matrix file
//!
//! `Elements` reads through its own file handle and never touches the
//! matrix's row cache. It borrows the matrix, so the matrix cannot be
//! mutated, moved or copied onto while an iterator is alive.

use crate::error::{MatrixError, Result};
use crate::matrix::FileMatrix;
use filematrix_core::format::codec::decode_element;
use filematrix_core::{validate_array_bounds, IndexType, MatrixElement};
use std::cmp::Ordering;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Single-pass forward iterator over matrix elements in row-major order
#[derive(Debug)]
pub struct Elements<'a, T: MatrixElement, I: IndexType> {
    path: PathBuf,
    file: Option<File>,
    position: u64,
    end: u64,
    header_size: u64,
    scratch: Vec<u8>,
    _matrix: PhantomData<&'a FileMatrix<T, I>>,
}

impl<T: MatrixElement, I: IndexType> FileMatrix<T, I> {
    /// Iterate over all elements as last written to the file
    ///
    /// Fails with `UnflushedRow` if the resident row was handed out mutably
    /// and not flushed since; call [`flush`](Self::flush) first. A bound-only
    /// matrix yields nothing.
    pub fn elements(&self) -> Result<Elements<'_, T, I>> {
        self.elements_from(0)
    }

    /// Iterate starting at the given row-major element position
    ///
    /// A position at or past the element count yields an exhausted iterator,
    /// which is how an end marker is obtained.
    pub fn elements_from(&self, position: u64) -> Result<Elements<'_, T, I>> {
        if let (Some(row), true) = (self.resident_row(), self.has_unflushed_row()) {
            return Err(MatrixError::UnflushedRow { row: row as u64 });
        }

        let (end, header_size, element_size) = match self.layout() {
            Some(layout) => (
                validate_array_bounds::<T>(layout.data_len())?,
                layout.header_size() as u64,
                layout.element_size(),
            ),
            None => (0, 0, T::size_bytes()),
        };
        let file = if end > 0 {
            let file = File::open(self.filename());
            Some(file.map_err(MatrixError::io("open", self.filename()))?)
        } else {
            None
        };

        Ok(Elements {
            path: self.filename().to_path_buf(),
            file,
            position: position.min(end),
            end,
            header_size,
            scratch: vec![0u8; element_size],
            _matrix: PhantomData,
        })
    }
}

impl<T: MatrixElement, I: IndexType> Elements<'_, T, I> {
    /// Logical row-major position of the next element
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Path of the file being read
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_current(&mut self) -> Result<T> {
        let Some(file) = self.file.as_mut() else {
            return Err(MatrixError::Io {
                op: "read element of",
                path: self.path.clone(),
                source: std::io::ErrorKind::NotFound.into(),
            });
        };
        let offset = self.header_size + self.position * self.scratch.len() as u64;
        file.seek(SeekFrom::Start(offset))
            .map_err(MatrixError::io("seek in", &self.path))?;
        file.read_exact(&mut self.scratch)
            .map_err(MatrixError::io("read element of", &self.path))?;
        Ok(decode_element(&self.scratch)?)
    }
}

impl<T: MatrixElement, I: IndexType> Iterator for Elements<'_, T, I> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.end {
            return None;
        }

        match self.read_current() {
            Ok(value) => {
                self.position += 1;
                Some(Ok(value))
            }
            Err(err) => {
                // Stop after the first failure
                self.position = self.end;
                Some(Err(err))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.end - self.position).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl<T: MatrixElement, I: IndexType> ExactSizeIterator for Elements<'_, T, I> {}

impl<T: MatrixElement, I: IndexType> std::iter::FusedIterator for Elements<'_, T, I> {}

impl<T: MatrixElement, I: IndexType> PartialEq for Elements<'_, T, I> {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.position == other.position
    }
}

impl<T: MatrixElement, I: IndexType> PartialOrd for Elements<'_, T, I> {
    /// Only iterators over the same file are ordered
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.path != other.path {
            return None;
        }
        Some(self.position.cmp(&other.position))
    }
}
