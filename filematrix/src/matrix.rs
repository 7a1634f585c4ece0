//! File-backed dense matrix
//!
//! `FileMatrix` keeps its elements in a flat binary file and pages one row
//! at a time through a [`RowCache`]. Copies produce a byte-identical sibling
//! file and moves rename the file to a sibling, leaving the source bound to
//! its old path with no data.

use crate::config::MatrixOptions;
use crate::error::{MatrixError, Result};
use crate::lifecycle;
use crate::row_cache::{CacheStats, RowCache};
use filematrix_core::format::constants::EXTENSION;
use filematrix_core::{IndexType, MatrixElement, MatrixHeader, MatrixLayout};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

mod compare;
mod ops;

/// Dense matrix stored on disk with a single resident row
///
/// `I` is the integer type stored in the header for the row and column
/// counts. Row access goes through `&mut self` because reading a row may
/// page it in and write back another.
#[derive(Debug)]
pub struct FileMatrix<T: MatrixElement, I: IndexType = u64> {
    path: PathBuf,
    rows: I,
    columns: I,
    layout: Option<MatrixLayout>,
    handle: Option<File>,
    cache: RowCache<T>,
    options: MatrixOptions,
}

impl<T: MatrixElement, I: IndexType> FileMatrix<T, I> {
    /// File extension used for matrix files
    pub const EXTENSION: &'static str = EXTENSION;

    /// File extension used for matrix files
    pub const fn extension() -> &'static str {
        EXTENSION
    }

    /// Bind to `path` without touching the file
    ///
    /// Dimensions read as zero until the first row access opens the file and
    /// reads its header.
    pub fn bind<P: AsRef<Path>>(path: P) -> Self {
        Self::bind_with_options(path, MatrixOptions::default())
    }

    /// Bind to `path` with custom options
    pub fn bind_with_options<P: AsRef<Path>>(path: P, options: MatrixOptions) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            rows: I::default(),
            columns: I::default(),
            layout: None,
            handle: None,
            cache: RowCache::new(),
            options,
        }
    }

    /// Open an existing matrix file and read its header
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, MatrixOptions::default())
    }

    /// Open an existing matrix file with custom options
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: MatrixOptions) -> Result<Self> {
        let mut matrix = Self::bind_with_options(path, options);
        matrix.establish()?;
        Ok(matrix)
    }

    /// Create a zero-filled matrix file with the given dimensions
    ///
    /// Any existing file at `path` is truncated. Row 0 is resident
    /// afterwards when the matrix has rows.
    pub fn create<P: AsRef<Path>>(rows: I, columns: I, path: P) -> Result<Self> {
        Self::create_with_options(rows, columns, path, MatrixOptions::default())
    }

    /// Create a zero-filled matrix file with custom options
    pub fn create_with_options<P: AsRef<Path>>(
        rows: I,
        columns: I,
        path: P,
        options: MatrixOptions,
    ) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let header = MatrixHeader::new(rows, columns);
        let layout = header.layout::<T>()?;

        lifecycle::create_zero_filled(
            &path,
            &header.to_bytes(),
            layout.data_len(),
            options.zero_fill_chunk,
        )?;
        let handle = lifecycle::open_read_write(&path)?;

        let mut matrix = Self {
            path,
            rows,
            columns,
            layout: Some(layout),
            handle: Some(handle),
            cache: RowCache::new(),
            options,
        };
        if layout.rows() > 0 {
            matrix.load_index(0)?;
        }

        info!(
            path = %matrix.path.display(),
            %rows,
            %columns,
            element = %T::data_type(),
            "created matrix"
        );
        Ok(matrix)
    }

    /// Number of rows, zero while only bound
    pub fn rows(&self) -> I {
        self.rows
    }

    /// Number of columns, zero while only bound
    pub fn columns(&self) -> I {
        self.columns
    }

    /// Path of the backing file
    pub fn filename(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &MatrixOptions {
        &self.options
    }

    /// Byte layout, once dimensions are established
    pub fn layout(&self) -> Option<MatrixLayout> {
        self.layout
    }

    /// Whether the matrix is bound to a path without an open file
    pub fn is_bound_only(&self) -> bool {
        self.handle.is_none()
    }

    /// Index of the row currently held in memory
    pub fn resident_row(&self) -> Option<usize> {
        self.cache.resident()
    }

    /// Whether the resident row was handed out mutably and not yet flushed
    pub fn has_unflushed_row(&self) -> bool {
        self.cache.is_dirty()
    }

    /// I/O counters of the row cache
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Read access to a row, paging it in if needed
    ///
    /// This may write back the previously resident row, hence `&mut self`.
    /// Column indexing on the returned slice is bounds checked by the slice.
    pub fn row(&mut self, row: I) -> Result<&[T]> {
        self.page_in(row)?;
        Ok(self.cache.row().unwrap_or_default())
    }

    /// Mutable access to a row, paging it in if needed
    ///
    /// Changes reach the file when the row is evicted or on [`flush`](Self::flush).
    pub fn row_mut(&mut self, row: I) -> Result<&mut [T]> {
        self.page_in(row)?;
        Ok(self.cache.row_mut().unwrap_or_default())
    }

    /// Read one element with column bounds checking
    pub fn get(&mut self, row: I, column: usize) -> Result<T> {
        let values = self.row(row)?;
        values
            .get(column)
            .copied()
            .ok_or(MatrixError::ColumnOutOfRange {
                column,
                columns: values.len(),
            })
    }

    /// Write one element with column bounds checking
    pub fn set(&mut self, row: I, column: usize, value: T) -> Result<()> {
        let values = self.row_mut(row)?;
        let columns = values.len();
        let slot = values
            .get_mut(column)
            .ok_or(MatrixError::ColumnOutOfRange { column, columns })?;
        *slot = value;
        Ok(())
    }

    /// Write the resident row to disk
    pub fn flush(&mut self) -> Result<()> {
        let (Some(handle), Some(layout)) = (self.handle.as_mut(), self.layout.as_ref()) else {
            return Ok(());
        };
        self.cache.flush(
            handle,
            layout,
            self.options.write_back,
            self.options.sync_on_flush,
            &self.path,
        )
    }

    /// Copy into the `_copy` sibling file
    ///
    /// The resident row is flushed first so the sibling is byte-identical to
    /// the source file and to its in-memory state.
    pub fn try_clone(&mut self) -> Result<Self> {
        let target = lifecycle::sibling_path(&self.path, &self.options.copy_suffix);
        self.copy_to(target)
    }

    /// Copy into an explicit target path
    pub fn copy_to<P: AsRef<Path>>(&mut self, target: P) -> Result<Self> {
        let target = target.as_ref().to_path_buf();
        self.reject_same_path(&target, "copy")?;
        self.establish()?;
        self.flush()?;

        lifecycle::copy_verbatim(&self.path, &target)?;
        let handle = lifecycle::open_read_write(&target)?;

        Ok(Self {
            path: target,
            rows: self.rows,
            columns: self.columns,
            layout: self.layout,
            handle: Some(handle),
            cache: self.cache.duplicate(),
            options: self.options.clone(),
        })
    }

    /// Replace this matrix's file with a byte-identical copy of `source`
    ///
    /// This matrix keeps its own path. The copy is staged in a sibling file
    /// and renamed into place, so on failure this matrix is unchanged.
    pub fn copy_from(&mut self, source: &mut Self) -> Result<()> {
        source.reject_same_path(&self.path, "copy")?;
        source.establish()?;
        source.flush()?;

        let staging = lifecycle::sibling_path(&self.path, ".partial");
        lifecycle::copy_verbatim(&source.path, &staging)?;
        let previous = self.handle.take();
        if let Err(err) = lifecycle::rename(&staging, &self.path) {
            self.handle = previous;
            lifecycle::remove_partial(&staging);
            return Err(err);
        }
        drop(previous);

        self.handle = Some(lifecycle::open_read_write(&self.path)?);
        self.rows = source.rows;
        self.columns = source.columns;
        self.layout = source.layout;
        self.cache = source.cache.duplicate();
        Ok(())
    }

    /// Move into the `_move` sibling file
    ///
    /// The backing file is renamed, not copied. Afterwards `self` is bound
    /// to its old path with zero dimensions and can be reused. On failure
    /// `self` is unchanged.
    pub fn take(&mut self) -> Result<Self> {
        let target = lifecycle::sibling_path(&self.path, &self.options.move_suffix);
        self.reject_same_path(&target, "move")?;
        self.establish()?;
        self.flush()?;

        self.relocate(&target)?;

        let moved = Self {
            path: target,
            rows: self.rows,
            columns: self.columns,
            layout: self.layout,
            handle: self.handle.take(),
            cache: std::mem::take(&mut self.cache),
            options: self.options.clone(),
        };
        self.reset();
        Ok(moved)
    }

    /// Take over `source`'s data by renaming its file onto this path
    ///
    /// This matrix's previous contents are discarded and `source` is reset
    /// to a bound-only state.
    pub fn move_from(&mut self, source: &mut Self) -> Result<()> {
        source.reject_same_path(&self.path, "move")?;
        source.establish()?;
        source.flush()?;
        self.flush()?;

        let target = self.path.clone();
        source.relocate(&target)?;

        self.handle = source.handle.take();
        self.rows = source.rows;
        self.columns = source.columns;
        self.layout = source.layout;
        self.cache = std::mem::take(&mut source.cache);
        source.reset();
        Ok(())
    }

    /// Rename the backing file to `target` and reopen the handle there
    fn relocate(&mut self, target: &Path) -> Result<()> {
        let previous = self.handle.take();
        if let Err(err) = lifecycle::rename(&self.path, target) {
            self.handle = previous;
            return Err(err);
        }
        drop(previous);

        match lifecycle::open_read_write(target) {
            Ok(handle) => {
                self.handle = Some(handle);
                Ok(())
            }
            Err(err) => {
                self.restore_from(target);
                Err(err)
            }
        }
    }

    /// Put the file back from `target` after a failed move
    ///
    /// If that also fails the matrix drops to the bound-only state so its
    /// dimensions never describe a file it cannot reach.
    fn restore_from(&mut self, target: &Path) {
        let restored = lifecycle::rename(target, &self.path)
            .and_then(|()| lifecycle::open_read_write(&self.path));
        match restored {
            Ok(handle) => self.handle = Some(handle),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    stranded = %target.display(),
                    error = %err,
                    "could not restore matrix file after failed move"
                );
                self.reset();
            }
        }
    }

    /// Return to the bound-only state without writing anything
    fn reset(&mut self) {
        self.rows = I::default();
        self.columns = I::default();
        self.layout = None;
        self.handle = None;
        self.cache.clear();
    }

    fn reject_same_path(&self, target: &Path, op: &'static str) -> Result<()> {
        if target == self.path {
            return Err(MatrixError::Io {
                op,
                path: self.path.clone(),
                source: io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "source and target are the same file",
                ),
            });
        }
        Ok(())
    }

    /// Open the backing file and read its header if not already done
    fn establish(&mut self) -> Result<()> {
        if self.handle.is_some() {
            return Ok(());
        }

        let mut handle = lifecycle::open_read_write(&self.path)?;
        let mut header_bytes = vec![0u8; MatrixHeader::<I>::SIZE];
        handle
            .read_exact(&mut header_bytes)
            .map_err(MatrixError::io("read header of", &self.path))?;
        let header = MatrixHeader::<I>::from_bytes(&header_bytes)?;
        let layout = header.layout::<T>()?;

        let actual = lifecycle::file_len(&self.path)?;
        if actual != layout.file_len() {
            return Err(MatrixError::SizeMismatch {
                path: self.path.clone(),
                expected: layout.file_len(),
                actual,
            });
        }

        debug!(
            path = %self.path.display(),
            rows = %header.rows,
            columns = %header.columns,
            "bound matrix file"
        );
        self.rows = header.rows;
        self.columns = header.columns;
        self.layout = Some(layout);
        self.handle = Some(handle);
        self.cache.clear();
        Ok(())
    }

    fn page_in(&mut self, row: I) -> Result<()> {
        self.establish()?;
        let index = row.to_usize().ok_or(MatrixError::OutOfRange {
            row: row.to_u64(),
            rows: self.rows.to_u64(),
        })?;
        self.load_index(index)
    }

    fn load_index(&mut self, row: usize) -> Result<()> {
        let (Some(handle), Some(layout)) = (self.handle.as_mut(), self.layout.as_ref()) else {
            return Err(MatrixError::OutOfRange {
                row: row as u64,
                rows: 0,
            });
        };
        let MatrixOptions {
            write_back,
            sync_on_flush,
            ..
        } = self.options;
        self.cache
            .load(handle, layout, row, write_back, sync_on_flush, &self.path)
    }
}

impl<T: MatrixElement, I: IndexType> Drop for FileMatrix<T, I> {
    fn drop(&mut self) {
        if let Err(err) = self.flush() {
            warn!(path = %self.path.display(), error = %err, "failed to flush matrix on drop");
        }
    }
}
