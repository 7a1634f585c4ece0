//! Single-slot row cache
//!
//! Holds at most one row of the matrix in memory. Loading a different row
//! writes the resident one back first, then reads the requested row from its
//! offset in the file. Requests for the resident row perform no I/O.

use crate::config::WriteBack;
use crate::error::{MatrixError, Result};
use bytemuck::Zeroable;
use filematrix_core::format::codec::{decode_row_in_place, encode_row, row_bytes_mut};
use filematrix_core::{check_row, MatrixElement, MatrixLayout};
use std::fs::File;
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::debug;

/// Storage the row cache pages against
///
/// Implemented for `File` and for in-memory cursors.
pub trait PageFile: Read + Write + Seek {
    /// Push written data down to the storage device
    fn sync(&mut self) -> io::Result<()>;
}

impl PageFile for File {
    fn sync(&mut self) -> io::Result<()> {
        self.sync_data()
    }
}

impl PageFile for Cursor<Vec<u8>> {
    fn sync(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// I/O counters for the row cache
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Rows read from disk
    pub loads: u64,
    /// Rows written to disk
    pub write_backs: u64,
}

/// In-memory slot for the one resident row
#[derive(Debug, Clone)]
pub struct RowCache<T: MatrixElement> {
    resident: Option<usize>,
    buffer: Vec<T>,
    dirty: bool,
    stats: CacheStats,
}

impl<T: MatrixElement> Default for RowCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: MatrixElement> RowCache<T> {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            resident: None,
            buffer: Vec::new(),
            dirty: false,
            stats: CacheStats::default(),
        }
    }

    /// Index of the resident row, if any
    pub fn resident(&self) -> Option<usize> {
        self.resident
    }

    /// Whether the resident row was handed out mutably since its last write
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    /// The resident row buffer
    pub fn row(&self) -> Option<&[T]> {
        self.resident.map(|_| self.buffer.as_slice())
    }

    /// The resident row buffer, marked for write-back
    pub fn row_mut(&mut self) -> Option<&mut [T]> {
        self.resident?;
        self.dirty = true;
        Some(self.buffer.as_mut_slice())
    }

    /// Independent copy of the resident slot with fresh counters
    pub fn duplicate(&self) -> Self {
        Self {
            resident: self.resident,
            buffer: self.buffer.clone(),
            dirty: self.dirty,
            stats: CacheStats::default(),
        }
    }

    /// Drop the resident row without writing it
    pub fn clear(&mut self) {
        self.resident = None;
        self.buffer = Vec::new();
        self.dirty = false;
    }

    /// Make `row` resident, writing back the previous row first
    ///
    /// Fails with `OutOfRange` before touching the file if `row` does not
    /// exist. On failure the previously resident row stays resident.
    pub fn load<F: PageFile>(
        &mut self,
        file: &mut F,
        layout: &MatrixLayout,
        row: usize,
        policy: WriteBack,
        sync: bool,
        path: &Path,
    ) -> Result<()> {
        check_row(row, layout.rows()).map_err(|_| MatrixError::OutOfRange {
            row: row as u64,
            rows: layout.rows() as u64,
        })?;

        if self.resident == Some(row) {
            return Ok(());
        }

        if let Some(previous) = self.resident {
            debug!(evicted = previous, loading = row, "row cache swap");
            self.write_back(file, layout, policy, sync, path)?;
        }

        let offset = layout.row_offset(row)?;
        let mut buffer = vec![<T as Zeroable>::zeroed(); layout.columns()];
        file.seek(SeekFrom::Start(offset))
            .map_err(MatrixError::io("seek in", path))?;
        file.read_exact(row_bytes_mut(&mut buffer))
            .map_err(MatrixError::io("read row of", path))?;
        decode_row_in_place(&mut buffer);

        self.buffer = buffer;
        self.resident = Some(row);
        self.dirty = false;
        self.stats.loads += 1;
        Ok(())
    }

    /// Write the resident row to its offset and flush buffered output
    ///
    /// With `WriteBack::Dirty` a clean row is skipped.
    pub fn flush<F: PageFile>(
        &mut self,
        file: &mut F,
        layout: &MatrixLayout,
        policy: WriteBack,
        sync: bool,
        path: &Path,
    ) -> Result<()> {
        self.write_back(file, layout, policy, sync, path)
    }

    fn write_back<F: PageFile>(
        &mut self,
        file: &mut F,
        layout: &MatrixLayout,
        policy: WriteBack,
        sync: bool,
        path: &Path,
    ) -> Result<()> {
        let Some(row) = self.resident else {
            return Ok(());
        };
        if policy == WriteBack::Dirty && !self.dirty {
            return Ok(());
        }

        let offset = layout.row_offset(row)?;
        file.seek(SeekFrom::Start(offset))
            .map_err(MatrixError::io("seek in", path))?;
        file.write_all(&encode_row(&self.buffer))
            .map_err(MatrixError::io("write row of", path))?;
        file.flush().map_err(MatrixError::io("flush", path))?;
        if sync {
            file.sync().map_err(MatrixError::io("sync", path))?;
        }

        self.dirty = false;
        self.stats.write_backs += 1;
        Ok(())
    }
}
