//! Configuration for file-backed matrices

use filematrix_core::format::constants::{COPY_SUFFIX, MOVE_SUFFIX};

/// When the resident row is written back to disk on eviction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WriteBack {
    /// Write the resident row back on every eviction, mutated or not
    #[default]
    Always,
    /// Write back only rows handed out through a mutable accessor
    Dirty,
}

/// Configuration for matrix paging and file lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatrixOptions {
    /// Suffix for the sibling file produced by a copy
    pub copy_suffix: String,
    /// Suffix for the sibling file produced by a move
    pub move_suffix: String,
    /// Write-back policy for the row cache
    pub write_back: WriteBack,
    /// Call `sync_data` after every row write-back, on eviction and on `flush`
    pub sync_on_flush: bool,
    /// Row width from which scalar multiplication runs in parallel
    pub parallel_threshold: usize,
    /// Buffer size in bytes used when zero-filling a new file
    pub zero_fill_chunk: usize,
}

impl MatrixOptions {
    /// Set the copy suffix
    pub fn with_copy_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.copy_suffix = suffix.into();
        self
    }

    /// Set the move suffix
    pub fn with_move_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.move_suffix = suffix.into();
        self
    }

    /// Set the write-back policy
    pub fn with_write_back(mut self, write_back: WriteBack) -> Self {
        self.write_back = write_back;
        self
    }

    /// Force row flushes down to the storage device
    pub fn with_sync_on_flush(mut self, sync: bool) -> Self {
        self.sync_on_flush = sync;
        self
    }

    /// Set the parallel scaling threshold in columns
    pub fn with_parallel_threshold(mut self, columns: usize) -> Self {
        self.parallel_threshold = columns;
        self
    }

    /// Set the zero-fill buffer size, clamped to at least one byte
    pub fn with_zero_fill_chunk(mut self, bytes: usize) -> Self {
        self.zero_fill_chunk = bytes.max(1);
        self
    }
}

impl Default for MatrixOptions {
    fn default() -> Self {
        Self {
            copy_suffix: COPY_SUFFIX.to_string(),
            move_suffix: MOVE_SUFFIX.to_string(),
            write_back: WriteBack::Always,
            sync_on_flush: false,
            parallel_threshold: 4096,
            zero_fill_chunk: 64 * 1024,
        }
    }
}
