//! File lifecycle operations for matrix files
//!
//! Sibling naming, zero-filled creation, verbatim duplication and rename.
//! Every helper leaves no partial file behind when it fails.

use crate::error::{MatrixError, Result};
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Derive a sibling path by inserting `suffix` before the extension
///
/// Only the file name is considered, so a `.` in a parent directory does not
/// count as an extension separator. Names without a `.` get the suffix
/// appended.
pub fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let Some(name) = path.file_name() else {
        let mut raw = path.as_os_str().to_owned();
        raw.push(suffix);
        return PathBuf::from(raw);
    };

    let new_name: OsString = match name.to_str() {
        Some(name) => match name.rfind('.') {
            Some(dot) => format!("{}{}{}", &name[..dot], suffix, &name[dot..]).into(),
            None => format!("{name}{suffix}").into(),
        },
        None => {
            let mut raw: OsString = name.to_owned();
            raw.push(suffix);
            raw
        }
    };

    path.with_file_name(new_name)
}

/// Open an existing matrix file for reading and writing
pub fn open_read_write(path: &Path) -> Result<File> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(MatrixError::io("open", path))
}

/// Current length of a file on disk
pub fn file_len(path: &Path) -> Result<u64> {
    fs::metadata(path)
        .map(|meta| meta.len())
        .map_err(MatrixError::io("stat", path))
}

/// Create or truncate `path`, write `header`, then `data_len` zero bytes
pub fn create_zero_filled(path: &Path, header: &[u8], data_len: u64, chunk: usize) -> Result<()> {
    let result = write_zero_filled(path, header, data_len, chunk);
    if result.is_err() {
        remove_partial(path);
    }
    result?;

    info!(
        path = %path.display(),
        bytes = header.len() as u64 + data_len,
        "created zero-filled matrix file"
    );
    Ok(())
}

fn write_zero_filled(path: &Path, header: &[u8], data_len: u64, chunk: usize) -> Result<()> {
    let file = File::create(path).map_err(MatrixError::io("create", path))?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(header)
        .map_err(MatrixError::io("write header of", path))?;

    let zeros = vec![0u8; chunk.max(1)];
    let mut remaining = data_len;
    while remaining > 0 {
        let n = remaining.min(zeros.len() as u64) as usize;
        writer
            .write_all(&zeros[..n])
            .map_err(MatrixError::io("zero-fill", path))?;
        remaining -= n as u64;
    }

    writer.flush().map_err(MatrixError::io("flush", path))?;
    Ok(())
}

/// Duplicate the entire byte stream of `source` into `target`
///
/// The target is created or truncated. Returns the number of bytes copied.
pub fn copy_verbatim(source: &Path, target: &Path) -> Result<u64> {
    let result = copy_stream(source, target);
    if result.is_err() {
        remove_partial(target);
    }
    let bytes = result?;

    info!(
        source = %source.display(),
        target = %target.display(),
        bytes,
        "copied matrix file"
    );
    Ok(bytes)
}

fn copy_stream(source: &Path, target: &Path) -> Result<u64> {
    let mut reader = File::open(source).map_err(MatrixError::io("open", source))?;
    let mut writer = File::create(target).map_err(MatrixError::io("create", target))?;

    let bytes = io::copy(&mut reader, &mut writer).map_err(MatrixError::io("copy into", target))?;
    writer.flush().map_err(MatrixError::io("flush", target))?;
    Ok(bytes)
}

/// Rename `source` to `target`, replacing any existing target
pub fn rename(source: &Path, target: &Path) -> Result<()> {
    fs::rename(source, target).map_err(MatrixError::io("rename", source))?;
    info!(
        source = %source.display(),
        target = %target.display(),
        "moved matrix file"
    );
    Ok(())
}

pub(crate) fn remove_partial(path: &Path) {
    if let Err(err) = fs::remove_file(path) {
        if err.kind() != io::ErrorKind::NotFound {
            debug!(path = %path.display(), error = %err, "could not remove partial file");
        }
    }
}
