//! Matrix-wide arithmetic

use super::FileMatrix;
use crate::error::Result;
use filematrix_core::{IndexType, MatrixElement};
use rayon::prelude::*;
use tracing::debug;

impl<T: MatrixElement, I: IndexType> FileMatrix<T, I> {
    /// Multiply every element by `factor` in place
    ///
    /// Rows are paged in one at a time, scaled, and flushed before moving to
    /// the next row. Wide rows are scaled in parallel. Integer elements wrap
    /// on overflow.
    pub fn scale(&mut self, factor: T) -> Result<()> {
        self.establish()?;
        let Some(layout) = self.layout else {
            return Ok(());
        };
        let parallel = layout.columns() >= self.options.parallel_threshold;
        debug!(
            path = %self.path.display(),
            rows = layout.rows(),
            parallel,
            "scaling matrix"
        );

        for row in 0..layout.rows() {
            self.load_index(row)?;
            let values = self.cache.row_mut().unwrap_or_default();
            if parallel {
                values.par_iter_mut().for_each(|value| *value = value.scale_by(factor));
            } else {
                for value in values.iter_mut() {
                    *value = value.scale_by(factor);
                }
            }
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{FileMatrix, MatrixOptions};
    use tempfile::TempDir;

    #[test]
    fn test_scale_multiplies_every_element() {
        let dir = TempDir::new().unwrap();
        let mut matrix = FileMatrix::<i32>::create(3, 2, dir.path().join("s.matrix")).unwrap();
        for row in 0..3u64 {
            let base = row as i32 * 2;
            matrix.row_mut(row).unwrap().copy_from_slice(&[base, base + 1]);
        }

        matrix.scale(3).unwrap();

        assert_eq!(matrix.row(0).unwrap(), &[0, 3]);
        assert_eq!(matrix.row(1).unwrap(), &[6, 9]);
        assert_eq!(matrix.row(2).unwrap(), &[12, 15]);
    }

    #[test]
    fn test_scale_parallel_path() {
        let dir = TempDir::new().unwrap();
        let options = MatrixOptions::default().with_parallel_threshold(1);
        let path = dir.path().join("p.matrix");
        let mut matrix = FileMatrix::<f64>::create_with_options(2, 64, &path, options).unwrap();
        matrix.row_mut(1).unwrap().fill(1.5);

        matrix.scale(2.0).unwrap();

        assert!(matrix.row(1).unwrap().iter().all(|&v| v == 3.0));
        assert!(matrix.row(0).unwrap().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_scale_flushes_each_row() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("f.matrix");
        let mut matrix = FileMatrix::<u32>::create(2, 1, &path).unwrap();
        matrix.row_mut(0).unwrap()[0] = 5;
        matrix.row_mut(1).unwrap()[0] = 6;

        matrix.scale(10).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[16..20], &50u32.to_le_bytes());
        assert_eq!(&bytes[20..24], &60u32.to_le_bytes());
    }

    #[test]
    fn test_scale_wraps_integer_overflow() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("w.matrix");
        let mut matrix = FileMatrix::<u32>::create(1, 2, &path).unwrap();
        matrix.row_mut(0).unwrap().copy_from_slice(&[u32::MAX, 1]);

        matrix.scale(2).unwrap();

        assert_eq!(matrix.row(0).unwrap(), &[u32::MAX - 1, 2]);
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[16..20], &(u32::MAX - 1).to_le_bytes());
    }

    #[test]
    fn test_scale_wraps_in_parallel_path() {
        let dir = TempDir::new().unwrap();
        let options = MatrixOptions::default().with_parallel_threshold(1);
        let path = dir.path().join("wp.matrix");
        let mut matrix = FileMatrix::<i64>::create_with_options(1, 8, &path, options).unwrap();
        matrix.row_mut(0).unwrap().fill(i64::MAX);

        matrix.scale(2).unwrap();

        assert!(matrix.row(0).unwrap().iter().all(|&v| v == -2));
    }
}
