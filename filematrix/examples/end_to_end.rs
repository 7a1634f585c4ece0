use filematrix::{FileMatrix, MatrixOptions, WriteBack};
use std::time::Instant;

fn main() -> filematrix::Result<()> {
    println!("File-backed matrix walkthrough");

    let rows = 2_000u64;
    let columns = 1_000u64;
    let filename = std::env::temp_dir().join("walkthrough.matrix");

    let options = MatrixOptions::default().with_write_back(WriteBack::Dirty);
    let start = Instant::now();
    let mut matrix = FileMatrix::<f32>::create_with_options(rows, columns, &filename, options)?;
    println!(
        "Created {rows}x{columns} in {:.3}s at {}",
        start.elapsed().as_secs_f64(),
        filename.display()
    );

    // Fill row by row; each new row evicts the previous one
    let start = Instant::now();
    for row in 0..rows {
        for (column, value) in matrix.row_mut(row)?.iter_mut().enumerate() {
            *value = (row * columns) as f32 + column as f32;
        }
    }
    matrix.flush()?;
    println!("Filled in {:.3}s", start.elapsed().as_secs_f64());

    let mut copy = matrix.try_clone()?;
    println!("Copy at {} equal: {}", copy.filename().display(), matrix == copy);

    let start = Instant::now();
    matrix.scale(0.5)?;
    println!("Scaled in {:.3}s", start.elapsed().as_secs_f64());
    println!("After scaling equal: {}", matrix == copy);
    println!("copy[1][2] = {}, matrix[1][2] = {}", copy.get(1, 2)?, matrix.get(1, 2)?);

    let sum: f64 = matrix
        .elements()?
        .take(columns as usize)
        .map(|value| value.map(f64::from))
        .sum::<filematrix::Result<f64>>()?;
    println!("Sum of first row: {sum}");

    let stats = matrix.cache_stats();
    println!("Row loads: {}, write-backs: {}", stats.loads, stats.write_backs);

    let moved = copy.take()?;
    println!("Moved copy to {}", moved.filename().display());

    // Clean up
    let leftovers = [matrix.filename().to_path_buf(), moved.filename().to_path_buf()];
    drop(matrix);
    drop(moved);
    for path in leftovers {
        std::fs::remove_file(&path).map_err(|source| filematrix::MatrixError::Io {
            op: "remove",
            path: path.clone(),
            source,
        })?;
    }
    println!("Cleaned up matrix files");

    Ok(())
}
