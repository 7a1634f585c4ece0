use filematrix::{FileMatrix, MatrixError, MatrixOptions, WriteBack};
use std::fs;
use tempfile::TempDir;

fn fill_sequential(matrix: &mut FileMatrix<i64>) {
    let columns = matrix.columns();
    for row in 0..matrix.rows() {
        for (column, value) in matrix.row_mut(row).unwrap().iter_mut().enumerate() {
            *value = (row * columns) as i64 + column as i64 + 1;
        }
    }
}

#[test]
fn three_by_three_walkthrough() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("m.matrix");
    let mut m = FileMatrix::<i32>::create(3, 3, &path).unwrap();

    m.row_mut(0).unwrap().copy_from_slice(&[1, 2, 3]);
    m.row_mut(1).unwrap().copy_from_slice(&[4, 5, 6]);
    m.row_mut(2).unwrap().copy_from_slice(&[7, 8, 9]);
    assert_eq!(m.row(1).unwrap(), &[4, 5, 6]);

    let copy = m.try_clone().unwrap();
    assert_eq!(copy.filename(), dir.path().join("m_copy.matrix"));
    assert!(m == copy);

    m.scale(2).unwrap();
    assert_eq!(m.row(0).unwrap(), &[2, 4, 6]);
    assert!(m != copy);
}

#[test]
fn file_size_matches_dimensions() {
    let dir = TempDir::new().unwrap();
    for (rows, columns) in [(0u64, 0u64), (0, 7), (7, 0), (1, 1), (5, 3), (64, 129)] {
        let path = dir.path().join(format!("{rows}x{columns}.matrix"));
        let matrix = FileMatrix::<f32>::create(rows, columns, &path).unwrap();
        let expected = 16 + rows * columns * 4;
        assert_eq!(fs::metadata(&path).unwrap().len(), expected, "{rows}x{columns}");
        assert_eq!(matrix.resident_row(), if rows > 0 { Some(0) } else { None });
    }
}

#[test]
fn empty_matrix_row_access_is_out_of_range() {
    let dir = TempDir::new().unwrap();
    let mut matrix = FileMatrix::<f32>::create(0, 4, dir.path().join("e.matrix")).unwrap();
    assert!(matches!(
        matrix.row(0).unwrap_err(),
        MatrixError::OutOfRange { row: 0, rows: 0 }
    ));
}

#[test]
fn copy_is_independent_both_ways() {
    let dir = TempDir::new().unwrap();
    let mut original = FileMatrix::<i64>::create(4, 5, dir.path().join("o.matrix")).unwrap();
    fill_sequential(&mut original);

    let mut copy = original.try_clone().unwrap();
    assert_eq!(
        fs::read(original.filename()).unwrap(),
        fs::read(copy.filename()).unwrap()
    );

    copy.set(3, 4, -1).unwrap();
    assert_eq!(original.get(3, 4).unwrap(), 20);

    original.set(0, 0, -2).unwrap();
    assert_eq!(copy.get(0, 0).unwrap(), 1);
    assert!(original != copy);
}

#[test]
fn move_preserves_contents() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("src.matrix");
    let mut source = FileMatrix::<i64>::create(3, 4, &path).unwrap();
    fill_sequential(&mut source);
    let mut reference = source.copy_to(dir.path().join("reference.matrix")).unwrap();

    let mut moved = source.take().unwrap();
    assert!(moved == reference);
    assert!(!path.exists());
    assert_eq!((source.rows(), source.columns()), (0, 0));
    assert!(source.row(0).is_err());

    for row in 0..3 {
        assert_eq!(moved.row(row).unwrap(), reference.row(row).unwrap().to_vec().as_slice());
    }
}

#[test]
fn elements_follow_row_major_order() {
    let dir = TempDir::new().unwrap();
    let mut matrix = FileMatrix::<i64>::create(3, 4, dir.path().join("i.matrix")).unwrap();
    fill_sequential(&mut matrix);
    matrix.flush().unwrap();

    let values: Vec<i64> = matrix.elements().unwrap().collect::<Result<_, _>>().unwrap();
    assert_eq!(values, (1..=12).collect::<Vec<_>>());

    let tail: Vec<i64> = matrix
        .elements_from(10)
        .unwrap()
        .map(Result::unwrap)
        .collect();
    assert_eq!(tail, vec![11, 12]);
}

#[test]
fn reopen_sees_flushed_data() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("r.matrix");
    {
        let options = MatrixOptions::default().with_write_back(WriteBack::Dirty);
        let mut matrix = FileMatrix::<u32, u32>::create_with_options(2, 2, &path, options).unwrap();
        matrix.row_mut(1).unwrap().copy_from_slice(&[3, 4]);
    }

    let mut reopened = FileMatrix::<u32, u32>::open(&path).unwrap();
    assert_eq!((reopened.rows(), reopened.columns()), (2, 2));
    assert_eq!(reopened.row(1).unwrap(), &[3, 4]);
    assert_eq!(fs::metadata(&path).unwrap().len(), 8 + 16);
}
