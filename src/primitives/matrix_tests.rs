use super::*;

fn sample() -> Matrix<f64> {
    Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
        .expect("test data has correct dimensions: 2*3=6 elements")
}

#[test]
fn test_from_vec() {
    let m = sample();
    assert_eq!(m.shape(), (2, 3));
    assert!((m.get(0, 0) - 1.0).abs() < 1e-12);
    assert!((m.get(1, 2) - 6.0).abs() < 1e-12);
}

#[test]
fn test_from_vec_error() {
    let result = Matrix::from_vec(2, 3, vec![1.0_f64, 2.0, 3.0]);
    assert!(matches!(
        result,
        Err(SparseToneError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_zeros() {
    let m = Matrix::zeros(2, 3);
    assert_eq!(m.shape(), (2, 3));
    assert!(m.is_zero());
}

#[test]
fn test_eye() {
    let m = Matrix::eye(3);
    assert!((m.get(0, 0) - 1.0).abs() < 1e-12);
    assert!((m.get(2, 2) - 1.0).abs() < 1e-12);
    assert!(m.get(0, 1).abs() < 1e-12);
    assert!(!m.is_zero());
}

#[test]
fn test_set_and_row_slice() {
    let mut m = sample();
    m.set(1, 0, -4.0);
    assert_eq!(m.row_slice(1), &[-4.0, 5.0, 6.0]);
}

#[test]
fn test_column() {
    let col = sample().column(1);
    assert_eq!(col.as_slice(), &[2.0, 5.0]);
}

#[test]
fn test_matvec() {
    let v = Vector::from_slice(&[1.0, 2.0, 3.0]);
    let result = sample()
        .matvec(&v)
        .expect("matrix columns match vector length: both 3");

    // [1*1 + 2*2 + 3*3, 4*1 + 5*2 + 6*3]
    assert_eq!(result.as_slice(), &[14.0, 32.0]);
}

#[test]
fn test_matvec_dimension_error() {
    let v = Vector::from_slice(&[1.0, 2.0]);
    assert!(sample().matvec(&v).is_err());
}

#[test]
fn test_tmatvec() {
    let v = Vector::from_slice(&[1.0, -1.0]);
    let result = sample()
        .tmatvec(&v)
        .expect("matrix rows match vector length: both 2");

    // Aᵀv = [1-4, 2-5, 3-6]
    assert_eq!(result.as_slice(), &[-3.0, -3.0, -3.0]);
}

#[test]
fn test_tmatvec_dimension_error() {
    let v = Vector::from_slice(&[1.0, 2.0, 3.0]);
    assert!(sample().tmatvec(&v).is_err());
}
