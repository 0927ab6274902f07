//! QR factorization by Householder reflections
//!
//! Column `i` of the running matrix is reflected onto a multiple of the `i`-th standard basis
//! vector, zeroing everything below the diagonal in one step. The reflection for the trailing
//! sub-column is built at its natural size and then [`embed`]ded into a full-size identity so
//! that the rows above `i` are left untouched.
//!
//! `Q` is the product of the reflections in the order they were generated, and `R = Qᵗ·A`.
use nalgebra::{DMatrix, DVector};

use crate::{
    error::Result,
    linalg::{check_tall, embed, multiply, norm, QrDecomposition},
    value::Value,
};

/// Builds the Householder reflection `I − 2uuᵗ` for a column.
///
/// The reflection vector is `v = column + sign(column₀)·‖column‖·e₁`, so the norm is added in
/// the direction of the leading entry and never cancels it. A zero leading entry counts as
/// positive. `u` is `v` scaled to unit length, and applying the result to `column` gives
/// `−sign(column₀)·‖column‖·e₁`.
///
/// A zero column has nothing to reflect and yields the identity.
///
/// # Example
/// ```rust
/// # use gaussfit::linalg::householder::reflection;
/// # use gaussfit::nalgebra::DVector;
/// let column = DVector::from_vec(vec![3.0, 4.0]);
/// let h = reflection(&column);
/// let reflected: DVector<f64> = &h * &column;
/// assert!((reflected[0] + 5.0).abs() < 1e-12);
/// assert!(reflected[1].abs() < 1e-12);
/// ```
pub fn reflection<T: Value>(column: &DVector<T>) -> DMatrix<T> {
    let size = column.len();
    let identity = DMatrix::identity(size, size);
    if size == 0 {
        return identity;
    }

    let length = norm(column.as_slice());
    let mut v = column.clone();
    if v[0] < T::zero() {
        v[0] -= length;
    } else {
        v[0] += length;
    }

    let length = norm(v.as_slice());
    if length.is_zero() {
        return identity;
    }

    let u = v / length;
    identity - (&u * u.transpose()) * T::two()
}

/// Factors `a` into `Q·R` using Householder reflections.
///
/// The matrix must have at least as many rows as columns. A sub-column that is entirely zero
/// produces an identity reflection, so rank-deficient input degrades to a no-op step rather
/// than failing.
///
/// Entries of `R` below the diagonal are zero up to rounding.
///
/// # Errors
/// Returns [`crate::error::Error::DimensionMismatch`] if `a` has fewer rows than columns.
///
/// # Example
/// ```rust
/// # use gaussfit::linalg::householder;
/// # use gaussfit::nalgebra::DMatrix;
/// let a = DMatrix::from_row_slice(3, 3, &[2.0, -1.0, 0.0, 1.0, 2.0, -1.0, 2.0, -1.0, 2.0]);
/// let qr = householder::qr(&a).unwrap();
/// assert!((qr.reconstruct() - &a).norm() < 1e-9);
/// assert_eq!(qr.transforms(), 3);
/// ```
pub fn qr<T: Value>(a: &DMatrix<T>) -> Result<QrDecomposition<T>> {
    check_tall("householder qr", a)?;
    let (rows, cols) = a.shape();
    if cols == 0 {
        return Ok(QrDecomposition::new(
            DMatrix::identity(rows, rows),
            a.clone(),
            0,
        ));
    }

    let first = reflection(&a.column(0).into_owned());
    let mut transformed = multiply(&first, a)?;
    let mut reflections = vec![first];

    for i in 1..cols {
        let column = DVector::from_iterator(rows - i, (i..rows).map(|k| transformed[(k, i)]));
        let minor = reflection(&column);
        let h = embed(DMatrix::identity(rows, rows), &minor)?;

        transformed = multiply(&h, &transformed)?;
        reflections.push(h);
        log::trace!("householder: reflected column {i} of {cols}");
    }

    let mut q = DMatrix::identity(rows, rows);
    for h in &reflections {
        q = multiply(&q, h)?;
    }

    let r = multiply(&q.transpose(), a)?;
    Ok(QrDecomposition::new(q, r, reflections.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_orthogonal, assert_reconstructs, assert_upper_triangular};

    const TOL: f64 = 1e-9;

    #[test]
    fn test_reflection_zeroes_subcolumn() {
        let column = DVector::<f64>::from_vec(vec![1.0, 2.0, 2.0]);
        let h = reflection(&column);
        let reflected = &h * &column;

        assert!((reflected[0] + 3.0).abs() < TOL);
        assert!(reflected[1].abs() < TOL);
        assert!(reflected[2].abs() < TOL);
        assert!((&h * &h - DMatrix::identity(3, 3)).norm() < TOL);
    }

    #[test]
    fn test_reflection_of_zero_column() {
        let column = DVector::from_vec(vec![0.0, 0.0, 0.0]);
        assert_eq!(reflection(&column), DMatrix::identity(3, 3));
    }

    #[test]
    fn test_square() {
        let a = DMatrix::from_row_slice(3, 3, &[1.0, 2.0, 1.0, 2.0, 3.0, 2.0, 1.0, 2.0, 2.0]);
        let qr = qr(&a).unwrap();

        assert_reconstructs!(qr, a, TOL);
        assert_orthogonal!(qr.q(), TOL);
        assert_upper_triangular!(qr.r(), TOL);
        assert_eq!(qr.transforms(), 3);
    }

    #[test]
    fn test_tall() {
        let a = DMatrix::from_row_slice(
            5,
            3,
            &[
                1.0, 1.0, 1.0, //
                4.0, 2.0, 1.0, //
                9.0, 3.0, 1.0, //
                16.0, 4.0, 1.0, //
                25.0, 5.0, 1.0,
            ],
        );
        let qr = qr(&a).unwrap();

        assert_reconstructs!(qr, a, TOL);
        assert_orthogonal!(qr.q(), TOL);
        assert_upper_triangular!(qr.r(), TOL);
        assert_eq!(qr.q().shape(), (5, 5));
        assert_eq!(qr.r().shape(), (5, 3));
    }

    #[test]
    fn test_zero_column_does_not_fail() {
        let a = DMatrix::from_row_slice(3, 2, &[0.0, 1.0, 0.0, 2.0, 0.0, 3.0]);
        let qr = qr(&a).unwrap();

        assert_reconstructs!(qr, a, TOL);
        assert_orthogonal!(qr.q(), TOL);
    }

    #[test]
    fn test_refactoring_r_only_flips_signs() {
        let a = DMatrix::<f64>::from_row_slice(3, 3, &[2.0, -1.0, 0.0, 1.0, 2.0, -1.0, 2.0, -1.0, 2.0]);
        let first = qr(&a).unwrap();
        let second = qr(first.r()).unwrap();

        // Each reflection of an already-triangular column is ±1 on the diagonal
        assert!((second.q().abs() - DMatrix::identity(3, 3)).norm() < TOL);
        assert!((second.r().abs() - first.r().abs()).norm() < TOL);
    }

    #[test]
    fn test_reflection_of_negative_leading_entry() {
        let column = DVector::<f64>::from_vec(vec![-1.0, 1e-8, 0.0]);
        let h = reflection(&column);
        let reflected = &h * &column;

        assert!((reflected[0] - column.norm()).abs() < TOL);
        assert!(reflected[1].abs() < 1e-12);
        assert!(reflected[2].abs() < 1e-12);
    }

    #[test]
    fn test_negative_dominant_column() {
        for eps in [1e-7, 1e-8] {
            let a = DMatrix::<f64>::from_row_slice(3, 2, &[-1.0, 1.0, eps, 2.0, 0.0, 3.0]);
            let qr = qr(&a).unwrap();

            assert_reconstructs!(qr, a, TOL);
            assert_orthogonal!(qr.q(), TOL);
            assert_upper_triangular!(qr.r(), TOL);
        }
    }
}
