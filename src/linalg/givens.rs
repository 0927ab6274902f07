//! QR factorization by Givens rotations
//!
//! Every nonzero entry below the diagonal is zeroed by its own plane rotation of the pivot row
//! and the entry's row. Rotations are applied to the working matrix as soon as they are built, so
//! later rotations see the updated pivots. Entries that are already zero are skipped outright.
//!
//! Once every column is processed, the working matrix is `R`. Since `R = Gₖ…G₁·A`, the
//! orthogonal factor is `Q = G₁ᵗ·G₂ᵗ…Gₖᵗ`.
use nalgebra::DMatrix;

use crate::{
    error::Result,
    linalg::{check_tall, multiply, QrDecomposition},
    value::Value,
};

/// Builds the `size×size` rotation that zeroes `target` (at row `j`) against `pivot` (at row `i`).
///
/// With `c = pivot / √(pivot² + target²)` and `s = −target / √(pivot² + target²)`, the matrix is
/// the identity except for `G[i][i] = G[j][j] = c`, `G[i][j] = −s` and `G[j][i] = s`. Applying it
/// from the left replaces row `i` by `c·rowᵢ − s·rowⱼ` and row `j` by `s·rowᵢ + c·rowⱼ`, so the
/// target position becomes zero and the pivot becomes the positive radius.
///
/// If both values are zero there is nothing to rotate and the identity is returned.
///
/// # Example
/// ```rust
/// # use gaussfit::linalg::givens::rotation;
/// # use gaussfit::nalgebra::DVector;
/// let g = rotation::<f64>(2, 0, 1, 3.0, 4.0);
/// let rotated = &g * DVector::from_vec(vec![3.0, 4.0]);
/// assert!((rotated[0] - 5.0).abs() < 1e-12);
/// assert!(rotated[1].abs() < 1e-12);
/// ```
pub fn rotation<T: Value>(size: usize, i: usize, j: usize, pivot: T, target: T) -> DMatrix<T> {
    let mut g = DMatrix::identity(size, size);
    let radius = pivot.hypot(target);
    if radius.is_zero() {
        return g;
    }

    let c = pivot / radius;
    let s = -target / radius;

    g[(i, i)] = c;
    g[(j, j)] = c;
    g[(i, j)] = -s;
    g[(j, i)] = s;
    g
}

/// Factors `a` into `Q·R` using Givens rotations.
///
/// Columns are processed left to right, and within a column every row below the diagonal is
/// visited top to bottom. Only entries that are nonzero when reached trigger a rotation, so
/// [`QrDecomposition::transforms`] is the number of rotations actually performed.
///
/// Entries of `R` below the diagonal are exactly zero.
///
/// # Errors
/// Returns [`crate::error::Error::DimensionMismatch`] if `a` has fewer rows than columns.
///
/// # Example
/// ```rust
/// # use gaussfit::linalg::givens;
/// # use gaussfit::nalgebra::DMatrix;
/// let a = DMatrix::from_row_slice(3, 3, &[1.0, 2.0, 1.0, 2.0, 3.0, 2.0, 1.0, 2.0, 2.0]);
/// let qr = givens::qr(&a).unwrap();
/// assert!((qr.reconstruct() - &a).norm() < 1e-9);
/// ```
pub fn qr<T: Value>(a: &DMatrix<T>) -> Result<QrDecomposition<T>> {
    check_tall("givens qr", a)?;
    let (rows, cols) = a.shape();

    let mut r = a.clone();
    let mut rotations = Vec::new();
    for i in 0..cols {
        for j in (i + 1)..rows {
            let target = r[(j, i)];
            if target.is_zero() {
                continue;
            }

            let g = rotation(rows, i, j, r[(i, i)], target);
            r = multiply(&g, &r)?;
            r[(j, i)] = T::zero();

            rotations.push(g);
            log::trace!("givens: zeroed ({j}, {i})");
        }
    }

    let mut q = DMatrix::identity(rows, rows);
    for g in &rotations {
        q = multiply(&q, &g.transpose())?;
    }

    Ok(QrDecomposition::new(q, r, rotations.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_orthogonal, assert_reconstructs, assert_upper_triangular};

    const TOL: f64 = 1e-9;

    #[test]
    fn test_rotation_zeroes_target() {
        let a = DMatrix::<f64>::from_row_slice(3, 2, &[1.0, 2.0, 5.0, 1.0, -2.0, 4.0]);
        let g = rotation(3, 0, 2, a[(0, 0)], a[(2, 0)]);
        let rotated = &g * &a;

        assert!(rotated[(2, 0)].abs() < TOL);
        assert!((rotated[(0, 0)] - 5.0f64.sqrt()).abs() < TOL);

        // Row 1 is not part of the rotation
        assert_eq!(rotated.row(1), a.row(1));
    }

    #[test]
    fn test_rotation_of_zeros_is_identity() {
        assert_eq!(rotation(3, 0, 1, 0.0, 0.0), DMatrix::identity(3, 3));
    }

    #[test]
    fn test_square() {
        let a = DMatrix::from_row_slice(3, 3, &[1.0, 2.0, 1.0, 2.0, 3.0, 2.0, 1.0, 2.0, 2.0]);
        let qr = qr(&a).unwrap();

        assert_reconstructs!(qr, a, TOL);
        assert_orthogonal!(qr.q(), TOL);
        assert_upper_triangular!(qr.r(), 0.0);
        assert_eq!(qr.transforms(), 3);
    }

    #[test]
    fn test_tall() {
        let a = DMatrix::from_row_slice(
            4,
            3,
            &[
                2.0, -1.0, 0.0, //
                1.0, 2.0, -1.0, //
                2.0, -1.0, 2.0, //
                3.0, 1.0, 1.0,
            ],
        );
        let qr = qr(&a).unwrap();

        assert_reconstructs!(qr, a, TOL);
        assert_orthogonal!(qr.q(), TOL);
        assert_upper_triangular!(qr.r(), 0.0);
        assert_eq!(qr.transforms(), 6);
    }

    #[test]
    fn test_zero_entries_are_skipped() {
        // (1, 0) is already zero and stays zero, (2, 0) and then (2, 1) need rotations
        let a = DMatrix::from_row_slice(3, 3, &[1.0, 2.0, 3.0, 0.0, 4.0, 5.0, 6.0, 0.0, 7.0]);
        let qr = qr(&a).unwrap();

        assert_eq!(qr.transforms(), 2);
        assert_reconstructs!(qr, a, TOL);
        assert_orthogonal!(qr.q(), TOL);
    }

    #[test]
    fn test_upper_triangular_input_needs_no_rotations() {
        let a = DMatrix::from_row_slice(3, 3, &[4.0, 1.0, 2.0, 0.0, -3.0, 1.0, 0.0, 0.0, 2.0]);
        let qr = qr(&a).unwrap();

        assert_eq!(qr.transforms(), 0);
        assert_eq!(qr.q(), &DMatrix::identity(3, 3));
        assert_eq!(qr.r(), &a);
    }

    #[test]
    fn test_refactoring_r_is_identity() {
        let a = DMatrix::from_row_slice(3, 3, &[2.0, -1.0, 0.0, 1.0, 2.0, -1.0, 2.0, -1.0, 2.0]);
        let first = qr(&a).unwrap();
        let second = qr(first.r()).unwrap();

        assert_eq!(second.transforms(), 0);
        assert!((second.q() - DMatrix::identity(3, 3)).norm() < TOL);
        assert!((second.r() - first.r()).norm() < TOL);
    }
}
