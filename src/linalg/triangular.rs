//! Back-substitution for upper-triangular systems
use nalgebra::{DMatrix, DVector};

use crate::{
    error::{Error, Result},
    value::Value,
};

/// Solves `R·x = b` for upper-triangular `R` by back-substitution.
///
/// Only the leading `n×n` block of `R` and the first `n` entries of `b` are used, where `n` is
/// the number of columns of `R`. This is exactly the system left after factoring a tall
/// Jacobian: the rows of `Qᵗ·r` beyond `n` are the part of the residual no step can remove.
///
/// Pivots whose magnitude is at most `ε·n·max|Rᵢᵢ|` are treated as zero.
///
/// # Errors
/// - [`Error::DimensionMismatch`] if `R` has fewer rows than columns, or `b` is too short.
/// - [`Error::SingularMatrix`] if a diagonal pivot is (near) zero.
///
/// # Example
/// ```rust
/// # use gaussfit::linalg::solve_upper;
/// # use gaussfit::nalgebra::{DMatrix, DVector};
/// let r = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 0.0, 4.0]);
/// let b = DVector::from_vec(vec![4.0, 8.0]);
/// let x = solve_upper(&r, &b).unwrap();
/// assert_eq!(x.as_slice(), &[1.0, 2.0]);
/// ```
pub fn solve_upper<T: Value>(r: &DMatrix<T>, b: &DVector<T>) -> Result<DVector<T>> {
    let n = r.ncols();
    let largest = (0..n.min(r.nrows()))
        .map(|i| Value::abs(r[(i, i)]))
        .fold(T::zero(), nalgebra::RealField::max);
    let tolerance = T::epsilon() * T::try_cast(n.max(1))? * largest;
    solve_upper_with_tolerance(r, b, tolerance)
}

/// Solves `R·x = b` for upper-triangular `R`, treating pivots with `|Rᵢᵢ| <= tolerance` as zero.
///
/// See [`solve_upper`].
///
/// # Errors
/// - [`Error::DimensionMismatch`] if `R` has fewer rows than columns, or `b` is too short.
/// - [`Error::SingularMatrix`] if a diagonal pivot is within `tolerance` of zero.
pub fn solve_upper_with_tolerance<T: Value>(
    r: &DMatrix<T>,
    b: &DVector<T>,
    tolerance: T,
) -> Result<DVector<T>> {
    let (rows, n) = r.shape();
    if rows < n {
        return Err(Error::shape(
            "solve_upper",
            format!("at least {n} rows"),
            format!("{rows}x{n}"),
        ));
    }
    if b.len() < n {
        return Err(Error::shape("solve_upper", n, b.len()));
    }

    let mut x = DVector::zeros(n);
    for i in (0..n).rev() {
        let pivot = r[(i, i)];
        if Value::abs(pivot) <= tolerance {
            return Err(Error::SingularMatrix {
                index: i,
                pivot: pivot.to_f64(),
            });
        }

        let mut sum = b[i];
        for k in (i + 1)..n {
            sum -= r[(i, k)] * x[k];
        }
        x[i] = sum / pivot;
    }

    Ok(x)
}

/// Solves the 3×3 upper-triangular system `R·[x, y, z]ᵗ = b`.
///
/// `z` comes from the last row, then `y`, then `x`. Every curve family fitted by this crate has
/// three parameters, so this is the form the Gauss-Newton driver uses.
///
/// # Errors
/// - [`Error::DimensionMismatch`] if `R` does not have exactly 3 columns.
/// - Any error from [`solve_upper`].
pub fn solve_upper3<T: Value>(r: &DMatrix<T>, b: &DVector<T>) -> Result<(T, T, T)> {
    if r.ncols() != 3 {
        return Err(Error::shape("solve_upper3", 3, r.ncols()));
    }

    let x = solve_upper(r, b)?;
    Ok((x[0], x[1], x[2]))
}
