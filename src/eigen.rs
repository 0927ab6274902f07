//! Dominant eigenpair of a 2×2 matrix by power iteration
//!
//! Each step multiplies the current vector by `A` and rescales it so its first component is `1`.
//! The first component of `A·u` before rescaling is then the eigenvalue estimate. Iteration stops
//! once two successive estimates agree to within the tolerance.
//!
//! # Example
//! ```rust
//! # use gaussfit::eigen::{power_method, Matrix2};
//! let a = Matrix2::new(3.0, 4.0, 3.0, 1.0);
//! let pair = power_method(&a, [1.0, 1.0], 5e-5, 20).unwrap();
//! assert!((pair.value - (2.0 + 13f64.sqrt())).abs() < 5e-5);
//! ```
use crate::{
    error::{Error, Result},
    value::Value,
};

/// A 2×2 matrix
pub type Matrix2<T = f64> = nalgebra::Matrix2<T>;

/// A 2-element column vector
pub type Vector2<T = f64> = nalgebra::Vector2<T>;

/// The result of [`power_method`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Eigenpair<T: Value = f64> {
    /// Dominant eigenvalue estimate
    pub value: T,

    /// Matching eigenvector, scaled so its first component is `1`
    pub vector: Vector2<T>,

    /// Number of matrix-vector products performed
    pub iterations: usize,

    /// Trace of the input matrix
    pub trace: T,

    /// Determinant of the input matrix
    pub determinant: T,
}

/// Finds the dominant eigenvalue and eigenvector of `a` by power iteration.
///
/// The first product counts as iteration 1, and iteration continues while successive eigenvalue
/// estimates differ by more than `tolerance`.
///
/// # Errors
/// - [`Error::SingularMatrix`] if a product has a zero first component and cannot be rescaled.
/// - [`Error::NotConverged`] if the estimates have not settled after `max_iterations` products.
pub fn power_method<T: Value>(
    a: &Matrix2<T>,
    initial_guess: [T; 2],
    tolerance: T,
    max_iterations: usize,
) -> Result<Eigenpair<T>> {
    let mut u = Vector2::from(initial_guess);
    let mut value = rescale(a, &mut u)?;
    let mut previous = T::zero();
    let mut iterations = 1;

    while Value::abs_sub(value, previous) > tolerance {
        if iterations >= max_iterations {
            return Err(Error::NotConverged { iterations });
        }

        previous = value;
        value = rescale(a, &mut u)?;
        iterations += 1;
        log::trace!("power method: iteration {iterations}, λ ≈ {value:e}");
    }

    log::debug!("power method: λ = {value:e} after {iterations} iterations");
    Ok(Eigenpair {
        value,
        vector: u,
        iterations,
        trace: trace(a),
        determinant: determinant(a),
    })
}

/// Replaces `u` by `A·u / (A·u)₀` and returns `(A·u)₀`.
fn rescale<T: Value>(a: &Matrix2<T>, u: &mut Vector2<T>) -> Result<T> {
    let product = a * *u;
    let scale = product[0];
    if scale.is_zero() {
        return Err(Error::SingularMatrix {
            index: 0,
            pivot: 0.0,
        });
    }

    *u = product / scale;
    Ok(scale)
}

/// Sum of the diagonal, `a + d`
pub fn trace<T: Value>(a: &Matrix2<T>) -> T {
    a[(0, 0)] + a[(1, 1)]
}

/// `ad − bc`
pub fn determinant<T: Value>(a: &Matrix2<T>) -> T {
    a[(0, 0)] * a[(1, 1)] - a[(0, 1)] * a[(1, 0)]
}

/// Inverts a 2×2 matrix as its adjugate divided by the determinant.
///
/// # Errors
/// Returns [`Error::SingularMatrix`] if the determinant is zero.
///
/// # Example
/// ```rust
/// # use gaussfit::eigen::{invert, Matrix2};
/// let a = Matrix2::new(4.0, 7.0, 2.0, 6.0);
/// let inverse = invert(&a).unwrap();
/// assert!((a * inverse - Matrix2::identity()).norm() < 1e-12);
/// ```
pub fn invert<T: Value>(a: &Matrix2<T>) -> Result<Matrix2<T>> {
    let det = determinant(a);
    if det.is_zero() {
        return Err(Error::SingularMatrix {
            index: 1,
            pivot: 0.0,
        });
    }

    let adjugate = Matrix2::new(a[(1, 1)], -a[(0, 1)], -a[(1, 0)], a[(0, 0)]);
    Ok(adjugate / det)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::{assert_all_close, assert_close};

    #[test]
    fn test_dominant_eigenvalue() {
        let a = Matrix2::new(3.0, 4.0, 3.0, 1.0);
        let tolerance = 5e-5;
        let pair = power_method(&a, [1.0, 1.0], tolerance, 20).unwrap();

        assert_close!(pair.value, 2.0 + 13f64.sqrt(), tol = tolerance);
        assert!(pair.iterations < 20);
        assert_close!(pair.vector[0], 1.0);
        assert_close!(pair.trace, 4.0);
        assert_close!(pair.determinant, -9.0);

        // A·v = λ·v
        let residual = a * pair.vector - pair.vector * pair.value;
        assert!(residual.norm() < 1e-3);
    }

    #[test]
    fn test_iteration_budget() {
        let a = Matrix2::new(3.0, 4.0, 3.0, 1.0);
        assert!(matches!(
            power_method(&a, [1.0, 1.0], 5e-5, 3),
            Err(Error::NotConverged { iterations: 3 })
        ));
    }

    #[test]
    fn test_zero_first_component() {
        let a = Matrix2::new(0.0, 0.0, 1.0, 1.0);
        assert!(matches!(
            power_method(&a, [1.0, 1.0], 1e-6, 10),
            Err(Error::SingularMatrix { .. })
        ));
    }

    #[test]
    fn test_diagonal_matrix() {
        let a = Matrix2::new(2.0, 0.0, 0.0, 0.5);
        let pair = power_method(&a, [1.0, 1.0], 1e-9, 100).unwrap();

        // The estimate is exact from the first product, so the second one confirms it
        assert_eq!(pair.value, 2.0);
        assert_eq!(pair.iterations, 2);
        assert_all_close!(pair.vector.as_slice(), [1.0, 0.0625]);
    }

    #[test]
    fn test_invert() {
        let a = Matrix2::new(4.0, 7.0, 2.0, 6.0);
        let inverse = invert(&a).unwrap();
        assert_all_close!(
            inverse.transpose().as_slice(),
            [0.6, -0.7, -0.2, 0.4],
            tol = 1e-12
        );

        let singular = Matrix2::new(1.0, 2.0, 2.0, 4.0);
        assert!(matches!(
            invert(&singular),
            Err(Error::SingularMatrix { .. })
        ));
    }
}
