//! Assertions for testing factorizations and curve fits.
//!
//! These are exported so that downstream crates can check their own models and data the same way
//! this crate checks its own.
//!
//! ## Value assertions
//!
//! ### [`crate::assert_close`]
//! Asserts that two floating-point values are approximately equal.
//! - Without a tolerance, allows a few units of machine epsilon scaled by the larger magnitude.
//! - `assert_eq!` equivalent for floats.
//!
//! ### [`crate::assert_all_close`]
//! Element-wise [`crate::assert_close`] for two slices.
//!
//! ### [`crate::assert_params_close`]
//! Asserts that a fitted parameter vector `(a, b, c)` is within an absolute tolerance of the
//! expected one, reporting every parameter on failure.
//!
//! ## Factorization assertions
//!
//! ### [`crate::assert_upper_triangular`]
//! Asserts that every entry strictly below the diagonal is within tolerance of zero.
//!
//! ### [`crate::assert_orthogonal`]
//! Asserts that `‖QᵗQ − I‖` is within tolerance.
//!
//! ### [`crate::assert_reconstructs`]
//! Asserts that a [`crate::linalg::QrDecomposition`] multiplies back out to the matrix it came from.
//!
//! ```rust
//! # use gaussfit::{assert_orthogonal, assert_reconstructs, assert_upper_triangular};
//! # use gaussfit::linalg::QrMethod;
//! # use gaussfit::nalgebra::DMatrix;
//! let a = DMatrix::from_row_slice(3, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
//! let qr = QrMethod::Givens.factor(&a).unwrap();
//!
//! assert_reconstructs!(qr, a, 1e-9);
//! assert_orthogonal!(qr.q(), 1e-9);
//! assert_upper_triangular!(qr.r(), 1e-9);
//! ```
use crate::value::Value;

#[cfg(test)]
pub(crate) mod model_assertions;


/// Tolerance used by [`crate::assert_close`] when none is given.
///
/// Four units of machine epsilon, scaled by the larger magnitude when it exceeds one.
#[doc(hidden)]
pub fn default_tolerance<T: Value>(a: T, b: T) -> T {
    let scale = nalgebra::RealField::max(
        T::one(),
        nalgebra::RealField::max(Value::abs(a), Value::abs(b)),
    );
    T::epsilon() * T::two() * T::two() * scale
}
