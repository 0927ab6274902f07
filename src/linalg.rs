//! Dense linear-algebra kernel for curve fitting
//!
//! This module holds the vector and matrix primitives, the two QR factorizations, and the
//! upper-triangular solver that each Gauss-Newton iteration is built from.
//!
//! # Factorizations
//! - [`householder::qr`]: Builds `Q` from one reflection per column. Each reflection zeroes
//!   an entire sub-column at once.
//! - [`givens::qr`]: Builds `Q` from plane rotations. Each rotation zeroes exactly one
//!   sub-diagonal entry, and entries that are already zero are skipped.
//!
//! Both return a [`QrDecomposition`] satisfying `Q·R = A` and `QᵗQ = I` within floating tolerance.
//! Use [`QrMethod`] to choose between them at runtime.
//!
//! # Scale
//! Matrices here are small: a Jacobian has one row per data point and one column per parameter.
//! The factorizations form full `m×m` orthogonal factors, which is fine for a few dozen rows and
//! not intended for large systems.
//!
//! # Example
//! ```rust
//! # use gaussfit::linalg::QrMethod;
//! # use gaussfit::nalgebra::DMatrix;
//! let a = DMatrix::from_row_slice(3, 3, &[1.0, 2.0, 1.0, 2.0, 3.0, 2.0, 1.0, 2.0, 2.0]);
//! let qr = QrMethod::Givens.factor(&a).unwrap();
//! assert!((qr.reconstruct() - &a).norm() < 1e-9);
//! ```
use nalgebra::{DMatrix, DVector};

use crate::{
    error::{Error, Result},
    value::Value,
};

pub mod givens;
pub mod householder;

mod triangular;
pub use triangular::{solve_upper, solve_upper3, solve_upper_with_tolerance};

/// Sums a sequence of values with Neumaier's compensated summation.
///
/// The running compensation term recovers the low-order bits lost when adding
/// values of very different magnitude, so the result does not depend on the
/// order of the inputs for the short vectors used here.
pub fn compensated_sum<T: Value>(values: impl IntoIterator<Item = T>) -> T {
    let mut sum = T::zero();
    let mut compensation = T::zero();
    for value in values {
        let t = sum + value;
        if Value::abs(sum) >= Value::abs(value) {
            compensation += (sum - t) + value;
        } else {
            compensation += (value - t) + sum;
        }
        sum = t;
    }
    sum + compensation
}

/// Euclidean norm of a vector, using a compensated sum of squares.
///
/// # Example
/// ```rust
/// # use gaussfit::linalg::norm;
/// assert_eq!(norm(&[3.0, 4.0]), 5.0);
/// ```
pub fn norm<T: Value>(v: &[T]) -> T {
    compensated_sum(v.iter().map(|&x| x * x)).sqrt()
}

/// Element-wise sum of two vectors.
///
/// # Errors
/// Returns [`Error::DimensionMismatch`] if the lengths differ.
pub fn add<T: Value>(a: &DVector<T>, b: &DVector<T>) -> Result<DVector<T>> {
    if a.len() != b.len() {
        return Err(Error::shape("add", a.len(), b.len()));
    }
    Ok(a + b)
}

/// Dense matrix product `a·b`.
///
/// # Errors
/// Returns [`Error::DimensionMismatch`] if the inner dimensions differ.
pub fn multiply<T: Value>(a: &DMatrix<T>, b: &DMatrix<T>) -> Result<DMatrix<T>> {
    if a.ncols() != b.nrows() {
        return Err(Error::shape(
            "multiply",
            format!("{} rows on the right", a.ncols()),
            format!("{}x{}", b.nrows(), b.ncols()),
        ));
    }
    Ok(a * b)
}

/// Writes a smaller matrix into the bottom-right corner of a larger one.
///
/// The copy walks both matrices backward from their last row and column, so the minor's
/// last entry lands on the target's last entry. A Householder reflection built from the
/// trailing part of column `i` therefore acts on rows `i..` of the full matrix, and the
/// untouched top-left block of an identity target keeps rows `..i` fixed.
///
/// # Errors
/// Returns [`Error::DimensionMismatch`] if the minor does not fit inside the target.
///
/// # Example
/// ```rust
/// # use gaussfit::linalg::embed;
/// # use gaussfit::nalgebra::DMatrix;
/// let minor = DMatrix::from_row_slice(2, 2, &[5.0, 6.0, 7.0, 8.0]);
/// let full = embed(DMatrix::identity(3, 3), &minor).unwrap();
/// assert_eq!(full, DMatrix::from_row_slice(3, 3, &[1.0, 0.0, 0.0, 0.0, 5.0, 6.0, 0.0, 7.0, 8.0]));
/// ```
pub fn embed<T: Value>(mut target: DMatrix<T>, minor: &DMatrix<T>) -> Result<DMatrix<T>> {
    let (rows, cols) = target.shape();
    let (minor_rows, minor_cols) = minor.shape();
    if minor_rows > rows || minor_cols > cols {
        return Err(Error::shape(
            "embed",
            format!("at most {rows}x{cols}"),
            format!("{minor_rows}x{minor_cols}"),
        ));
    }

    for x in 0..minor_rows {
        for y in 0..minor_cols {
            target[(rows - x - 1, cols - y - 1)] = minor[(minor_rows - x - 1, minor_cols - y - 1)];
        }
    }
    Ok(target)
}

/// The result of a QR factorization: `A = Q·R`.
///
/// `Q` is square and orthogonal, `R` has the shape of `A` and is upper-triangular.
#[derive(Debug, Clone, PartialEq)]
pub struct QrDecomposition<T: Value = f64> {
    q: DMatrix<T>,
    r: DMatrix<T>,
    transforms: usize,
}
impl<T: Value> QrDecomposition<T> {
    pub(crate) fn new(q: DMatrix<T>, r: DMatrix<T>, transforms: usize) -> Self {
        Self { q, r, transforms }
    }

    /// The orthogonal factor `Q`
    #[must_use]
    pub fn q(&self) -> &DMatrix<T> {
        &self.q
    }

    /// The upper-triangular factor `R`
    #[must_use]
    pub fn r(&self) -> &DMatrix<T> {
        &self.r
    }

    /// Number of reflections or rotations composed into `Q`.
    ///
    /// For Givens this counts only the sub-diagonal entries that were nonzero when reached.
    #[must_use]
    pub fn transforms(&self) -> usize {
        self.transforms
    }

    /// Consumes the decomposition, returning `(Q, R)`
    #[must_use]
    pub fn into_parts(self) -> (DMatrix<T>, DMatrix<T>) {
        (self.q, self.r)
    }

    /// Recomputes `Q·R`, which should match the factored matrix
    #[must_use]
    pub fn reconstruct(&self) -> DMatrix<T> {
        &self.q * &self.r
    }

    /// Frobenius norm of `QᵗQ − I`
    #[must_use]
    pub fn orthogonality_error(&self) -> T {
        let n = self.q.ncols();
        (self.q.transpose() * &self.q - DMatrix::identity(n, n)).norm()
    }

    /// Computes `Qᵗ·v`.
    ///
    /// # Errors
    /// Returns [`Error::DimensionMismatch`] if `v` does not have one entry per row of `Q`.
    pub fn qt_mul(&self, v: &DVector<T>) -> Result<DVector<T>> {
        if v.len() != self.q.nrows() {
            return Err(Error::shape("qt_mul", self.q.nrows(), v.len()));
        }
        Ok(self.q.tr_mul(v))
    }
}

/// Selects the QR factorization used by the Gauss-Newton driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum QrMethod {
    /// Householder reflections, one per column
    #[default]
    Householder,

    /// Givens rotations, one per nonzero sub-diagonal entry
    Givens,
}
impl QrMethod {
    /// All available methods
    pub const ALL: [QrMethod; 2] = [QrMethod::Householder, QrMethod::Givens];

    /// Factors `a` with this method.
    ///
    /// # Errors
    /// Returns [`Error::DimensionMismatch`] if `a` has fewer rows than columns.
    pub fn factor<T: Value>(self, a: &DMatrix<T>) -> Result<QrDecomposition<T>> {
        match self {
            QrMethod::Householder => householder::qr(a),
            QrMethod::Givens => givens::qr(a),
        }
    }

    /// Lowercase name of the method
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            QrMethod::Householder => "householder",
            QrMethod::Givens => "givens",
        }
    }
}
impl std::fmt::Display for QrMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
impl std::str::FromStr for QrMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownName {
                kind: "QR method",
                name: s.to_string(),
            })
    }
}

/// Rejects matrices that cannot be QR factored into a square `Q` and triangular `R`.
pub(crate) fn check_tall<T: Value>(operation: &'static str, a: &DMatrix<T>) -> Result<()> {
    let (rows, cols) = a.shape();
    if rows < cols {
        return Err(Error::shape(
            operation,
            format!("at least {cols} rows"),
            format!("{rows}x{cols}"),
        ));
    }
    Ok(())
}
