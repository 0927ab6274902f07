//! Error types for QR factorization and Gauss-Newton curve fitting
//!
//! This module defines the common errors encountered when factoring matrices,
//! reading point data, or iterating a fit, along with a convenient `Result` alias.

use std::path::PathBuf;

/// Errors that can occur during factorization or curve fitting.
///
/// This enum represents the common failure modes of the linear-algebra kernel
/// and the Gauss-Newton driver built on top of it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Cannot perform curve fitting because there is no data.
    #[error("No data available for fitting")]
    NoData,

    /// There are fewer data points than parameters to fit.
    ///
    /// The Jacobian of such a system cannot have full column rank.
    #[error("Cannot fit {parameters} parameters to {points} points")]
    NotEnoughData {
        /// Number of data points
        points: usize,
        /// Number of model parameters
        parameters: usize,
    },

    /// Operands of a vector or matrix operation do not have compatible shapes.
    #[error("Dimension mismatch in {operation}: expected {expected}, found {found}")]
    DimensionMismatch {
        /// The operation that rejected its inputs
        operation: &'static str,
        /// Description of the expected shape
        expected: String,
        /// Description of the shape that was supplied
        found: String,
    },

    /// A diagonal pivot is zero (or too small to divide by) during back-substitution.
    ///
    /// Usually the Jacobian is rank deficient: the parameters are not independently
    /// determined by the data, or the current estimate sits on a degenerate point.
    #[error("Matrix is singular: pivot {index} is {pivot}")]
    SingularMatrix {
        /// Row of the offending pivot
        index: usize,
        /// Value of the offending pivot
        pivot: f64,
    },

    /// An iteration produced NaN or infinite values.
    ///
    /// The iterate walked outside the domain of the model (a logarithm of a negative
    /// number, for example) or diverged.
    #[error("Non-finite values produced during iteration {iteration}")]
    NonFinite {
        /// Iteration at which the failure was detected (0 = initial state)
        iteration: usize,
    },

    /// An iterative method ran out of iterations before settling.
    #[error("Did not converge within {iterations} iterations")]
    NotConverged {
        /// Number of iterations performed
        iterations: usize,
    },

    /// A partial derivative was requested for a parameter that does not exist.
    #[error("Parameter index {0} is out of range")]
    InvalidParameterIndex(usize),

    /// The points file could not be read.
    #[error("Unable to read points from {}: {source}", path.display())]
    Io {
        /// Path that failed to open
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A line in the points file is not a valid `x,y` pair.
    #[error("Invalid point on line {line}: `{content}`")]
    Parse {
        /// 1-based line number
        line: usize,
        /// Offending line content
        content: String,
    },

    /// A name given in configuration does not match anything known.
    #[error("Unknown {kind} `{name}`")]
    UnknownName {
        /// What kind of name it was (model, method, ...)
        kind: &'static str,
        /// The name that was supplied
        name: String,
    },

    /// A numeric value could not be cast to the target type. This is usually a custom type much smaller than f64/f32
    #[error("Failed to cast value to target type")]
    CastFailed,
}

impl Error {
    /// Shorthand for a [`Error::DimensionMismatch`] built from two shapes.
    pub(crate) fn shape(
        operation: &'static str,
        expected: impl std::fmt::Display,
        found: impl std::fmt::Display,
    ) -> Self {
        Self::DimensionMismatch {
            operation,
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

/// Result type for factorization and curve fitting
pub type Result<T> = std::result::Result<T, Error>;
