//! Curve families that can be fitted by Gauss-Newton
//!
//! A [`Model`] describes a curve `f(B, x)` with three parameters `B = (a, b, c)` and the
//! partial derivatives of the residual `y − f(B, x)` with respect to each parameter.
//! Because the residual subtracts the curve, every partial is the negated partial of `f`.
//!
//! # Provided Models
//! - [`Quadratic`]: `a·x² + b·x + c`
//! - [`Exponential`]: `a·eᵇˣ + c`
//! - [`Logarithmic`]: `a·ln(x + b) + c`
//! - [`Rational`]: `a·x / (x + b) + c`
//!
//! [`ModelKind`] names the four families at runtime, and [`FnModel`] turns a pair of plain
//! functions into a model.
//!
//! # Rolling Your Own
//! Implement [`Model::y`] and [`Model::partial`]. The residual vector and Jacobian used by the
//! solver are derived from those two.
use nalgebra::{DMatrix, DVector};

use crate::{
    error::{Error, Result},
    value::Value,
};

mod exponential;
pub use exponential::Exponential;

mod logarithmic;
pub use logarithmic::Logarithmic;

mod quadratic;
pub use quadratic::Quadratic;

mod rational;
pub use rational::Rational;

/// The parameter vector `(a, b, c)` shared by every model.
pub type Params<T = f64> = [T; 3];

/// Number of parameters in a [`Params`] vector.
pub const PARAMETERS: usize = 3;

/// A three-parameter curve and the analytic partials of its residual.
pub trait Model<T: Value = f64>: std::fmt::Debug + Send + Sync {
    /// Short lowercase name of the model
    fn name(&self) -> &str;

    /// Evaluates the curve `f(B, x)`.
    fn y(&self, params: &Params<T>, x: T) -> T;

    /// Partial derivative of the residual `y − f(B, x)` with respect to `params[index]`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidParameterIndex`] if `index` is not `0`, `1` or `2`.
    fn partial(&self, params: &Params<T>, index: usize, x: T) -> Result<T>;

    /// Human-readable form of the curve with the given parameters.
    fn equation(&self, params: &Params<T>) -> String {
        let [a, b, c] = params;
        format!("{}(x; a = {a}, b = {b}, c = {c})", self.name())
    }

    /// Residual vector `rₖ = yₖ − f(B, xₖ)` for every point.
    fn residuals(&self, params: &Params<T>, points: &[(T, T)]) -> DVector<T> {
        DVector::from_iterator(
            points.len(),
            points.iter().map(|&(x, y)| y - self.y(params, x)),
        )
    }

    /// Jacobian of the residual vector, `J[k][j] = ∂rₖ/∂Bⱼ`.
    ///
    /// # Errors
    /// Returns an error if a partial derivative cannot be evaluated.
    fn jacobian(&self, params: &Params<T>, points: &[(T, T)]) -> Result<DMatrix<T>> {
        let mut jacobian = DMatrix::zeros(points.len(), PARAMETERS);
        for (k, &(x, _)) in points.iter().enumerate() {
            for j in 0..PARAMETERS {
                jacobian[(k, j)] = self.partial(params, j, x)?;
            }
        }
        Ok(jacobian)
    }
}

/// A model assembled from a plain fit function and a plain partial-derivative function.
///
/// # Example
/// ```rust
/// # use gaussfit::model::{FnModel, Model, Params};
/// # use gaussfit::error::{Error, Result};
/// fn line(b: &Params, x: f64) -> f64 {
///     b[0] * x + b[1] + b[2]
/// }
///
/// fn line_partial(_: &Params, index: usize, x: f64) -> Result<f64> {
///     match index {
///         0 => Ok(-x),
///         1 | 2 => Ok(-1.0),
///         _ => Err(Error::InvalidParameterIndex(index)),
///     }
/// }
///
/// let model = FnModel::new("line", line, line_partial);
/// assert_eq!(model.y(&[2.0, 1.0, 0.0], 3.0), 7.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnModel<T: Value = f64> {
    name: &'static str,
    fit: fn(&Params<T>, T) -> T,
    partial: fn(&Params<T>, usize, T) -> Result<T>,
}
impl<T: Value> FnModel<T> {
    /// Creates a model from a fit function and the partials of its residual.
    pub fn new(
        name: &'static str,
        fit: fn(&Params<T>, T) -> T,
        partial: fn(&Params<T>, usize, T) -> Result<T>,
    ) -> Self {
        Self { name, fit, partial }
    }
}
impl<T: Value> Model<T> for FnModel<T> {
    fn name(&self) -> &str {
        self.name
    }

    fn y(&self, params: &Params<T>, x: T) -> T {
        (self.fit)(params, x)
    }

    fn partial(&self, params: &Params<T>, index: usize, x: T) -> Result<T> {
        if index >= PARAMETERS {
            return Err(Error::InvalidParameterIndex(index));
        }
        (self.partial)(params, index, x)
    }
}

/// The built-in curve families, selectable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    /// See [`Quadratic`]
    Quadratic,

    /// See [`Exponential`]
    Exponential,

    /// See [`Logarithmic`]
    Logarithmic,

    /// See [`Rational`]
    Rational,
}
impl ModelKind {
    /// All built-in models
    pub const ALL: [ModelKind; 4] = [
        ModelKind::Quadratic,
        ModelKind::Exponential,
        ModelKind::Logarithmic,
        ModelKind::Rational,
    ];

    /// A starting point that converges for typical data of this shape.
    #[must_use]
    pub fn default_guess(self) -> Params {
        match self {
            ModelKind::Quadratic => [1.0, 3.0, -1.0],
            ModelKind::Exponential => [-0.3, 0.3, 0.3],
            ModelKind::Logarithmic => [-2.0, 10.0, 5.0],
            ModelKind::Rational => [0.9, 0.2, 0.1],
        }
    }

    fn as_model<T: Value>(self) -> &'static dyn Model<T> {
        match self {
            ModelKind::Quadratic => &Quadratic,
            ModelKind::Exponential => &Exponential,
            ModelKind::Logarithmic => &Logarithmic,
            ModelKind::Rational => &Rational,
        }
    }
}
impl<T: Value> Model<T> for ModelKind {
    fn name(&self) -> &str {
        self.as_model::<T>().name()
    }

    fn y(&self, params: &Params<T>, x: T) -> T {
        self.as_model().y(params, x)
    }

    fn partial(&self, params: &Params<T>, index: usize, x: T) -> Result<T> {
        self.as_model().partial(params, index, x)
    }

    fn equation(&self, params: &Params<T>) -> String {
        self.as_model().equation(params)
    }
}
impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Model::<f64>::name(self))
    }
}
impl std::str::FromStr for ModelKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|m| Model::<f64>::name(m).eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownName {
                kind: "model",
                name: s.to_string(),
            })
    }
}
