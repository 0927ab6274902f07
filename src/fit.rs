use nalgebra::{DMatrix, DVector};

use crate::{
    error::{Error, Result},
    linalg::{self, solve_upper3, QrMethod},
    model::{Model, Params, PARAMETERS},
    points::PointSource,
    statistics,
    value::{CoordExt, Value},
};

/// Iteration count used when none is configured.
pub const DEFAULT_ITERATIONS: usize = 5;

/// Configuration for a Gauss-Newton least-squares solve.
///
/// Each iteration rebuilds the residual vector and Jacobian from the current parameters, factors
/// the Jacobian as `J = Q·R`, solves `R·x = Qᵗ·r` and updates `B ← B − x`.
///
/// By default the solver runs exactly [`DEFAULT_ITERATIONS`] iterations with Householder QR.
/// An optional tolerance on the improvement of the residual norm allows it to stop sooner.
///
/// # Example
/// ```rust
/// # use gaussfit::{GaussNewton, linalg::QrMethod, model::Quadratic};
/// let data = vec![(0.0, 1.0), (1.0, 3.0), (2.0, 7.0), (3.0, 13.0)];
/// let fit = GaussNewton::<f64>::new()
///     .with_method(QrMethod::Givens)
///     .fit(&Quadratic, &data, [0.0, 0.0, 0.0])
///     .unwrap();
///
/// // y = x² + x + 1
/// assert!((fit.params()[0] - 1.0).abs() < 1e-9);
/// println!("{}", fit.equation());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussNewton<T: Value = f64> {
    iterations: usize,
    method: QrMethod,
    tolerance: Option<T>,
}

impl<T: Value> Default for GaussNewton<T> {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            method: QrMethod::default(),
            tolerance: None,
        }
    }
}

impl<T: Value> GaussNewton<T> {
    /// Creates a solver with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of iterations.
    #[must_use]
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the factorization used for each linear step.
    #[must_use]
    pub fn with_method(mut self, method: QrMethod) -> Self {
        self.method = method;
        self
    }

    /// Stops early once an iteration improves the residual norm by at most `tolerance`.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    /// Maximum number of iterations
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Factorization used for each linear step
    #[must_use]
    pub fn method(&self) -> QrMethod {
        self.method
    }

    /// Early-stopping tolerance, if any
    #[must_use]
    pub fn tolerance(&self) -> Option<T> {
        self.tolerance
    }

    /// Fits `model` to the points from `source`, starting at `initial_guess`.
    ///
    /// # Errors
    /// - [`Error::NoData`] or [`Error::NotEnoughData`] if there are fewer points than parameters.
    /// - [`Error::SingularMatrix`] if the Jacobian loses rank.
    /// - [`Error::NonFinite`] if the parameters, residuals or Jacobian stop being finite.
    /// - Any error from loading the points.
    ///
    /// A failure aborts the remaining iterations.
    pub fn fit<'m, M, S>(
        &self,
        model: &'m M,
        source: &S,
        initial_guess: Params<T>,
    ) -> Result<GaussNewtonFit<'m, M, T>>
    where
        M: Model<T> + ?Sized,
        S: PointSource<T> + ?Sized,
    {
        let points = source.points()?.into_owned();
        if points.is_empty() {
            return Err(Error::NoData);
        }
        if points.len() < PARAMETERS {
            return Err(Error::NotEnoughData {
                points: points.len(),
                parameters: PARAMETERS,
            });
        }

        let mut params = initial_guess;
        let (mut residuals, mut jacobian) = linearize(model, &params, &points, 0)?;
        let mut norm = linalg::norm(residuals.as_slice());
        let mut history = vec![norm];
        let mut converged = false;

        log::debug!(
            "{}: fitting {} points with {} qr, |r| = {norm:e}",
            model.name(),
            points.len(),
            self.method
        );

        for iteration in 1..=self.iterations {
            let qr = self.method.factor(&jacobian)?;
            let qtr = qr.qt_mul(&residuals)?;
            let (x, y, z) = solve_upper3(qr.r(), &qtr)?;

            let step = DVector::from_vec(vec![-x, -y, -z]);
            let updated = linalg::add(&DVector::from_row_slice(&params), &step)?;
            params = [updated[0], updated[1], updated[2]];

            (residuals, jacobian) = linearize(model, &params, &points, iteration)?;
            let next = linalg::norm(residuals.as_slice());
            history.push(next);

            log::debug!(
                "{}: iteration {iteration}, |r| = {next:e}, params = {params:?}",
                model.name()
            );

            let improvement = norm - next;
            norm = next;
            if let Some(tolerance) = self.tolerance {
                if Value::abs(improvement) <= tolerance {
                    converged = true;
                    break;
                }
            }
        }

        if let (Some(tolerance), false) = (self.tolerance, converged) {
            log::warn!(
                "{}: residual norm did not settle within {tolerance:e} after {} iterations",
                model.name(),
                self.iterations
            );
        }

        Ok(GaussNewtonFit {
            model,
            points,
            params,
            residuals,
            history,
            converged,
        })
    }

    /// Fits several models to the same points.
    ///
    /// Each job is an independent solve with its own starting point. With the `parallel` feature
    /// the solves run on the rayon thread pool.
    #[allow(clippy::let_and_return)]
    pub fn fit_all<'m, M: Model<T>>(
        &self,
        points: &[(T, T)],
        jobs: &'m [(M, Params<T>)],
    ) -> Vec<Result<GaussNewtonFit<'m, M, T>>> {
        #[cfg(not(feature = "parallel"))]
        let fits = jobs
            .iter()
            .map(|(model, guess)| self.fit(model, points, *guess))
            .collect();

        #[cfg(feature = "parallel")]
        let fits = {
            use rayon::prelude::*;
            jobs.par_iter()
                .map(|(model, guess)| self.fit(model, points, *guess))
                .collect()
        };

        fits
    }
}

/// Rebuilds the residual vector and Jacobian at `params`, rejecting non-finite values.
fn linearize<M: Model<T> + ?Sized, T: Value>(
    model: &M,
    params: &Params<T>,
    points: &[(T, T)],
    iteration: usize,
) -> Result<(DVector<T>, DMatrix<T>)> {
    let residuals = model.residuals(params, points);
    let jacobian = model.jacobian(params, points)?;

    let finite = params.iter().all(|p| p.is_real())
        && residuals.iter().all(|r| r.is_real())
        && jacobian.iter().all(|j| j.is_real());
    if !finite {
        return Err(Error::NonFinite { iteration });
    }

    Ok((residuals, jacobian))
}

/// Fits `model` with a fixed iteration count and returns the final parameters.
///
/// Shorthand for [`GaussNewton::fit`] with the given iteration count and method.
///
/// # Errors
/// See [`GaussNewton::fit`].
///
/// # Example
/// ```rust
/// # use gaussfit::{gauss_newton, linalg::QrMethod, model::Quadratic};
/// let data: Vec<(f64, f64)> = vec![(0.0, 1.0), (1.0, 3.0), (2.0, 7.0), (3.0, 13.0)];
/// let [a, b, c] = gauss_newton(&data, [1.0, 3.0, -1.0], 5, QrMethod::Householder, &Quadratic).unwrap();
/// assert!((a - 1.0).abs() < 1e-9 && (b - 1.0).abs() < 1e-9 && (c - 1.0).abs() < 1e-9);
/// ```
pub fn gauss_newton<T, S, M>(
    source: &S,
    initial_guess: Params<T>,
    iterations: usize,
    method: QrMethod,
    model: &M,
) -> Result<Params<T>>
where
    T: Value,
    S: PointSource<T> + ?Sized,
    M: Model<T> + ?Sized,
{
    GaussNewton::new()
        .with_iterations(iterations)
        .with_method(method)
        .fit(model, source, initial_guess)
        .map(GaussNewtonFit::into_params)
}

/// The result of a Gauss-Newton solve.
///
/// Holds the fitted parameters along with the points they were fitted to, so the quality of the
/// fit can be inspected afterwards.
#[derive(Debug, Clone)]
pub struct GaussNewtonFit<'m, M: Model<T> + ?Sized, T: Value = f64> {
    model: &'m M,
    points: Vec<(T, T)>,
    params: Params<T>,
    residuals: DVector<T>,
    history: Vec<T>,
    converged: bool,
}

impl<M: Model<T> + ?Sized, T: Value> GaussNewtonFit<'_, M, T> {
    /// The fitted parameters `(a, b, c)`
    #[must_use]
    pub fn params(&self) -> &Params<T> {
        &self.params
    }

    /// Consumes the fit, returning the fitted parameters
    #[must_use]
    pub fn into_params(self) -> Params<T> {
        self.params
    }

    /// The model that was fitted
    #[must_use]
    pub fn model(&self) -> &M {
        self.model
    }

    /// The points the model was fitted to
    #[must_use]
    pub fn data(&self) -> &[(T, T)] {
        &self.points
    }

    /// Number of iterations actually performed
    #[must_use]
    pub fn iterations(&self) -> usize {
        self.history.len() - 1
    }

    /// True if the solve stopped early because the residual norm settled.
    ///
    /// Always false without a tolerance.
    #[must_use]
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Residual norm `‖y − f(B, x)‖` at the fitted parameters
    #[must_use]
    pub fn residual_norm(&self) -> T {
        self.history.last().copied().unwrap_or_else(T::zero)
    }

    /// Residual norm before the first iteration and after each one
    #[must_use]
    pub fn history(&self) -> &[T] {
        &self.history
    }

    /// Per-point residuals `yₖ − f(B, xₖ)` at the fitted parameters
    #[must_use]
    pub fn residuals(&self) -> &[T] {
        self.residuals.as_slice()
    }

    /// Evaluates the fitted curve at `x`
    pub fn y(&self, x: T) -> T {
        self.model.y(&self.params, x)
    }

    /// Fitted values at each `x` of the source data
    pub fn solution(&self) -> Vec<(T, T)> {
        self.points.x_iter().map(|x| (x, self.y(x))).collect()
    }

    /// Proportion of the variance in the data explained by the fitted curve.
    ///
    /// See [`statistics::r_squared`].
    pub fn r_squared(&self) -> T {
        let y_fit = self.solution().into_iter().map(|(_, y)| y);
        statistics::r_squared(self.points.y_iter(), y_fit)
    }

    /// Root mean squared error against the source data.
    ///
    /// See [`statistics::root_mean_squared_error`].
    pub fn rmse(&self) -> T {
        let y_fit = self.solution().into_iter().map(|(_, y)| y);
        statistics::root_mean_squared_error(self.points.y_iter(), y_fit)
    }

    /// Unbiased estimate of the noise variance, with three fitted parameters.
    ///
    /// See [`statistics::residual_variance`].
    pub fn residual_variance(&self) -> T {
        let y_fit = self.solution().into_iter().map(|(_, y)| y);
        let k = T::one() + T::two();
        statistics::residual_variance(self.points.y_iter(), y_fit, k)
    }

    /// Human-readable equation of the fitted curve
    pub fn equation(&self) -> String {
        self.model.equation(&self.params)
    }
}

impl<M: Model<T> + ?Sized, T: Value> std::fmt::Display for GaussNewtonFit<'_, M, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.equation())
    }
}
