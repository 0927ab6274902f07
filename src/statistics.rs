//! Goodness-of-fit measures for fitted curves
//!
//! - [`r_squared`]: Proportion of variance explained by the curve. Higher is better (0 to 1).
//! - [`residual_variance`]: Unbiased estimate of the error variance after fitting `k` parameters.
//! - [`mean_squared_error`]: Average squared difference between observed and predicted values.
//! - [`root_mean_squared_error`]: Square root of the MSE, in the units of the observations.
//! - [`mean`]: Arithmetic mean of a dataset.
//!
//! # Example
//!
//! ```rust
//! use gaussfit::statistics::{r_squared, root_mean_squared_error};
//!
//! let y = vec![1.0, 2.0, 3.0];
//! let y_fit = vec![1.1, 1.9, 3.05];
//!
//! let r2 = r_squared(y.iter().copied(), y_fit.iter().copied());
//! let rmse = root_mean_squared_error(y.into_iter(), y_fit.into_iter());
//! println!("R² = {r2}, RMSE = {rmse}");
//! ```
use crate::value::Value;

/// Computes the residual variance of a model's predictions.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// σ² = Σ (y_i - y_fit_i)² / (n - k)
/// where
///   y_i = observed values, y_fit_i = predicted values,
///   n = number of observations, k = number of model parameters
/// ```
/// </div>
///
/// Returns zero when there are no degrees of freedom left (`n <= k`).
///
/// # Example
/// ```rust
/// # use gaussfit::statistics::residual_variance;
/// let y = vec![1.0, 2.0, 3.0, 4.0];
/// let y_fit = vec![0.9, 2.1, 2.95, 4.0];
/// let variance = residual_variance(y.into_iter(), y_fit.into_iter(), 3.0);
/// ```
pub fn residual_variance<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
    k: T,
) -> T {
    let mut ss_residual = T::zero();
    let mut n = T::zero();
    for (y, y_fit) in y.zip(y_fit) {
        ss_residual += Value::powi(y - y_fit, 2);
        n += T::one();
    }

    if n <= k {
        return T::zero();
    }
    ss_residual / (n - k)
}

/// Calculate the R-squared value for a set of data.
///
/// - `0` means the curve explains none of the variation.
/// - `1` means the curve explains all of it.
///
/// Poor fits can go negative: a curve further from the data than its mean explains less than
/// nothing.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// R² = 1 - (SS_res / SS_tot)
/// where
///   SS_res = Σ (y_i - y_fit_i)²
///   SS_tot = Σ (y_i - y_mean)²
/// ```
/// </div>
///
/// # Example
/// ```rust
/// # use gaussfit::statistics::r_squared;
/// let y = vec![1.0, 2.0, 3.0];
/// let r2 = r_squared(y.iter().copied(), y.iter().copied());
/// assert_eq!(r2, 1.0);
/// ```
pub fn r_squared<T: Value>(y: impl Iterator<Item = T>, y_fit: impl Iterator<Item = T>) -> T {
    let pairs: Vec<(T, T)> = y.zip(y_fit).collect();
    let y_mean = mean(pairs.iter().map(|&(y, _)| y));

    let mut ss_total = T::zero();
    let mut ss_residual = T::zero();
    for (y, y_fit) in pairs {
        ss_total += Value::powi(y - y_mean, 2);
        ss_residual += Value::powi(y - y_fit, 2);
    }

    if ss_total.is_zero() {
        // Constant data is explained exactly or not at all
        return if ss_residual.is_zero() {
            T::one()
        } else {
            T::zero()
        };
    }
    T::one() - ss_residual / ss_total
}

/// Computes the arithmetic mean of a sequence of values.
///
/// Returns zero if the iterator yields no elements.
///
/// # Examples
/// ```rust
/// let values = vec![1.0, 2.0, 3.0];
/// let m = gaussfit::statistics::mean(values.into_iter());
/// assert_eq!(m, 2.0);
/// ```
pub fn mean<T: Value>(data: impl Iterator<Item = T>) -> T {
    let mut sum = T::zero();
    let mut count = T::zero();
    for value in data {
        sum += value;
        count += T::one();
    }

    if count.is_zero() {
        return T::zero();
    }
    sum / count
}

/// Computes the mean squared error (MSE) between two sets of values.
///
/// ```math
/// MSE = (Σ (y_i - y_fit_i)²) / N
/// ```
pub fn mean_squared_error<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
) -> T {
    mean(y.zip(y_fit).map(|(y, y_fit)| Value::powi(y - y_fit, 2)))
}

/// Computes the root mean squared error (RMSE) between two sets of values.
///
/// RMSE is in the same units as the observed values. Lower values indicate a closer fit.
///
/// # Example
/// ```
/// # use gaussfit::statistics::root_mean_squared_error;
/// let y = vec![1.0, 2.0, 3.0];
/// let y_fit = vec![1.0, 2.0, 5.0];
/// let rmse = root_mean_squared_error(y.into_iter(), y_fit.into_iter());
/// assert!((rmse - (4.0f64 / 3.0).sqrt()).abs() < 1e-12);
/// ```
pub fn root_mean_squared_error<T: Value>(
    y: impl Iterator<Item = T>,
    y_fit: impl Iterator<Item = T>,
) -> T {
    mean_squared_error(y, y_fit).sqrt()
}
