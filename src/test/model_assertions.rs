//! Checks for hand-derived model partials.
use crate::{
    model::{Model, Params, PARAMETERS},
    value::Value,
};

/// Asserts that the analytic residual partials of a model agree with central differences of its
/// curve.
///
/// The residual is `y − f(B, x)`, so the expected partial for parameter `j` is
/// `−(f(B + h·eⱼ, x) − f(B − h·eⱼ, x)) / 2h`.
///
/// # Panics
/// Panics if a partial cannot be evaluated, or differs from the estimate by more than `1e-5`
/// relative to its magnitude.
pub fn assert_partials_match<M: Model<T>, T: Value>(model: &M, params: &Params<T>, xs: &[T]) {
    let Ok(step) = T::try_cast(1e-6) else {
        panic!("Cannot represent the finite-difference step");
    };
    let Ok(tol) = T::try_cast(1e-5) else {
        panic!("Cannot represent the finite-difference tolerance");
    };

    for &x in xs {
        for j in 0..PARAMETERS {
            let h = step * nalgebra::RealField::max(T::one(), Value::abs(params[j]));

            let mut above = *params;
            above[j] += h;
            let mut below = *params;
            below[j] -= h;

            let estimate = -(model.y(&above, x) - model.y(&below, x)) / (T::two() * h);
            let analytic = model
                .partial(params, j, x)
                .unwrap_or_else(|e| panic!("{} partial {j} at x = {x}: {e}", model.name()));

            let scale = nalgebra::RealField::max(T::one(), Value::abs(analytic));
            assert!(
                Value::abs_sub(analytic, estimate) <= tol * scale,
                "{} partial {j} at x = {x}: analytic {analytic} != estimate {estimate}",
                model.name()
            );
        }
    }
}
