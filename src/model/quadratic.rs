use crate::{
    display::{format_coefficient, format_equation, format_variable, Sign, Term, DEFAULT_PRECISION},
    error::{Error, Result},
    model::{Model, Params},
    value::Value,
};

/// Quadratic curve `a·x² + b·x + c`.
///
/// The residual is linear in every parameter, so Gauss-Newton reaches the least-squares
/// solution in a single step from any starting point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Quadratic;

impl<T: Value> Model<T> for Quadratic {
    fn name(&self) -> &str {
        "quadratic"
    }

    fn y(&self, params: &Params<T>, x: T) -> T {
        let [a, b, c] = *params;
        a * Value::powi(x, 2) + b * x + c
    }

    fn partial(&self, _: &Params<T>, index: usize, x: T) -> Result<T> {
        match index {
            0 => Ok(-Value::powi(x, 2)),
            1 => Ok(-x),
            2 => Ok(-T::one()),
            _ => Err(Error::InvalidParameterIndex(index)),
        }
    }

    fn equation(&self, params: &Params<T>) -> String {
        let terms = params
            .iter()
            .zip([2, 1, 0])
            .filter_map(|(&coef, degree)| {
                let magnitude = format_coefficient(coef, DEFAULT_PRECISION)?;
                let body = format!("{magnitude}{}", format_variable("x", degree));
                Some(Term::new(Sign::from_coef(coef), body))
            })
            .collect();
        format_equation(terms)
    }
}
