use crate::{
    display::{format_coefficient, format_equation, format_shift, Sign, Term, DEFAULT_PRECISION},
    error::{Error, Result},
    model::{Model, Params},
    value::Value,
};

/// Rational curve `a·x / (x + b) + c`.
///
/// A saturating curve approaching `a + c` for large `x`. Undefined at `x = −b`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rational;

impl<T: Value> Model<T> for Rational {
    fn name(&self) -> &str {
        "rational"
    }

    fn y(&self, params: &Params<T>, x: T) -> T {
        let [a, b, c] = *params;
        a * x / (x + b) + c
    }

    fn partial(&self, params: &Params<T>, index: usize, x: T) -> Result<T> {
        let [a, b, _] = *params;
        match index {
            0 => Ok(-x / (x + b)),
            1 => Ok(a * x / Value::powi(x + b, 2)),
            2 => Ok(-T::one()),
            _ => Err(Error::InvalidParameterIndex(index)),
        }
    }

    fn equation(&self, params: &Params<T>) -> String {
        let [a, b, c] = *params;
        let mut terms = Vec::with_capacity(2);

        if let Some(scale) = format_coefficient(a, DEFAULT_PRECISION) {
            let body = format!("{scale}x/({})", format_shift(b, DEFAULT_PRECISION));
            terms.push(Term::new(Sign::from_coef(a), body));
        }

        if let Some(offset) = format_coefficient(c, DEFAULT_PRECISION) {
            terms.push(Term::new(Sign::from_coef(c), offset));
        }

        format_equation(terms)
    }
}
