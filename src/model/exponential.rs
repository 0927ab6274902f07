use crate::{
    display::{format_coefficient, format_equation, Sign, Term, DEFAULT_PRECISION},
    error::{Error, Result},
    model::{Model, Params},
    value::Value,
};

/// Exponential curve `a·eᵇˣ + c`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Exponential;

impl<T: Value> Model<T> for Exponential {
    fn name(&self) -> &str {
        "exponential"
    }

    fn y(&self, params: &Params<T>, x: T) -> T {
        let [a, b, c] = *params;
        a * (b * x).exp() + c
    }

    fn partial(&self, params: &Params<T>, index: usize, x: T) -> Result<T> {
        let [a, b, _] = *params;
        match index {
            0 => Ok(-(b * x).exp()),
            1 => Ok(-a * x * (b * x).exp()),
            2 => Ok(-T::one()),
            _ => Err(Error::InvalidParameterIndex(index)),
        }
    }

    fn equation(&self, params: &Params<T>) -> String {
        let [a, b, c] = *params;
        let mut terms = Vec::with_capacity(2);

        if let Some(scale) = format_coefficient(a, DEFAULT_PRECISION) {
            // e⁰ is 1, leaving only the scale
            let body = match format_coefficient(b, DEFAULT_PRECISION) {
                Some(rate) if Value::is_sign_negative(&b) => format!("{scale}·e^(-{rate}x)"),
                Some(rate) => format!("{scale}·e^({rate}x)"),
                None => scale,
            };
            terms.push(Term::new(Sign::from_coef(a), body));
        }

        if let Some(offset) = format_coefficient(c, DEFAULT_PRECISION) {
            terms.push(Term::new(Sign::from_coef(c), offset));
        }

        format_equation(terms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_close, test::model_assertions::assert_partials_match};

    #[test]
    fn test_exponential() {
        let params = [-0.2, 0.5, -0.07];
        assert_close!(Exponential.y(&params, 0.0), -0.27);
        assert_close!(Exponential.y(&params, 2.0), -0.2 * 1.0f64.exp() - 0.07);
        assert_close!(Exponential.partial(&params, 1, 2.0).unwrap(), 0.4 * 1.0f64.exp());

        assert_partials_match(&Exponential, &params, &[-1.0, 0.0, 0.5, 3.0, 6.0]);
        assert!(Exponential.partial(&params, 3, 1.0).is_err());
    }

    #[test]
    fn test_exponential_equation() {
        assert_eq!(
            Exponential.equation(&[-0.2, 0.5, -0.07]),
            "y(x) = -0.20·e^(0.50x) - 0.07"
        );
        assert_eq!(Exponential.equation(&[3.0, -1.5, 0.0]), "y(x) = 3.00·e^(-1.50x)");
        assert_eq!(Exponential.equation(&[2.0, 0.0, 1.0]), "y(x) = 2.00 + 1.00");
    }
}
