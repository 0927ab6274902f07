//! Utilities for displaying fitted curves
//!
//! Models render their equation as a list of [`Term`]s, each a [`Sign`] and a body such as
//! `0.16x²` or `3.02·ln(x + 7.80)`. [`format_equation`] joins the terms into `y(x) = ...`
//! with the signs written between them.
//!
//! # Helpers
//! - [`format_coefficient`]: Formats the magnitude of a coefficient, skipping zeros.
//! - [`format_variable`]: Adds a Unicode superscript exponent to a variable.
//! - [`format_shift`]: Renders `x + b` / `x - b` for shifted arguments.
use crate::value::Value;

/// Default precision for formatting coefficients
pub const DEFAULT_PRECISION: usize = 2;

/// Magnitudes outside this range are written in scientific notation
const FIXED_RANGE: std::ops::Range<f64> = 1e-3..1e3;

/// Represents the sign of a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Positive sign (`+` when displayed).
    Positive,

    /// Negative sign (`-` when displayed).
    Negative,
}

impl Sign {
    /// Determines the sign from a numeric coefficient.
    ///
    /// # Example
    /// ```
    /// # use gaussfit::display::Sign;
    /// assert_eq!(Sign::from_coef(3.0), Sign::Positive);
    /// assert_eq!(Sign::from_coef(-2.0), Sign::Negative);
    /// ```
    pub fn from_coef<T: Value>(coef: T) -> Self {
        if Value::is_sign_negative(&coef) {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    /// Returns the character representation of the sign.
    #[must_use]
    pub fn char(&self) -> char {
        match self {
            Sign::Positive => '+',
            Sign::Negative => '-',
        }
    }
}

/// A single term of an equation: a sign and the formatted magnitude.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// The sign of the term
    pub sign: Sign,

    /// The body of the term (e.g., `"2.00x²"`, `"3.14"`)
    pub body: String,
}

impl Term {
    /// Creates a new term with the given sign and body.
    #[must_use]
    pub fn new(sign: Sign, body: String) -> Self {
        Self { sign, body }
    }
}

/// Formats the magnitude of a coefficient for display.
///
/// - Returns `None` if the coefficient is zero or effectively zero (≤ epsilon).
/// - Formats as a decimal if the magnitude is between `1e-3` and `1e3`.
/// - Formats in scientific notation otherwise.
///
/// # Example
/// ```
/// # use gaussfit::display::format_coefficient;
/// assert_eq!(format_coefficient(0.0, 2), None);
/// assert_eq!(format_coefficient(-2.5, 2), Some("2.50".to_string()));
/// assert_eq!(format_coefficient(1e5, 2), Some("1.00e5".to_string()));
/// ```
pub fn format_coefficient<T: Value>(coef: T, precision: usize) -> Option<String> {
    let abs = Value::abs(coef);
    if coef.is_zero() || abs <= T::epsilon() {
        return None;
    }

    if FIXED_RANGE.contains(&abs.to_f64()) {
        Some(format!("{abs:.precision$}"))
    } else {
        Some(format!("{abs:.precision$e}"))
    }
}

/// Formats a variable raised to an integer power.
///
/// # Examples
/// ```
/// # use gaussfit::display::format_variable;
/// assert_eq!(format_variable("x", 0), "");
/// assert_eq!(format_variable("x", 1), "x");
/// assert_eq!(format_variable("x", 2), "x²");
/// ```
#[must_use]
pub fn format_variable(base: &str, exp: i32) -> String {
    match exp {
        0 => String::new(),
        1 => base.to_string(),
        _ => format!("{base}{}", superscript(&exp.to_string())),
    }
}

/// Formats `x` shifted by a constant, as `x + 2.00` or `x - 2.00`.
///
/// A zero shift is just `x`.
#[must_use]
pub fn format_shift<T: Value>(shift: T, precision: usize) -> String {
    match format_coefficient(shift, precision) {
        Some(magnitude) => format!("x {} {magnitude}", Sign::from_coef(shift).char()),
        None => "x".to_string(),
    }
}

/// Writes `y(x) = ...` from a list of terms.
///
/// The first term is written without a leading `+`, and an empty list renders as `y(x) = 0`.
///
/// # Example
/// ```
/// # use gaussfit::display::{format_equation, Sign, Term};
/// let terms = vec![
///     Term::new(Sign::Negative, "2.00x".to_string()),
///     Term::new(Sign::Positive, "1.00".to_string()),
/// ];
/// assert_eq!(format_equation(terms), "y(x) = -2.00x + 1.00");
/// ```
#[must_use]
pub fn format_equation(terms: Vec<Term>) -> String {
    let mut terms = terms.into_iter();
    let Some(first) = terms.next() else {
        return "y(x) = 0".to_string();
    };

    let mut out = String::from("y(x) = ");
    if first.sign == Sign::Negative {
        out.push('-');
    }
    out.push_str(&first.body);

    for term in terms {
        out.push(' ');
        out.push(term.sign.char());
        out.push(' ');
        out.push_str(&term.body);
    }
    out
}

/// Convert a string into a superscript string, ignoring invalid characters
fn superscript(s: &str) -> String {
    s.chars()
        .filter_map(|c| match c {
            '0' => Some('⁰'),
            '1' => Some('¹'),
            '2' => Some('²'),
            '3' => Some('³'),
            '4' => Some('⁴'),
            '5' => Some('⁵'),
            '6' => Some('⁶'),
            '7' => Some('⁷'),
            '8' => Some('⁸'),
            '9' => Some('⁹'),
            '-' => Some('⁻'),
            _ => None,
        })
        .collect()
}
