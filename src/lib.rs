//! # Gaussfit
//! ## Nonlinear least squares for small curve families
//!
//! Fits three-parameter curves `f(B, x)` to `(x, y)` samples with the Gauss-Newton method, solving
//! each linearized step with a QR factorization built from scratch: either Householder
//! reflections or Givens rotations.
//!
//! Every iteration:
//! 1. Builds the residual vector `rₖ = yₖ − f(B, xₖ)` and the Jacobian `J[k][j] = ∂rₖ/∂Bⱼ`.
//! 2. Factors `J = Q·R` with the chosen [`QrMethod`].
//! 3. Solves the upper-triangular system `R·x = Qᵗ·r` by back-substitution.
//! 4. Updates `B ← B − x`.
//!
//! The loop runs a fixed number of times unless a tolerance is configured.
//!
//! ```rust
//! # use gaussfit::{GaussNewton, ModelKind, QrMethod};
//! let data: Vec<(f64, f64)> = (0..20)
//!     .map(|i| f64::from(i) * 0.5)
//!     .map(|x| (x, 0.16 * x * x + 2.0 * x + 0.85))
//!     .collect();
//!
//! let model = ModelKind::Quadratic;
//! let fit = GaussNewton::new()
//!     .with_method(QrMethod::Givens)
//!     .fit(&model, &data, model.default_guess())
//!     .unwrap();
//!
//! println!("{fit}"); // y(x) = 0.16x² + 2.00x + 0.85
//! assert!(fit.r_squared() > 0.999);
//! ```
//!
//! # Core Concepts
//! - A [`model::Model`] is a curve with three parameters `(a, b, c)` and the analytic partials of
//!   its residual. Four are built in, see [`model::ModelKind`].
//! - [`GaussNewton`] configures a solve: iteration count, factorization, optional tolerance.
//! - A [`GaussNewtonFit`] holds the fitted parameters and can report [`GaussNewtonFit::r_squared`],
//!   the residual norm history, and the equation of the fitted curve.
//! - [`points::PointSource`] lets the solver read `x,y` lines from a file or take points already
//!   in memory.
//!
//! # Implementation Details
//!
//! Matrices are `nalgebra` dense matrices. The factorizations in [`linalg`] form full orthogonal
//! factors, which suits the few-dozen-point datasets this crate targets.
//!
//! Library code never prints: diagnostics go through the `log` facade. The `gaussfit` binary
//! installs `env_logger`, so `RUST_LOG=debug gaussfit points.txt` shows each iteration.
//!
//! # Testing utilities
//!
//! Assertion macros for fitted parameters and factorizations are exported from [`test`].
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::needless_range_loop)] // The worst clippy lint
#![allow(clippy::cast_precision_loss)] // I don't care about this one
#![allow(clippy::similar_names)] //       Clippy does not get to decide what names are similar
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod test;

#[cfg(feature = "transforms")]
#[cfg_attr(docsrs, doc(cfg(feature = "transforms")))]
pub mod transforms;

pub mod display;
pub mod eigen;
pub mod error;
pub mod linalg;
pub mod model;
pub mod points;
pub mod statistics;
pub mod value;

mod fit;

pub use fit::*;
pub use linalg::QrMethod;
pub use model::{Model, ModelKind};

pub use nalgebra;
