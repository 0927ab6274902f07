//! Synthetic noise for sample data
//!
//! Used to build realistic point sets for tests and benchmarks: sample a known curve, then
//! corrupt the `y` channel and check that the fit still lands near the true parameters.
//!
//! Data can be transformed by anything implementing the [`Transform`] trait, and [`Transformable`]
//! applies a transform to the `y` channel of a point set in place.
//!
//! # Noise: [`NoiseTransform`] / [`ApplyNoise`]
//! - Gaussian noise: [`NoiseTransform::Gaussian`], via [`ApplyNoise::apply_normal_noise`]
//! - Uniform noise: [`NoiseTransform::Uniform`], via [`ApplyNoise::apply_uniform_noise`]
//!
//! # Example
//! ```rust
//! # use gaussfit::{transforms::ApplyNoise, model::{Model, Quadratic}, value::SteppedValues};
//! let data: Vec<(f64, f64)> = SteppedValues::new(0.0..=10.0, 0.5)
//!     .map(|x| (x, Quadratic.y(&[0.16, 2.0, 0.85], x)))
//!     .collect();
//!
//! let noisy = data.apply_normal_noise(0.1, Some(7));
//! ```
use crate::value::Value;

mod noise;
pub use noise::{ApplyNoise, NoiseTransform};

pub use rand;
pub use rand_distr;

/// Trait for applying transformations to data.
pub trait Transform<T: Value> {
    /// Applies the transformation to the given data.
    fn apply<'a>(&self, data: impl Iterator<Item = &'a mut T>);
}

/// Trait for transforming the `y` channel of a point set.
pub trait Transformable<T: Value> {
    /// Transforms the data in place.
    fn transform<R: Transform<T>>(&mut self, transform: &R);
}
impl<T: Value> Transformable<T> for Vec<(T, T)> {
    fn transform<R: Transform<T>>(&mut self, transform: &R) {
        transform.apply(self.iter_mut().map(|(_, y)| y));
    }
}
