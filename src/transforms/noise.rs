use rand::SeedableRng;
use rand_distr::{Distribution, Normal, Uniform};

use crate::{transforms::Transform, value::Value};

/// Types of noise based transforms for data
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoiseTransform<T: Value> {
    /// Adds independent Gaussian noise to every value.
    ///
    /// <div class="warning">
    ///
    /// **Technical Details**
    ///
    /// ```math
    /// xₙ' = xₙ + εₙ
    /// where
    ///   εₙ ~ N(0, strength²)
    /// ```
    /// </div>
    Gaussian {
        /// Standard deviation of the noise, in the units of the data.
        strength: T,

        /// Fixes the RNG seed for reproducibility.
        /// If not provided, a system RNG will be used each run.
        seed: Option<u64>,
    },

    /// Adds noise drawn uniformly from `[-strength, +strength)` to every value.
    Uniform {
        /// Maximum deviation from the original value.
        strength: T,

        /// Fixes the RNG seed for reproducibility.
        /// If not provided, a system RNG will be used each run.
        seed: Option<u64>,
    },
}
impl<T: Value> NoiseTransform<T> {
    fn seed(&self) -> Option<u64> {
        match self {
            NoiseTransform::Gaussian { seed, .. } | NoiseTransform::Uniform { seed, .. } => *seed,
        }
    }

    fn rng(seed: Option<u64>) -> rand::rngs::SmallRng {
        match seed {
            Some(s) => rand::rngs::SmallRng::seed_from_u64(s),
            None => rand::rngs::SmallRng::from_rng(&mut rand::rng()),
        }
    }
}
impl<T: Value> Transform<T> for NoiseTransform<T>
where
    T: num_traits::Float + rand_distr::uniform::SampleUniform,
    rand_distr::StandardNormal: rand_distr::Distribution<T>,
{
    fn apply<'a>(&self, data: impl Iterator<Item = &'a mut T>) {
        let mut rng = Self::rng(self.seed());
        match self {
            NoiseTransform::Gaussian { strength, .. } => {
                let gaussian = match Normal::new(T::zero(), Value::abs(*strength)) {
                    Ok(gaussian) => gaussian,
                    Err(e) => {
                        log::warn!("Skipping gaussian noise with strength {strength}: {e}");
                        return;
                    }
                };

                data.for_each(|v| *v += gaussian.sample(&mut rng));
            }

            NoiseTransform::Uniform { strength, .. } => {
                let strength = nalgebra::RealField::max(
                    Value::abs(*strength),
                    <T as num_traits::Float>::epsilon(),
                );
                let uniform = match Uniform::new(-strength, strength) {
                    Ok(uniform) => uniform,
                    Err(e) => {
                        log::warn!("Skipping uniform noise with strength {strength}: {e}");
                        return;
                    }
                };

                data.for_each(|v| *v += uniform.sample(&mut rng));
            }
        }
    }
}

/// Trait for applying noise to the `y` channel of a point set.
pub trait ApplyNoise<T: Value>
where
    Self: Sized,
{
    /// Adds Gaussian noise with standard deviation `strength`.
    ///
    /// See [`NoiseTransform::Gaussian`].
    ///
    /// # Example
    /// ```rust
    /// # use gaussfit::transforms::ApplyNoise;
    /// let data = vec![(1.0, 2.0), (2.0, 3.0)];
    /// let noisy_data = data.apply_normal_noise(0.1, None);
    /// ```
    #[must_use]
    fn apply_normal_noise(self, strength: T, seed: Option<u64>) -> Self;

    /// Adds uniform noise in `[-strength, +strength)`.
    ///
    /// See [`NoiseTransform::Uniform`].
    ///
    /// # Example
    /// ```rust
    /// # use gaussfit::transforms::ApplyNoise;
    /// let data = vec![(1.0, 2.0), (2.0, 3.0)];
    /// let noisy_data = data.apply_uniform_noise(0.05, Some(3));
    /// ```
    #[must_use]
    fn apply_uniform_noise(self, strength: T, seed: Option<u64>) -> Self;
}

impl<T: Value> ApplyNoise<T> for Vec<(T, T)>
where
    T: num_traits::Float + rand_distr::uniform::SampleUniform,
    rand_distr::StandardNormal: rand_distr::Distribution<T>,
{
    fn apply_normal_noise(mut self, strength: T, seed: Option<u64>) -> Self {
        NoiseTransform::Gaussian { strength, seed }.apply(self.iter_mut().map(|(_, y)| y));
        self
    }

    fn apply_uniform_noise(mut self, strength: T, seed: Option<u64>) -> Self {
        NoiseTransform::Uniform { strength, seed }.apply(self.iter_mut().map(|(_, y)| y));
        self
    }
}

#[cfg(test)]
#[allow(clippy::cast_precision_loss, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::transforms::Transformable;

    fn noise_stats(data: &[(f64, f64)], noisy: &[(f64, f64)]) -> (f64, f64) {
        let diffs: Vec<f64> = data
            .iter()
            .zip(noisy)
            .map(|((_, y1), (_, y2))| y2 - y1)
            .collect();

        let mean = diffs.iter().sum::<f64>() / diffs.len() as f64;
        let std_dev =
            (diffs.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / diffs.len() as f64).sqrt();
        (mean, std_dev)
    }

    #[test]
    fn test_gaussian() {
        let data = vec![(1.0, 2.0); 1000];
        let noisy = data.clone().apply_normal_noise(0.1, Some(42));

        let (mean, std_dev) = noise_stats(&data, &noisy);
        assert!(mean.abs() < 0.02);
        assert!((std_dev - 0.1).abs() < 0.02);

        // x is untouched
        assert!(noisy.iter().all(|&(x, _)| x == 1.0));
    }

    #[test]
    fn test_uniform() {
        let data = vec![(1.0, 2.0); 1000];
        let noisy = data.clone().apply_uniform_noise(0.1, Some(42));

        let (mean, std_dev) = noise_stats(&data, &noisy);
        assert!(mean.abs() < 0.02);
        assert!((std_dev - (0.1 / 3.0f64.sqrt())).abs() < 0.02);
        assert!(noisy.iter().all(|&(_, y)| (y - 2.0).abs() <= 0.1));
    }

    #[test]
    fn test_seed_is_reproducible() {
        let data = vec![(0.0, 0.0); 16];
        let a = data.clone().apply_normal_noise(1.0, Some(9));
        let b = data.clone().apply_normal_noise(1.0, Some(9));
        let c = data.apply_normal_noise(1.0, Some(10));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_transformable() {
        let mut data = vec![(0.0, 5.0); 8];
        data.transform(&NoiseTransform::Gaussian {
            strength: 0.0,
            seed: Some(1),
        });
        assert_eq!(data, vec![(0.0, 5.0); 8]);
    }
}
