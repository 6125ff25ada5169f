//! Standard-normal sampling and the episode noise draw.

use core::f64::consts::TAU;

use num_traits::Float;
use rand::Rng;

use super::rng::Mulberry32;

/// Draws one standard-normal deviate with the Box–Muller transform.
///
/// `u == 0` is resampled so the logarithm stays finite.
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let mut u: f64 = rng.random();
    while u <= 0.0 {
        u = rng.random();
    }
    let v: f64 = rng.random();
    (-2.0 * u.ln()).sqrt() * (TAU * v).cos()
}

/// Fills `out` with independent standard-normal deviates.
pub fn fill_standard_normal<F: Float, R: Rng + ?Sized>(rng: &mut R, out: &mut [F]) {
    for value in out.iter_mut() {
        *value = F::from(standard_normal(rng)).unwrap_or_else(F::zero);
    }
}

/// The noise draw ε for one episode: `len` standard-normal components from a
/// [`Mulberry32`] seeded with `seed`.
///
/// Forward and reverse halves of an episode must share this buffer, so the
/// same `(len, seed)` always yields the same values.
pub fn noise_vec<F: Float>(len: usize, seed: u32) -> Vec<F> {
    let mut rng = Mulberry32::new(seed);
    let mut eps = vec![F::zero(); len];
    fill_standard_normal(&mut rng, &mut eps);
    eps
}

/// Synthetic data for the sampling demos: `n` draws from `N(mean, variance)`.
pub fn gaussian_samples(mean: f64, variance: f64, n: usize, seed: u32) -> Vec<f64> {
    let std = variance.max(0.0).sqrt();
    let mut rng = Mulberry32::new(seed);
    (0..n)
        .map(|_| standard_normal(&mut rng).mul_add(std, mean))
        .collect()
}

pub fn sample_mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Unbiased sample variance (`n - 1` denominator). Zero for fewer than two
/// samples.
pub fn sample_variance(samples: &[f64]) -> f64 {
    let n = samples.len();
    if n < 2 {
        return 0.0;
    }
    let mean = sample_mean(samples);
    samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_standard_normal_moments() {
        let mut rng = Mulberry32::new(1234);
        let draws: Vec<f64> = (0..100_000).map(|_| standard_normal(&mut rng)).collect();

        assert!(sample_mean(&draws).abs() < 0.05);
        assert!((sample_variance(&draws) - 1.0).abs() < 0.1);
    }

    #[test]
    fn test_standard_normal_accepts_any_rng() {
        let mut rng = StdRng::seed_from_u64(5);
        let draws: Vec<f64> = (0..20_000).map(|_| standard_normal(&mut rng)).collect();

        assert!(draws.iter().all(|x| x.is_finite()));
        assert!(sample_mean(&draws).abs() < 0.05);
    }

    /// A generator stuck at zero for its first draw must not produce `-inf`.
    #[test]
    fn test_standard_normal_resamples_zero() {
        struct ZeroFirst {
            inner: Mulberry32,
            calls: usize,
        }

        impl rand::RngCore for ZeroFirst {
            fn next_u32(&mut self) -> u32 {
                self.calls += 1;
                if self.calls <= 2 {
                    0
                } else {
                    self.inner.next_u32()
                }
            }

            fn next_u64(&mut self) -> u64 {
                rand::rand_core::impls::next_u64_via_u32(self)
            }

            fn fill_bytes(&mut self, dst: &mut [u8]) {
                rand::rand_core::impls::fill_bytes_via_next(self, dst)
            }
        }

        let mut rng = ZeroFirst {
            inner: Mulberry32::new(3),
            calls: 0,
        };
        assert!(standard_normal(&mut rng).is_finite());
    }

    #[test]
    fn test_noise_vec_is_reproducible() {
        let a: Vec<f32> = noise_vec(32, 99);
        let b: Vec<f32> = noise_vec(32, 99);
        let c: Vec<f32> = noise_vec(32, 100);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_gaussian_samples_follow_parameters() {
        let samples = gaussian_samples(3.0, 4.0, 50_000, 11);

        assert!((sample_mean(&samples) - 3.0).abs() < 0.05);
        assert!((sample_variance(&samples) - 4.0).abs() < 0.15);
    }

    #[test]
    fn test_negative_variance_collapses_to_mean() {
        let samples = gaussian_samples(-1.5, -2.0, 10, 0);
        assert!(samples.iter().all(|&x| x == -1.5));
    }

    #[test]
    fn test_variance_of_tiny_inputs() {
        assert_eq!(sample_variance(&[]), 0.0);
        assert_eq!(sample_variance(&[2.0]), 0.0);
        assert_eq!(sample_variance(&[1.0, 3.0]), 2.0);
    }
}
