use core::f64::consts::FRAC_PI_2;

use burn::tensor::{backend::Backend, Data, ElementConversion, Shape, Tensor};

use super::ScheduleShape;
use crate::{Error, Result};

/// Upper bound on every beta, so alpha bar never reaches zero.
pub const MAX_BETA: f64 = 0.999;

const BETA_MIN: f64 = 1e-4;
const LINEAR_BETA_MAX: f64 = 0.2;
const QUADRATIC_BETA_MAX: f64 = 0.35;
const SIGMOID_BETA_MAX: f64 = 0.3;
const SIGMOID_STEEPNESS: f64 = 8.0;
const COSINE_OFFSET: f64 = 0.008;

/// The cumulative retained-signal curve `ᾱ_0..ᾱ_{T-1}`.
///
/// Every value lies in `(0, 1]` and the sequence never increases. A schedule
/// is immutable; rebuild it when the step count or the shape changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    shape: ScheduleShape,
    alphas_cumprod: Vec<f64>,
}

/// Builds the `steps`-long schedule for `shape`.
///
/// Fails with [`Error::InvalidStepCount`] when `steps < 2`.
pub fn build_schedule(steps: usize, shape: ScheduleShape) -> Result<Schedule> {
    if steps < 2 {
        return Err(Error::InvalidStepCount(steps));
    }

    let alphas_cumprod = match shape {
        ScheduleShape::Linear => cumprod(&linear_betas(steps)),
        ScheduleShape::Quadratic => cumprod(&quadratic_betas(steps)),
        ScheduleShape::Sigmoid => cumprod(&sigmoid_betas(steps)),
        ScheduleShape::Cosine => cosine_alphas_cumprod(steps),
    };

    tracing::debug!(
        steps,
        %shape,
        last_alpha_bar = alphas_cumprod[steps - 1],
        "built noise schedule"
    );

    Ok(Schedule {
        shape,
        alphas_cumprod,
    })
}

/// Interpolated alpha bar at a continuous time position, see
/// [`Schedule::alpha_bar_at`].
pub fn alpha_bar_at(schedule: &Schedule, t: f64) -> f64 {
    schedule.alpha_bar_at(t)
}

impl Schedule {
    pub fn shape(&self) -> ScheduleShape {
        self.shape
    }

    /// The number of steps `T`.
    pub fn len(&self) -> usize {
        self.alphas_cumprod.len()
    }

    /// Always false, a schedule has at least two steps.
    pub fn is_empty(&self) -> bool {
        self.alphas_cumprod.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.alphas_cumprod
    }

    /// Alpha bar at a discrete step, clamped to the last step.
    pub fn alpha_bar(&self, step: usize) -> f64 {
        self.alphas_cumprod[step.min(self.len() - 1)]
    }

    /// Alpha bar at a continuous time position `t ∈ [0, T-1]`, linearly
    /// interpolated between the two bracketing steps.
    ///
    /// `t` is clamped into range and a non-finite `t` reads as 0. Integer
    /// positions return the stored value exactly.
    pub fn alpha_bar_at(&self, t: f64) -> f64 {
        let last = (self.len() - 1) as f64;
        let t = if t.is_finite() { t.clamp(0.0, last) } else { 0.0 };

        let k = t.min(last - 1.0).floor() as usize;
        let frac = (t - k as f64).clamp(0.0, 1.0);
        let lo = self.alphas_cumprod[k];
        let hi = self.alphas_cumprod[k + 1];

        if frac >= 1.0 {
            hi
        } else {
            lo + (hi - lo) * frac
        }
    }

    /// Per-step betas recovered from the curve, `β_t = 1 - ᾱ_t / ᾱ_{t-1}`.
    pub fn betas(&self) -> Vec<f64> {
        let mut prev = 1.0;
        self.alphas_cumprod
            .iter()
            .map(|&alpha_bar| {
                let beta = 1.0 - alpha_bar / prev;
                prev = alpha_bar;
                beta
            })
            .collect()
    }

    /// The curve as a rank-1 tensor on `device`.
    pub fn to_tensor<B: Backend>(&self, device: &B::Device) -> Tensor<B, 1> {
        let values: Vec<B::FloatElem> = self.alphas_cumprod.iter().map(|v| v.elem()).collect();
        let data = Data::new(values, Shape::new([self.len()]));

        Tensor::from_data(data, device)
    }
}

fn cumprod(betas: &[f64]) -> Vec<f64> {
    let mut alphas_cumprod = Vec::with_capacity(betas.len());

    for beta in betas {
        let alpha = 1.0 - beta;
        alphas_cumprod.push(alpha * alphas_cumprod.last().copied().unwrap_or(1.0))
    }
    alphas_cumprod
}

/// Betas `β_min + g(r)·(β_max - β_min)` over the normalised step
/// `r = t / (T-1)`, capped at [`MAX_BETA`].
fn betas_from(steps: usize, beta_max: f64, g: impl Fn(f64) -> f64) -> Vec<f64> {
    let last = (steps - 1) as f64;
    (0..steps)
        .map(|t| {
            let r = t as f64 / last;
            (BETA_MIN + g(r) * (beta_max - BETA_MIN)).min(MAX_BETA)
        })
        .collect()
}

fn linear_betas(steps: usize) -> Vec<f64> {
    betas_from(steps, LINEAR_BETA_MAX, |r| r)
}

fn quadratic_betas(steps: usize) -> Vec<f64> {
    betas_from(steps, QUADRATIC_BETA_MAX, |r| r * r)
}

fn sigmoid_betas(steps: usize) -> Vec<f64> {
    betas_from(steps, SIGMOID_BETA_MAX, |r| {
        1.0 / (1.0 + (-SIGMOID_STEEPNESS * (r - 0.5)).exp())
    })
}

/// Alpha bar taken straight from the squared cosine `f(u)`, normalised by
/// `f(0)`, rather than discretised into betas.
fn cosine_alphas_cumprod(steps: usize) -> Vec<f64> {
    let total = steps as f64;
    let f = |u: f64| {
        let x = (u / total + COSINE_OFFSET) / (1.0 + COSINE_OFFSET);
        (x * FRAC_PI_2).cos().powi(2)
    };
    let f0 = f(0.0);

    (0..steps).map(|t| f(t as f64) / f0).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_valid(schedule: &Schedule, steps: usize) {
        assert_eq!(schedule.len(), steps);
        for &ab in schedule.as_slice() {
            assert!(ab > 0.0 && ab <= 1.0, "{ab} outside (0, 1]");
        }
        for pair in schedule.as_slice().windows(2) {
            assert!(pair[0] >= pair[1] - 1e-9, "{} < {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_every_shape_is_valid() {
        for shape in ScheduleShape::ALL {
            for steps in [2, 3, 20, 100, 400, 1000] {
                let schedule = build_schedule(steps, shape).unwrap();
                assert_valid(&schedule, steps);
            }
        }
    }

    #[test]
    fn test_too_few_steps() {
        for steps in [0, 1] {
            let err = build_schedule(steps, ScheduleShape::Linear).unwrap_err();
            assert!(matches!(err, Error::InvalidStepCount(s) if s == steps));
        }
    }

    #[test]
    fn test_cosine_starts_at_one() {
        let schedule = build_schedule(100, ScheduleShape::Cosine).unwrap();
        assert!((schedule.as_slice()[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_linear_ends_in_heavy_noise() {
        let schedule = build_schedule(100, ScheduleShape::Linear).unwrap();
        assert!(schedule.as_slice()[99] < 0.01);
        assert!((schedule.as_slice()[0] - (1.0 - BETA_MIN)).abs() < 1e-12);
    }

    #[test]
    fn test_two_step_linear() {
        let schedule = build_schedule(2, ScheduleShape::Linear).unwrap();
        let expected = [1.0 - BETA_MIN, (1.0 - BETA_MIN) * (1.0 - LINEAR_BETA_MAX)];
        for (got, want) in schedule.as_slice().iter().zip(expected) {
            assert!((got - want).abs() < 1e-12);
        }
    }

    #[test]
    fn test_quadratic_keeps_more_signal_early() {
        let linear = build_schedule(100, ScheduleShape::Linear).unwrap();
        let quadratic = build_schedule(100, ScheduleShape::Quadratic).unwrap();
        assert!(quadratic.alpha_bar(20) > linear.alpha_bar(20));
    }

    #[test]
    fn test_betas_are_capped() {
        for shape in ScheduleShape::ALL {
            let schedule = build_schedule(200, shape).unwrap();
            for beta in schedule.betas() {
                assert!((-1e-12..=MAX_BETA + 1e-12).contains(&beta));
            }
        }
    }

    #[test]
    fn test_betas_recover_the_linear_ramp() {
        let schedule = build_schedule(11, ScheduleShape::Linear).unwrap();
        let expected = linear_betas(11);
        for (got, want) in schedule.betas().iter().zip(&expected) {
            assert!((got - want).abs() < 1e-9);
        }
    }

    #[test]
    fn test_alpha_bar_at_integer_positions_is_exact() {
        for shape in ScheduleShape::ALL {
            let schedule = build_schedule(50, shape).unwrap();
            for step in 0..50 {
                assert_eq!(schedule.alpha_bar_at(step as f64), schedule.as_slice()[step]);
            }
        }
    }

    #[test]
    fn test_alpha_bar_at_midpoints_interpolate() {
        let schedule = build_schedule(30, ScheduleShape::Sigmoid).unwrap();
        for step in 0..29 {
            let lo = schedule.as_slice()[step];
            let hi = schedule.as_slice()[step + 1];
            let mid = alpha_bar_at(&schedule, step as f64 + 0.5);
            if lo != hi {
                assert!(mid < lo && mid > hi);
            }
            assert!((mid - (lo + hi) / 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_alpha_bar_at_clamps() {
        let schedule = build_schedule(10, ScheduleShape::Quadratic).unwrap();
        assert_eq!(schedule.alpha_bar_at(-3.0), schedule.as_slice()[0]);
        assert_eq!(schedule.alpha_bar_at(42.0), schedule.as_slice()[9]);
        assert_eq!(schedule.alpha_bar_at(f64::NAN), schedule.as_slice()[0]);
        assert_eq!(schedule.alpha_bar(100), schedule.as_slice()[9]);
    }

    #[test]
    #[cfg(feature = "ndarray")]
    fn test_to_tensor() {
        use crate::TestBackend;

        let device = <TestBackend as Backend>::Device::default();
        let schedule = build_schedule(4, ScheduleShape::Linear).unwrap();
        let tensor = schedule.to_tensor::<TestBackend>(&device);

        assert_eq!(tensor.shape(), Shape::new([4]));
        let expected: Vec<f32> = schedule.as_slice().iter().map(|&v| v as f32).collect();
        tensor
            .into_data()
            .assert_approx_eq(&Data::new(expected, Shape::new([4])), 5);
    }
}
