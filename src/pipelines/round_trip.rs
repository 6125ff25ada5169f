use burn::config::Config;
use num_traits::Float;

use crate::schedulers::forward::forward_sample_into;
use crate::schedulers::{build_schedule, Schedule, ScheduleShape};
use crate::utils::gaussian::noise_vec;

/// Maps episode progress to a time position on a `steps`-long schedule.
///
/// The first half of the episode runs `0 → T-1` (noising), the second half
/// mirrors it back `T-1 → 0` (denoising). Progress is clamped to `[0, 1]`.
pub fn episode_time(progress: f64, steps: usize) -> f64 {
    let last = steps.saturating_sub(1) as f64;
    let progress = if progress.is_finite() {
        progress.clamp(0.0, 1.0)
    } else {
        0.0
    };

    if progress <= 0.5 {
        progress * 2.0 * last
    } else {
        last - (progress - 0.5) * 2.0 * last
    }
}

/// The on-screen label for a signal level, e.g. `ᾱ≈0.0234`.
pub fn format_alpha_bar(alpha_bar: f64) -> String {
    format!("ᾱ≈{alpha_bar:.4}")
}

/// Configuration of a noise-then-denoise episode.
#[derive(Config, Debug)]
pub struct RoundTripConfig {
    /// The number of diffusion steps.
    pub steps: usize,
    /// How beta evolves over the steps.
    #[config(default = "ScheduleShape::Linear")]
    pub shape: ScheduleShape,
    /// Seed of the episode's noise draw.
    #[config(default = 0)]
    pub seed: u32,
}

/// One episode: a signal, its schedule and the noise draw shared by both
/// halves.
#[derive(Debug, Clone)]
pub struct RoundTrip<F> {
    schedule: Schedule,
    x0: Vec<F>,
    eps: Vec<F>,
}

impl RoundTripConfig {
    /// Builds the schedule and draws ε once for `x0`.
    pub fn init<F: Float>(&self, x0: Vec<F>) -> crate::Result<RoundTrip<F>> {
        let schedule = build_schedule(self.steps, self.shape)?;
        let eps = noise_vec(x0.len(), self.seed);

        tracing::debug!(
            steps = self.steps,
            shape = %self.shape,
            seed = self.seed,
            components = x0.len(),
            "initialized round-trip episode"
        );

        Ok(RoundTrip { schedule, x0, eps })
    }
}

impl<F: Float> RoundTrip<F> {
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn original(&self) -> &[F] {
        &self.x0
    }

    pub fn noise(&self) -> &[F] {
        &self.eps
    }

    /// Signal level shown at `progress`.
    pub fn alpha_bar(&self, progress: f64) -> f64 {
        self.schedule
            .alpha_bar_at(episode_time(progress, self.schedule.len()))
    }

    /// Writes the frame at `progress` into `out` and returns its signal level.
    pub fn frame_into(&self, progress: f64, out: &mut [F]) -> crate::Result<f64> {
        let alpha_bar = self.alpha_bar(progress);
        let level = F::from(alpha_bar).unwrap_or_else(F::one);
        forward_sample_into(&self.x0, &self.eps, level, out)?;
        Ok(alpha_bar)
    }

    /// Allocating variant of [`RoundTrip::frame_into`].
    pub fn frame(&self, progress: f64) -> crate::Result<Vec<F>> {
        let mut out = vec![F::zero(); self.x0.len()];
        self.frame_into(progress, &mut out)?;
        Ok(out)
    }
}
