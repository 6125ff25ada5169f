//! Cumulative noising, where each click pulls the sample cloud towards a
//! chosen mean and shakes it a little.
//!
//! The process depends on its history, so instead of mutating samples in
//! place it is a fold over an explicit list of steps: replaying the same
//! list reproduces every intermediate state.

use serde::{Deserialize, Serialize};

use super::gaussian::standard_normal;
use super::rng::Mulberry32;

/// Parameters of one nudge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Nudge {
    /// Where the samples are pulled towards.
    pub target_mean: f64,
    /// Fraction of the distance to `target_mean` covered, clamped to `[0, 1]`.
    pub strength: f64,
    /// Standard deviation of the per-sample jitter added after the pull.
    pub jitter: f64,
}

impl Nudge {
    pub fn new(target_mean: f64, strength: f64, jitter: f64) -> Self {
        Self {
            target_mean,
            strength,
            jitter,
        }
    }

    /// Applies the nudge to `samples`, drawing jitter from `rng`.
    pub fn apply(&self, samples: &[f64], rng: &mut Mulberry32) -> Vec<f64> {
        let strength = self.strength.clamp(0.0, 1.0);
        let jitter = self.jitter.max(0.0);
        samples
            .iter()
            .map(|&x| x + strength * (self.target_mean - x) + jitter * standard_normal(rng))
            .collect()
    }
}

/// Folds `nudges` over `initial` and returns every state, starting with
/// `initial` itself. Step `i` draws its jitter from a generator seeded with
/// `seed + i`.
pub fn accumulate_nudges(initial: &[f64], nudges: &[Nudge], seed: u32) -> Vec<Vec<f64>> {
    let mut history = Vec::with_capacity(nudges.len() + 1);
    let mut current = initial.to_vec();

    for (i, nudge) in nudges.iter().enumerate() {
        let mut rng = Mulberry32::new(seed.wrapping_add(i as u32));
        let next = nudge.apply(&current, &mut rng);
        history.push(core::mem::replace(&mut current, next));
    }
    history.push(current);
    history
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::gaussian::{gaussian_samples, sample_mean};

    #[test]
    fn test_history_includes_initial_state() {
        let initial = vec![1.0, 2.0];
        let history = accumulate_nudges(&initial, &[], 0);
        assert_eq!(history, vec![initial]);
    }

    #[test]
    fn test_pull_without_jitter_is_exact() {
        let history = accumulate_nudges(&[0.0, 4.0], &[Nudge::new(2.0, 0.5, 0.0)], 1);
        assert_eq!(history[1], vec![1.0, 3.0]);
    }

    #[test]
    fn test_repeated_nudges_converge_to_target() {
        let initial = gaussian_samples(-3.0, 1.0, 500, 4);
        let nudges = vec![Nudge::new(5.0, 0.3, 0.05); 30];
        let history = accumulate_nudges(&initial, &nudges, 17);

        assert_eq!(history.len(), 31);
        assert!((sample_mean(&history[30]) - 5.0).abs() < 0.05);
    }

    #[test]
    fn test_replay_is_reproducible() {
        let nudges = [Nudge::new(1.0, 0.2, 0.5), Nudge::new(-1.0, 0.4, 0.1)];
        let a = accumulate_nudges(&[0.0, 0.5, 1.0], &nudges, 9);
        let b = accumulate_nudges(&[0.0, 0.5, 1.0], &nudges, 9);
        assert_eq!(a, b);

        // Dropping the last step leaves the earlier states untouched.
        let prefix = accumulate_nudges(&[0.0, 0.5, 1.0], &nudges[..1], 9);
        assert_eq!(prefix[..], a[..2]);
    }

    #[test]
    fn test_strength_is_clamped() {
        let history = accumulate_nudges(&[0.0], &[Nudge::new(1.0, 3.0, 0.0)], 0);
        assert_eq!(history[1], vec![1.0]);
    }
}
