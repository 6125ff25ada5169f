//! Deterministic reverse steps.
//!
//! Denoising Diffusion Implicit Models, J. Song et al, 2020.
//! https://arxiv.org/abs/2010.02502
//!
//! With `eta = 0` and an epsilon prediction, one DDIM step predicts the clean
//! signal and re-noises it at the earlier level. Fed the true noise draw, the
//! step lands exactly on the forward sample at the earlier time, so the
//! reverse half of an animation can be driven either way.

use num_traits::Float;

use super::forward::mixing_coefficients;
use crate::error::ensure_len;
use crate::Result;

/// Recovers `x0 = (x_t - √(1 - ᾱ) · ε) / √ᾱ` from a noised sample.
pub fn predict_original_into<F: Float>(
    sample: &[F],
    eps: &[F],
    alpha_bar: F,
    out: &mut [F],
) -> Result<()> {
    ensure_len(sample.len(), eps.len())?;
    ensure_len(sample.len(), out.len())?;

    let (sqrt_alpha_prod, sqrt_one_minus_alpha_prod) = mixing_coefficients(alpha_bar);
    for ((o, &x), &e) in out.iter_mut().zip(sample).zip(eps) {
        *o = (x - sqrt_one_minus_alpha_prod * e) / sqrt_alpha_prod;
    }
    Ok(())
}

/// One deterministic step from signal level `alpha_bar` back to
/// `alpha_bar_prev` (`alpha_bar_prev >= alpha_bar`).
pub fn ddim_step_into<F: Float>(
    sample: &[F],
    eps: &[F],
    alpha_bar: F,
    alpha_bar_prev: F,
    out: &mut [F],
) -> Result<()> {
    predict_original_into(sample, eps, alpha_bar, out)?;

    let (sqrt_alpha_prev, sqrt_one_minus_alpha_prev) = mixing_coefficients(alpha_bar_prev);
    for (o, &e) in out.iter_mut().zip(eps) {
        *o = sqrt_alpha_prev * *o + sqrt_one_minus_alpha_prev * e;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedulers::forward::forward_sample;
    use crate::schedulers::{build_schedule, ScheduleShape};
    use crate::utils::gaussian::noise_vec;

    #[test]
    fn test_predict_original_inverts_forward() {
        let x0 = [0.2f64, -0.7, 1.1, 0.0];
        let eps: Vec<f64> = noise_vec(4, 5);
        let xt = forward_sample(&x0, &eps, 0.4).unwrap();

        let mut recovered = [0.0; 4];
        predict_original_into(&xt, &eps, 0.4, &mut recovered).unwrap();
        for (a, b) in recovered.iter().zip(x0) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_reverse_walk_retraces_forward_samples() {
        let schedule = build_schedule(40, ScheduleShape::Linear).unwrap();
        let x0: Vec<f64> = (0..16).map(|i| i as f64 / 16.0 - 0.5).collect();
        let eps: Vec<f64> = noise_vec(16, 21);

        let last = schedule.len() - 1;
        let mut sample = forward_sample(&x0, &eps, schedule.alpha_bar(last)).unwrap();
        let mut next = vec![0.0; 16];

        for step in (0..last).rev() {
            ddim_step_into(
                &sample,
                &eps,
                schedule.alpha_bar(step + 1),
                schedule.alpha_bar(step),
                &mut next,
            )
            .unwrap();
            std::mem::swap(&mut sample, &mut next);

            let expected = forward_sample(&x0, &eps, schedule.alpha_bar(step)).unwrap();
            for (a, b) in sample.iter().zip(&expected) {
                assert!((a - b).abs() < 1e-6, "step {step}: {a} vs {b}");
            }
        }
    }

    #[test]
    fn test_length_mismatch() {
        let mut out = [0.0f32; 2];
        assert!(ddim_step_into(&[1.0, 2.0], &[0.0], 0.5, 0.9, &mut out).is_err());
    }
}
