//! Closed-form forward diffusion: `x_t = √ᾱ_t · x0 + √(1 - ᾱ_t) · ε`.
//!
//! Every function here is a pure function of `(x0, ε, ᾱ)`. Evaluating the
//! same time position twice gives bit-identical output, which is what lets an
//! animation noise a signal and then exactly retrace its steps.

use burn::tensor::{backend::Backend, Data, ElementConversion, Shape, Tensor};
use num_traits::Float;

use crate::error::ensure_len;
use crate::utils::gaussian::noise_vec;
use crate::Result;

const MIN_ALPHA_BAR: f64 = 1e-8;

/// Signal and noise scales `(√max(ᾱ, 1e-8), √max(1 - ᾱ, 0))`.
///
/// The floors keep both square roots real at the ends of the schedule.
pub fn mixing_coefficients<F: Float>(alpha_bar: F) -> (F, F) {
    let min_alpha_bar = F::from(MIN_ALPHA_BAR).unwrap_or_else(F::epsilon);
    let signal = alpha_bar.max(min_alpha_bar).sqrt();
    let noise = (F::one() - alpha_bar).max(F::zero()).sqrt();
    (signal, noise)
}

/// Mixes `x0` with the noise draw `eps` at retained-signal level `alpha_bar`.
pub fn forward_sample<F: Float>(x0: &[F], eps: &[F], alpha_bar: F) -> Result<Vec<F>> {
    let mut out = vec![F::zero(); x0.len()];
    forward_sample_into(x0, eps, alpha_bar, &mut out)?;
    Ok(out)
}

/// [`forward_sample`] writing into a caller-owned buffer, for per-frame use.
pub fn forward_sample_into<F: Float>(x0: &[F], eps: &[F], alpha_bar: F, out: &mut [F]) -> Result<()> {
    ensure_len(x0.len(), eps.len())?;
    ensure_len(x0.len(), out.len())?;

    let (signal, noise) = mixing_coefficients(alpha_bar);
    for ((o, &x), &e) in out.iter_mut().zip(x0).zip(eps) {
        *o = signal * x + noise * e;
    }
    Ok(())
}

/// Forward sampling for 8-bit pixel buffers (any channel layout).
///
/// Channels are mapped to `[-1, 1]` before mixing and back to `[0, 255]`
/// afterwards, rounding and saturating.
pub fn forward_sample_rgb8_into(pixels: &[u8], eps: &[f32], alpha_bar: f32, out: &mut [u8]) -> Result<()> {
    ensure_len(pixels.len(), eps.len())?;
    ensure_len(pixels.len(), out.len())?;

    let (signal, noise) = mixing_coefficients(alpha_bar);
    for ((o, &p), &e) in out.iter_mut().zip(pixels).zip(eps) {
        let x = p as f32 / 127.5 - 1.0;
        let mixed = signal * x + noise * e;
        *o = ((mixed + 1.0) * 127.5).round().clamp(0.0, 255.0) as u8;
    }
    Ok(())
}

/// Tensor version of [`forward_sample`], for image batches kept on a burn
/// backend.
pub fn add_noise<B: Backend, const D: usize>(
    original: Tensor<B, D>,
    noise: Tensor<B, D>,
    alpha_bar: f64,
) -> Tensor<B, D> {
    let (sqrt_alpha_prod, sqrt_one_minus_alpha_prod) = mixing_coefficients(alpha_bar);

    original.mul_scalar(sqrt_alpha_prod) + noise.mul_scalar(sqrt_one_minus_alpha_prod)
}

/// A deterministic noise tensor holding the same values as
/// [`noise_vec`]`(shape.product(), seed)`.
pub fn noise_tensor<B: Backend, const D: usize>(
    shape: [usize; D],
    seed: u32,
    device: &B::Device,
) -> Tensor<B, D> {
    let len = shape.iter().product();
    let eps: Vec<B::FloatElem> = noise_vec::<f64>(len, seed)
        .into_iter()
        .map(|v| v.elem())
        .collect();

    Tensor::from_data(Data::new(eps, Shape::new(shape)), device)
}
