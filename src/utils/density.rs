//! Histograms and Gaussian kernel density estimates for the sampling demos.

use core::f64::consts::TAU;

use super::gaussian::sample_variance;

/// Floor applied to the sample variance before computing a bandwidth.
pub const VARIANCE_FLOOR: f64 = 1e-6;

/// Silverman's rule of thumb: `h = 1.06 · σ̂ · n^(-1/5)`.
///
/// Degenerate inputs (fewer than two samples, or zero spread) use
/// [`VARIANCE_FLOOR`] so the bandwidth stays positive.
pub fn silverman_bandwidth(samples: &[f64]) -> f64 {
    let n = samples.len().max(1) as f64;
    let variance = if samples.len() <= 1 {
        VARIANCE_FLOOR
    } else {
        sample_variance(samples).max(VARIANCE_FLOOR)
    };
    1.06 * variance.sqrt() * n.powf(-0.2)
}

/// Gaussian KDE evaluated at every `grid` point, bandwidth from
/// [`silverman_bandwidth`]. Cost is `O(samples · grid)`.
pub fn kernel_density_estimate(samples: &[f64], grid: &[f64]) -> Vec<f64> {
    kernel_density_estimate_with_bandwidth(samples, grid, silverman_bandwidth(samples))
}

/// Gaussian KDE with an explicit bandwidth. An empty sample set has zero
/// density everywhere.
pub fn kernel_density_estimate_with_bandwidth(
    samples: &[f64],
    grid: &[f64],
    bandwidth: f64,
) -> Vec<f64> {
    if samples.is_empty() {
        return vec![0.0; grid.len()];
    }
    let h = bandwidth.max(f64::MIN_POSITIVE);
    let norm = 1.0 / (TAU.sqrt() * h * samples.len() as f64);

    grid.iter()
        .map(|&x| {
            let sum: f64 = samples
                .iter()
                .map(|&s| {
                    let z = (x - s) / h;
                    (-0.5 * z * z).exp()
                })
                .sum();
            norm * sum
        })
        .collect()
}

/// `n` evenly spaced points from `lo` to `hi` inclusive.
pub fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (n - 1) as f64;
            (0..n).map(|i| lo + step * i as f64).collect()
        }
    }
}

/// Counts samples into `bins` equal-width bins over `[lo, hi]`.
///
/// Values outside the range (and NaN) are dropped; `hi` itself lands in the
/// last bin.
pub fn histogram(samples: &[f64], bins: usize, lo: f64, hi: f64) -> Vec<usize> {
    let mut counts = vec![0; bins];
    if bins == 0 || !(hi > lo) {
        return counts;
    }
    let width = (hi - lo) / bins as f64;
    for &x in samples {
        if !(lo..=hi).contains(&x) {
            continue;
        }
        let idx = (((x - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    counts
}

/// [`histogram`] scaled so the bars integrate to one over the counted
/// samples, which puts it on the same axis as a KDE curve.
pub fn histogram_density(samples: &[f64], bins: usize, lo: f64, hi: f64) -> Vec<f64> {
    let counts = histogram(samples, bins, lo, hi);
    let total: usize = counts.iter().sum();
    if total == 0 {
        return vec![0.0; counts.len()];
    }
    let width = (hi - lo) / bins as f64;
    counts
        .into_iter()
        .map(|c| c as f64 / (total as f64 * width))
        .collect()
}
