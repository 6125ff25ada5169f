use anyhow::Result;
use clap::Args;
use diffusion_schedule::utils::density::{
    histogram_density, kernel_density_estimate, linspace, silverman_bandwidth,
};
use diffusion_schedule::utils::gaussian::gaussian_samples;

#[derive(Args, Debug)]
pub struct KdeArgs {
    /// Mean of the synthetic data.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    mean: f64,

    /// Variance of the synthetic data.
    #[arg(long, default_value_t = 1.0)]
    variance: f64,

    /// The number of samples to draw.
    #[arg(long, default_value_t = 500)]
    samples: usize,

    /// The number of histogram bins, also the number of KDE grid points.
    #[arg(long, default_value_t = 20)]
    bins: usize,

    /// The random seed.
    #[arg(long, default_value_t = 1)]
    seed: u32,
}

pub fn handle_kde(args: &KdeArgs) -> Result<()> {
    let samples = gaussian_samples(args.mean, args.variance, args.samples, args.seed);
    let spread = 4.0 * args.variance.max(0.0).sqrt().max(1e-3);
    let (lo, hi) = (args.mean - spread, args.mean + spread);
    let bins = args.bins.max(1);

    let width = (hi - lo) / bins as f64;
    let centers: Vec<f64> = linspace(lo + width / 2.0, hi - width / 2.0, bins);
    let bars = histogram_density(&samples, bins, lo, hi);
    let curve = kernel_density_estimate(&samples, &centers);

    println!("bandwidth {:.4}", silverman_bandwidth(&samples));
    println!("{:>10}  {:>10}  {:>10}", "x", "histogram", "kde");
    for ((x, bar), kde) in centers.iter().zip(&bars).zip(&curve) {
        println!("{x:>10.4}  {bar:>10.4}  {kde:>10.4}");
    }
    Ok(())
}
