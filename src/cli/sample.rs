use anyhow::{Context, Result};
use clap::Args;
use diffusion_schedule::pipelines::round_trip::{format_alpha_bar, RoundTripConfig};
use diffusion_schedule::utils::gaussian::{gaussian_samples, sample_mean, sample_variance};

use super::ShapeArg;

#[derive(Args, Debug)]
pub struct SampleArgs {
    /// The number of diffusion steps.
    #[arg(long, default_value_t = 100)]
    steps: usize,

    /// The schedule shape.
    #[arg(long, value_enum, default_value = "linear")]
    shape: ShapeArg,

    /// The number of points in the synthetic cloud.
    #[arg(long, default_value_t = 2000)]
    points: usize,

    /// Mean of the synthetic data.
    #[arg(long, default_value_t = 3.0, allow_hyphen_values = true)]
    mean: f64,

    /// Variance of the synthetic data.
    #[arg(long, default_value_t = 0.25)]
    variance: f64,

    /// The random seed for both the data and the noise draw.
    #[arg(long, default_value_t = 7)]
    seed: u32,

    /// Number of frames to report across the episode.
    #[arg(long, default_value_t = 9)]
    frames: usize,
}

pub fn handle_sample(args: &SampleArgs) -> Result<()> {
    let x0 = gaussian_samples(args.mean, args.variance, args.points, args.seed);
    let episode = RoundTripConfig::new(args.steps)
        .with_shape(args.shape.into())
        .with_seed(args.seed.wrapping_add(1))
        .init(x0)
        .context("initializing episode")?;

    let frames = args.frames.max(2);
    let mut frame = vec![0.0; args.points];

    println!("{:>8}  {:>12}  {:>10}  {:>10}", "progress", "level", "mean", "variance");
    for i in 0..frames {
        let progress = i as f64 / (frames - 1) as f64;
        let alpha_bar = episode.frame_into(progress, &mut frame)?;
        println!(
            "{progress:>8.3}  {:>12}  {:>10.4}  {:>10.4}",
            format_alpha_bar(alpha_bar),
            sample_mean(&frame),
            sample_variance(&frame),
        );
    }
    Ok(())
}
