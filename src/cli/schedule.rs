use anyhow::{Context, Result};
use clap::Args;
use diffusion_schedule::schedulers::ScheduleConfig;

use super::ShapeArg;

#[derive(Args, Debug)]
pub struct ScheduleArgs {
    /// The number of diffusion steps.
    #[arg(long, default_value_t = 100)]
    steps: usize,

    /// The schedule shape.
    #[arg(long, value_enum, default_value = "linear")]
    shape: ShapeArg,

    /// Only print every n-th step (the last step is always printed).
    #[arg(long, default_value_t = 1)]
    every: usize,
}

pub fn handle_schedule(args: &ScheduleArgs) -> Result<()> {
    let schedule = ScheduleConfig::new(args.steps)
        .with_shape(args.shape.into())
        .init()
        .context("building schedule")?;
    let betas = schedule.betas();
    let every = args.every.max(1);
    let last = schedule.len() - 1;

    println!("{:>6}  {:>12}  {:>12}", "step", "alpha_bar", "beta");
    for (step, (alpha_bar, beta)) in schedule.as_slice().iter().zip(&betas).enumerate() {
        if step % every == 0 || step == last {
            println!("{step:>6}  {alpha_bar:>12.6}  {beta:>12.6}");
        }
    }
    Ok(())
}
