use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the alpha bar curve of a noise schedule
    Schedule {
        #[command(flatten)]
        args: cli::schedule::ScheduleArgs,
    },
    /// Noise a synthetic Gaussian point cloud and report the frame statistics
    Sample {
        #[command(flatten)]
        args: cli::sample::SampleArgs,
    },
    /// Compare a histogram with its kernel density estimate
    Kde {
        #[command(flatten)]
        args: cli::kde::KdeArgs,
    },
    /// Print a seeded puzzle shuffle
    Shuffle {
        #[command(flatten)]
        args: cli::shuffle::ShuffleArgs,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Schedule { args } => cli::schedule::handle_schedule(args)?,
        Commands::Sample { args } => cli::sample::handle_sample(args)?,
        Commands::Kde { args } => cli::kde::handle_kde(args)?,
        Commands::Shuffle { args } => cli::shuffle::handle_shuffle(args)?,
    }

    Ok(())
}
