use anyhow::Result;
use clap::Args;
use diffusion_schedule::utils::permutation::seeded_permutation_shuffle;

#[derive(Args, Debug)]
pub struct ShuffleArgs {
    /// Tiles per side of the puzzle.
    #[arg(long, default_value_t = 3)]
    size: usize,

    /// The random seed.
    #[arg(long, default_value_t = 42)]
    seed: u32,
}

pub fn handle_shuffle(args: &ShuffleArgs) -> Result<()> {
    let perm = seeded_permutation_shuffle(args.size, args.seed);
    let width = perm.len().saturating_sub(1).to_string().len();

    for row in perm.chunks(args.size.max(1)) {
        let cells: Vec<String> = row.iter().map(|tile| format!("{tile:>width$}")).collect();
        println!("{}", cells.join(" "));
    }
    Ok(())
}
