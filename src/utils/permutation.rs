//! Deterministic puzzle shuffles.

use super::rng::Mulberry32;

/// Shuffles the `n × n` puzzle tiles `0..n²` with Fisher–Yates driven by a
/// [`Mulberry32`] seeded with `seed`.
///
/// The same `(n, seed)` always gives the same layout, so the grid can be
/// resized without replaying the shuffle animation. A shuffle that happens to
/// come out solved gets its first two tiles swapped.
pub fn seeded_permutation_shuffle(n: usize, seed: u32) -> Vec<usize> {
    let len = n * n;
    let mut perm: Vec<usize> = (0..len).collect();
    let mut rng = Mulberry32::new(seed);

    for i in (1..len).rev() {
        let j = ((rng.next_f64() * (i + 1) as f64) as usize).min(i);
        perm.swap(i, j);
    }

    if len > 1 && is_solved(&perm) {
        tracing::trace!(n, seed, "shuffle came out solved, swapping the first two tiles");
        perm.swap(0, 1);
    }
    perm
}

/// Whether every tile sits in its home slot.
pub fn is_solved(perm: &[usize]) -> bool {
    perm.iter().enumerate().all(|(i, &p)| i == p)
}
