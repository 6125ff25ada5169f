//! # Utilities
//!
//! Seeded randomness and the small statistics toolbox shared by the
//! schedulers and the animation drivers.

pub mod density;
pub mod gaussian;
pub mod nudge;
pub mod permutation;
pub mod rng;
