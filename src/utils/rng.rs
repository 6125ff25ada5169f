//! Mulberry32, a tiny 32-bit mixing generator.
//!
//! One `u32` of state, advanced by a Weyl increment and scrambled with
//! multiply-xor-shift rounds. Far from cryptographic, but reproducible across
//! platforms, which is all a replayable animation needs.

use rand::rand_core::impls;
use rand::{RngCore, SeedableRng};

const WEYL_INCREMENT: u32 = 0x6D2B_79F5;
const TWO_POW_32: f64 = 4_294_967_296.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(WEYL_INCREMENT);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Uniform draw in `[0, 1)` with 32 bits of resolution.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / TWO_POW_32
    }
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        Mulberry32::next_u32(self)
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        impls::fill_bytes_via_next(self, dst)
    }
}

impl SeedableRng for Mulberry32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}
