use crate::consts::KEY_COUNT;
use crate::layout::Layout;
use fastrand::Rng;

// Swap count is the product of two draws from 0..7: usually small, at most 36.
const SWAP_FACTOR_BOUND: usize = 7;

/// Applies a random number of random transpositions in place and returns how many.
pub fn mutate(layout: &mut Layout, rng: &mut Rng) -> usize {
    let swaps = rng.usize(0..SWAP_FACTOR_BOUND) * rng.usize(0..SWAP_FACTOR_BOUND);
    for _ in 0..swaps {
        let a = rng.usize(0..KEY_COUNT);
        let b = rng.usize(0..KEY_COUNT);
        layout.swap(a, b);
    }
    swaps
}
