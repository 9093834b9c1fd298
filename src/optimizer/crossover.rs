use crate::consts::KEY_COUNT;
use crate::layout::Layout;
use fastrand::Rng;

/// Bounds of the per-child share drawn from the first parent.
pub const MIX_RATIO_MIN: f64 = 0.2;
pub const MIX_RATIO_MAX: f64 = 0.8;

/// Breeds one child from two parents with a random mix ratio in `[0.2, 0.8]`.
pub fn mix(parent1: &Layout, parent2: &Layout, rng: &mut Rng) -> Layout {
    let ratio = MIX_RATIO_MIN + rng.f64() * (MIX_RATIO_MAX - MIX_RATIO_MIN);
    mix_with_ratio(parent1, parent2, ratio, rng)
}

/// Position-preserving crossover.
///
/// Each step picks a parent (the first with probability `ratio`) and copies the first
/// unfilled position whose symbol on that parent is still unused. Once a parent has no
/// such position it is blocked, and its turns instead fill a random free position with the
/// lowest unused id. Both parents must be permutations of `0..30`; the child always is.
pub fn mix_with_ratio(parent1: &Layout, parent2: &Layout, ratio: f64, rng: &mut Rng) -> Layout {
    debug_assert!(parent1.is_permutation() && parent2.is_permutation());

    let parents = [parent1, parent2];
    let mut child = Layout([0; KEY_COUNT]);
    let mut free_positions: Vec<usize> = (0..KEY_COUNT).collect();
    let mut used = [false; KEY_COUNT];
    let mut blocked = [false; 2];

    for _ in 0..KEY_COUNT {
        let p = if rng.f64() < ratio { 0 } else { 1 };

        if !blocked[p] {
            let found = free_positions
                .iter()
                .position(|&pos| !used[parents[p][pos] as usize]);
            if let Some(idx) = found {
                let pos = free_positions.swap_remove(idx);
                let id = parents[p][pos];
                child[pos] = id;
                used[id as usize] = true;
                continue;
            }
            blocked[p] = true;
        }

        let pos = free_positions.swap_remove(rng.usize(0..free_positions.len()));
        // Free positions and unused ids are always equal in number.
        let id = used.iter().position(|&u| !u).unwrap_or(0);
        used[id] = true;
        child[pos] = id as u8;
    }

    child
}
