use crate::consts::{KEY_COUNT, ROW_WIDTH};

/// Per-slot weight for single-key scoring. Home row and index/middle fingers weigh most.
pub const MONOGRAM_KEY_WEIGHTS: [u64; KEY_COUNT] = [
    2, 4, 7, 3, 2, 2, 3, 7, 4, 2, //
    7, 8, 9, 8, 5, 5, 8, 9, 8, 7, //
    2, 3, 3, 7, 1, 1, 7, 3, 3, 2, //
];

const HAND_WIDTH: usize = ROW_WIDTH / 2;
const LEFT_SLOTS: usize = HAND_WIDTH * 3;

// Fallback weight by (row, column) of the second key, left hand. Mirrored for the right.
const BIGRAM_BASE_WEIGHTS_LEFT: [u64; LEFT_SLOTS] = [
    25, 45, 60, 50, 25, //
    50, 60, 80, 80, 50, //
    20, 35, 45, 55, 20, //
];

// Marks an entry that takes its value from the base table.
const OO: u64 = 0;

// One row per left-hand first key (row-major over the 15 left slots). Each row holds the
// weight for every possible second key.
#[rustfmt::skip]
const BIGRAM_KEY_WEIGHTS_LEFT: [[u64; KEY_COUNT]; LEFT_SLOTS] = [
    // top row
    [
        20, 50, 65, 55, 30, OO, OO, OO, OO, OO,
        20, 60, 85, 90, 70, OO, OO, OO, OO, OO,
        10, 15, 35, 55, 20, OO, OO, OO, OO, OO,
    ],
    [
        30, 25, 70, 55, 30, OO, OO, OO, OO, OO,
        35, 30, 85, 90, 70, OO, OO, OO, OO, OO,
        10, 10, 20, 55, 20, OO, OO, OO, OO, OO,
    ],
    [
        OO, 55, 30, 55, 30, OO, OO, OO, OO, OO,
        OO, OO, 65, 90, 70, OO, OO, OO, OO, OO,
        OO, 25, 20, 50, OO, OO, OO, OO, OO, OO,
    ],
    [
        OO, OO, OO, 30, 15, OO, OO, OO, OO, OO,
        OO, OO, OO, 65, 15, OO, OO, OO, OO, OO,
        OO, OO, 40, 45, 15, OO, OO, OO, OO, OO,
    ],
    [
        OO, OO, OO, 35, 30, OO, OO, OO, OO, OO,
        OO, OO, OO, 65, 15, OO, OO, OO, OO, OO,
        OO, OO, 35, 35, 15, OO, OO, OO, OO, OO,
    ],
    // home row
    [
        15, 55, 65, 55, 30, OO, OO, OO, OO, OO,
        35, 65, 85, 90, 65, OO, OO, OO, OO, OO,
        15, 35, 50, 65, 25, OO, OO, OO, OO, OO,
    ],
    [
        20, 25, 65, 55, 30, OO, OO, OO, OO, OO,
        OO, 45, 85, 90, 65, OO, OO, OO, OO, OO,
        15, 15, 50, 65, 25, OO, OO, OO, OO, OO,
    ],
    [
        OO, OO, 35, 55, 30, OO, OO, OO, OO, OO,
        OO, OO, 55, 90, 65, OO, OO, OO, OO, OO,
        OO, OO, 25, 65, 25, OO, OO, OO, OO, OO,
    ],
    [
        OO, OO, OO, 30, 15, OO, OO, OO, OO, OO,
        OO, 65, 85, 55, 15, OO, OO, OO, OO, OO,
        OO, OO, OO, 40, 15, OO, OO, OO, OO, OO,
    ],
    [
        OO, OO, OO, 30, 15, OO, OO, OO, OO, OO,
        OO, OO, OO, 65, 30, OO, OO, OO, OO, OO,
        OO, OO, OO, 40, 15, OO, OO, OO, OO, OO,
    ],
    // bottom row
    [
        15, 40, 60, 45, 20, OO, OO, OO, OO, OO,
        20, 60, 85, 85, 70, OO, OO, OO, OO, OO,
        20, 35, 50, 60, 25, OO, OO, OO, OO, OO,
    ],
    [
        20, 20, 60, 45, 20, OO, OO, OO, OO, OO,
        30, 30, 85, 85, 70, OO, OO, OO, OO, OO,
        25, 25, 50, 60, 25, OO, OO, OO, OO, OO,
    ],
    [
        OO, 40, 35, 45, 20, OO, OO, OO, OO, OO,
        OO, OO, 65, 85, 70, OO, OO, OO, OO, OO,
        OO, 40, 30, 60, 25, OO, OO, OO, OO, OO,
    ],
    [
        OO, OO, OO, 45, 15, OO, OO, OO, OO, OO,
        OO, OO, OO, 65, 15, OO, OO, OO, OO, OO,
        OO, OO, OO, 30, 15, OO, OO, OO, OO, OO,
    ],
    [
        OO, OO, OO, 40, 15, OO, OO, OO, OO, OO,
        OO, OO, OO, 65, 15, OO, OO, OO, OO, OO,
        OO, OO, OO, 50, 30, OO, OO, OO, OO, OO,
    ],
];

/// Slot on the other hand at the same row, mirrored across the vertical axis.
#[inline]
pub fn mirror_slot(slot: usize) -> usize {
    let row = slot / ROW_WIDTH;
    let col = slot % ROW_WIDTH;
    row * ROW_WIDTH + (ROW_WIDTH - 1 - col)
}

/// Positional weights for ordered key pairs: `weights[first][second]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairWeights([[u64; KEY_COUNT]; KEY_COUNT]);

impl PairWeights {
    /// Expands the hand-authored left-hand table into the full 30x30 table.
    pub fn build() -> Self {
        let mut left = BIGRAM_KEY_WEIGHTS_LEFT;
        for row in left.iter_mut() {
            for (j, w) in row.iter_mut().enumerate() {
                if *w == OO {
                    let col = j % ROW_WIDTH;
                    let key_row = j / ROW_WIDTH;
                    let base_col = if col < HAND_WIDTH { col } else { ROW_WIDTH - 1 - col };
                    *w = BIGRAM_BASE_WEIGHTS_LEFT[base_col + key_row * HAND_WIDTH];
                }
            }
        }

        let mut weights = [[0u64; KEY_COUNT]; KEY_COUNT];
        for key_row in 0..3 {
            for pos in 0..HAND_WIDTH {
                let first = key_row * ROW_WIDTH + pos;
                weights[first] = left[key_row * HAND_WIDTH + pos];
                let mirrored = mirror_slot(first);
                for second in 0..KEY_COUNT {
                    weights[mirrored][mirror_slot(second)] = weights[first][second];
                }
            }
        }

        PairWeights(weights)
    }

    #[inline(always)]
    pub fn get(&self, first: usize, second: usize) -> u64 {
        self.0[first][second]
    }

    #[inline(always)]
    pub fn row(&self, first: usize) -> &[u64; KEY_COUNT] {
        &self.0[first]
    }
}
