/// Number of physical key slots in a layout.
pub const KEY_COUNT: usize = 30;

/// Upper bound on the number of symbols a mapping can hold (ids are `u8`).
pub const MAX_SYMBOLS: usize = 256;

/// Alphabet used when scoring named or literal layouts.
pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz.,;/";

/// Alphabet the generator evolves when none is given.
pub const DEFAULT_GENERATOR_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz.,/;";

/// Layout whose score normalizes to 1.0.
pub const REFERENCE_LAYOUT: &str = "qwertyuiopasdfghjkl;zxcvbnm.,/";

/// Slots per keyboard row.
pub const ROW_WIDTH: usize = 10;
