use crate::consts::{KEY_COUNT, MAX_SYMBOLS, ROW_WIDTH};
use crate::error::{KeResult, KeyEvolveError};
use fastrand::Rng;
use std::collections::HashMap;
use std::fmt::Write;
use std::ops::{Index, IndexMut};

fn fold_case(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Bijection between symbols and the integer ids the scorers index by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    id_to_char: Vec<char>,
    char_to_id: HashMap<char, u8>,
}

impl Mapping {
    /// Builds a mapping from a string of unique symbols. Symbols are lowercased.
    pub fn build(symbols: &str) -> KeResult<Self> {
        let count = symbols.chars().count();
        if count > MAX_SYMBOLS {
            return Err(KeyEvolveError::TooManySymbols(count));
        }

        let mut id_to_char = Vec::with_capacity(count);
        let mut char_to_id = HashMap::with_capacity(count);

        for (id, c) in symbols.chars().map(fold_case).enumerate() {
            if char_to_id.insert(c, id as u8).is_some() {
                return Err(KeyEvolveError::DuplicateSymbol(c));
            }
            id_to_char.push(c);
        }

        Ok(Self {
            id_to_char,
            char_to_id,
        })
    }

    pub fn len(&self) -> usize {
        self.id_to_char.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_char.is_empty()
    }

    /// Looks up a symbol, folding case first.
    pub fn id_of(&self, c: char) -> Option<u8> {
        self.char_to_id.get(&fold_case(c)).copied()
    }

    pub fn symbol(&self, id: u8) -> Option<char> {
        self.id_to_char.get(id as usize).copied()
    }

    pub fn symbols(&self) -> &[char] {
        &self.id_to_char
    }

    /// Renders the layout as the three-row split diagram used in progress output.
    ///
    /// ```text
    /// qwer t  y uiop
    /// asdf g  h jkl;
    /// zxcv b  n m.,/
    /// ```
    pub fn render(&self, layout: &Layout) -> String {
        let mut out = String::new();
        for row in layout.0.chunks(ROW_WIDTH) {
            let k: Vec<char> = row
                .iter()
                .map(|&id| self.symbol(id).unwrap_or('?'))
                .collect();
            let _ = writeln!(
                out,
                "{}{}{}{} {}  {} {}{}{}{}",
                k[0], k[1], k[2], k[3], k[4], k[5], k[6], k[7], k[8], k[9]
            );
        }
        out
    }

    /// Layout text in slot order, e.g. `qwertyuiop...`.
    pub fn layout_string(&self, layout: &Layout) -> String {
        layout
            .0
            .iter()
            .map(|&id| self.symbol(id).unwrap_or('?'))
            .collect()
    }
}

/// A keyboard layout: `layout[slot]` is the symbol id on that key.
///
/// ```text
///  0  1  2  3   4    5   6  7  8  9
/// 10 11 12 13  14   15  16 17 18 19
/// 20 21 22 23  24   25  26 27 28 29
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Layout(pub [u8; KEY_COUNT]);

impl Default for Layout {
    fn default() -> Self {
        Self::identity()
    }
}

impl Layout {
    /// Ids `0..30` in slot order.
    pub fn identity() -> Self {
        let mut slots = [0u8; KEY_COUNT];
        for (i, slot) in slots.iter_mut().enumerate() {
            *slot = i as u8;
        }
        Layout(slots)
    }

    /// Parses exactly 30 symbols against `mapping`.
    pub fn parse(text: &str, mapping: &Mapping) -> KeResult<Self> {
        let got = text.chars().count();
        if got != KEY_COUNT {
            return Err(KeyEvolveError::LayoutLength {
                expected: KEY_COUNT,
                got,
            });
        }

        let mut slots = [0u8; KEY_COUNT];
        let mut seen = vec![false; mapping.len()];
        for (slot, c) in slots.iter_mut().zip(text.chars()) {
            let id = mapping
                .id_of(c)
                .ok_or_else(|| KeyEvolveError::UnknownSymbol(fold_case(c)))?;
            if std::mem::replace(&mut seen[id as usize], true) {
                return Err(KeyEvolveError::DuplicateSymbol(fold_case(c)));
            }
            *slot = id;
        }
        Ok(Layout(slots))
    }

    /// Uniformly random permutation of the working ids `0..30`.
    pub fn random(rng: &mut Rng) -> Self {
        let mut layout = Layout::identity();
        layout.randomize(rng);
        layout
    }

    /// Refills every slot with a fresh uniform permutation, discarding the old contents.
    pub fn randomize(&mut self, rng: &mut Rng) {
        let mut free: Vec<u8> = (0..KEY_COUNT as u8).collect();
        for slot in self.0.iter_mut() {
            let idx = rng.usize(0..free.len());
            *slot = free.swap_remove(idx);
        }
    }

    /// True if the slots hold each of the ids `0..30` exactly once.
    pub fn is_permutation(&self) -> bool {
        let mut seen = [false; KEY_COUNT];
        for &id in &self.0 {
            let id = id as usize;
            if id >= KEY_COUNT || seen[id] {
                return false;
            }
            seen[id] = true;
        }
        true
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        self.0.swap(a, b);
    }

    pub fn slots(&self) -> &[u8; KEY_COUNT] {
        &self.0
    }
}

impl Index<usize> for Layout {
    type Output = u8;

    fn index(&self, slot: usize) -> &u8 {
        &self.0[slot]
    }
}

impl IndexMut<usize> for Layout {
    fn index_mut(&mut self, slot: usize) -> &mut u8 {
        &mut self.0[slot]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{DEFAULT_ALPHABET, REFERENCE_LAYOUT};
    use proptest::prelude::*;

    #[test]
    fn test_mapping_folds_case() {
        let mapping = Mapping::build("AbC").unwrap();
        assert_eq!(mapping.symbols(), &['a', 'b', 'c']);
        assert_eq!(mapping.id_of('A'), Some(0));
        assert_eq!(mapping.id_of('c'), Some(2));
        assert_eq!(mapping.id_of('z'), None);
    }

    #[test]
    fn test_mapping_rejects_oversized_alphabet() {
        let symbols: String = (0..300u32).filter_map(|i| char::from_u32(0x4e00 + i)).collect();
        match Mapping::build(&symbols) {
            Err(KeyEvolveError::TooManySymbols(n)) => assert_eq!(n, 300),
            other => panic!("Expected TooManySymbols, got {:?}", other),
        }
    }

    #[test]
    fn test_mapping_accepts_exactly_256() {
        let symbols: String = (0..256u32).filter_map(|i| char::from_u32(0x4e00 + i)).collect();
        let mapping = Mapping::build(&symbols).unwrap();
        assert_eq!(mapping.len(), 256);
        assert_eq!(mapping.symbol(255), char::from_u32(0x4e00 + 255));
    }

    #[test]
    fn test_mapping_rejects_duplicates() {
        assert!(matches!(
            Mapping::build("abA"),
            Err(KeyEvolveError::DuplicateSymbol('a'))
        ));
    }

    #[test]
    fn test_parse_reference_layout() {
        let mapping = Mapping::build(DEFAULT_ALPHABET).unwrap();
        let layout = Layout::parse(REFERENCE_LAYOUT, &mapping).unwrap();
        assert!(layout.is_permutation());
        assert_eq!(mapping.symbol(layout[0]), Some('q'));
        assert_eq!(mapping.symbol(layout[10]), Some('a'));
        assert_eq!(mapping.layout_string(&layout), REFERENCE_LAYOUT);
    }

    #[test]
    fn test_parse_errors() {
        let mapping = Mapping::build(DEFAULT_ALPHABET).unwrap();
        assert!(matches!(
            Layout::parse("qwerty", &mapping),
            Err(KeyEvolveError::LayoutLength { expected: 30, got: 6 })
        ));
        assert!(matches!(
            Layout::parse("qwertyuiopasdfghjkl;zxcvbnm.,!", &mapping),
            Err(KeyEvolveError::UnknownSymbol('!'))
        ));
        assert!(matches!(
            Layout::parse("qqertyuiopasdfghjkl;zxcvbnm.,/", &mapping),
            Err(KeyEvolveError::DuplicateSymbol('q'))
        ));
    }

    #[test]
    fn test_render_diagram() {
        let mapping = Mapping::build(DEFAULT_ALPHABET).unwrap();
        let layout = Layout::parse(REFERENCE_LAYOUT, &mapping).unwrap();
        assert_eq!(
            mapping.render(&layout),
            "qwer t  y uiop\nasdf g  h jkl;\nzxcv b  n m.,/\n"
        );
    }

    proptest! {
        #[test]
        fn prop_random_layout_is_permutation(seed in any::<u64>()) {
            let mut rng = Rng::with_seed(seed);
            prop_assert!(Layout::random(&mut rng).is_permutation());
        }
    }
}
