use crate::error::KeResult;
use crate::layout::{Layout, Mapping};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum KnownLayout {
    Qwerty,
    Abcde,
    Dvorak,
    Colemak,
    Asset,
    Workman,
    Nail,
    Layman,
}

impl KnownLayout {
    // Standard 30-key block, top row first.
    pub fn get_str(&self) -> &'static str {
        match self {
            Self::Qwerty => "qwertyuiopasdfghjkl;zxcvbnm.,/",
            Self::Abcde => "abcdefghijklmnopqrstuvwxyz.,;/",
            Self::Dvorak => "/,.pyfgcrlaoeuidhtns;qjkxbmwvz",
            Self::Colemak => "qwfpgjluy;arstdhneiozxcvbkm.,/",
            Self::Asset => "qwjfgypul;asetdhniorzxcvbkm,./",
            Self::Workman => "qdrwbjfup;ashtgyneoizxmcvkl,./",
            Self::Nail => ",.cgkxbou;therfdnail/pysqjmwvz",
            Self::Layman => "/pu.xqfcgyaserlhntoikv;dzbmw,j",
        }
    }

    pub fn to_layout(&self, mapping: &Mapping) -> KeResult<Layout> {
        Layout::parse(self.get_str(), mapping)
    }
}

/// Every named layout parsed against `mapping`, in declaration order.
pub fn get_all_layouts(mapping: &Mapping) -> KeResult<Vec<(KnownLayout, Layout)>> {
    KnownLayout::iter()
        .map(|known| Ok((known, known.to_layout(mapping)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::DEFAULT_ALPHABET;
    use std::str::FromStr;

    #[test]
    fn test_all_named_layouts_are_permutations() {
        let mapping = Mapping::build(DEFAULT_ALPHABET).unwrap();
        let all = get_all_layouts(&mapping).unwrap();
        assert_eq!(all.len(), 8);
        for (name, layout) in all {
            assert!(layout.is_permutation(), "{} is not a permutation", name);
        }
    }

    #[test]
    fn test_name_lookup() {
        assert_eq!(KnownLayout::from_str("dvorak").unwrap(), KnownLayout::Dvorak);
        assert_eq!(KnownLayout::from_str("Colemak").unwrap(), KnownLayout::Colemak);
        assert!(KnownLayout::from_str("all").is_err());
        assert_eq!(KnownLayout::Workman.to_string(), "workman");
    }
}
