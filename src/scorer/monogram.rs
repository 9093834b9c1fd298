use super::loader::{load_monograms, load_monograms_from_path};
use super::weights::MONOGRAM_KEY_WEIGHTS;
use super::{ensure_working_alphabet, reference_layout, warn_on_zero_baseline, ScoringFunction};
use crate::config::CorpusPaths;
use crate::error::{KeResult, KeyEvolveError};
use crate::layout::{Layout, Mapping};
use std::io::Read;

/// Weights each symbol's frequency by how good its key is.
#[derive(Debug, Clone)]
pub struct MonogramScorer {
    // monograms[mapping.id_of('e')] = 5234
    monograms: Vec<u64>,
    baseline: u64,
}

impl MonogramScorer {
    pub fn from_counts(mapping: &Mapping, monograms: Vec<u64>) -> KeResult<Self> {
        ensure_working_alphabet(mapping)?;
        if monograms.len() != mapping.len() {
            return Err(KeyEvolveError::Config(format!(
                "monogram table has {} entries for a {}-symbol mapping",
                monograms.len(),
                mapping.len()
            )));
        }

        let mut scorer = Self {
            monograms,
            baseline: 0,
        };
        scorer.baseline = scorer.calculate_score(&reference_layout(mapping));
        warn_on_zero_baseline("Monogram", scorer.baseline);
        Ok(scorer)
    }

    pub fn from_reader<R: Read>(mapping: &Mapping, reader: R) -> KeResult<Self> {
        Self::from_counts(mapping, load_monograms(reader, mapping)?)
    }
}

impl ScoringFunction for MonogramScorer {
    fn init(mapping: &Mapping, corpus: &CorpusPaths) -> KeResult<Self> {
        Self::from_counts(mapping, load_monograms_from_path(&corpus.monograms, mapping)?)
    }

    #[inline]
    fn calculate_score(&self, layout: &Layout) -> u64 {
        layout
            .slots()
            .iter()
            .zip(MONOGRAM_KEY_WEIGHTS.iter())
            .fold(0u64, |acc, (&id, &weight)| {
                acc.saturating_add(self.monograms[id as usize].saturating_mul(weight))
            })
    }

    fn baseline_score(&self) -> u64 {
        self.baseline
    }
}
