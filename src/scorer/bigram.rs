use super::loader::{load_bigrams, load_bigrams_from_path, PairCounts};
use super::weights::PairWeights;
use super::{ensure_working_alphabet, reference_layout, warn_on_zero_baseline, ScoringFunction};
use crate::config::CorpusPaths;
use crate::consts::KEY_COUNT;
use crate::error::{KeResult, KeyEvolveError};
use crate::layout::{Layout, Mapping};
use std::io::Read;

/// Weights every ordered symbol pair's frequency by how comfortable its key pair is.
#[derive(Debug, Clone)]
pub struct BigramScorer {
    // bigrams.get(id('e'), id('s')) = 5234
    bigrams: PairCounts,
    weights: PairWeights,
    baseline: u64,
}

impl BigramScorer {
    pub fn from_counts(mapping: &Mapping, bigrams: PairCounts, weights: PairWeights) -> KeResult<Self> {
        ensure_working_alphabet(mapping)?;
        if bigrams.size() != mapping.len() {
            return Err(KeyEvolveError::Config(format!(
                "bigram table is {0}x{0} for a {1}-symbol mapping",
                bigrams.size(),
                mapping.len()
            )));
        }

        let mut scorer = Self {
            bigrams,
            weights,
            baseline: 0,
        };
        scorer.baseline = scorer.calculate_score(&reference_layout(mapping));
        warn_on_zero_baseline("Bigram", scorer.baseline);
        Ok(scorer)
    }

    pub fn from_reader<R: Read>(mapping: &Mapping, reader: R, weights: PairWeights) -> KeResult<Self> {
        Self::from_counts(mapping, load_bigrams(reader, mapping)?, weights)
    }
}

impl ScoringFunction for BigramScorer {
    fn init(mapping: &Mapping, corpus: &CorpusPaths) -> KeResult<Self> {
        let bigrams = load_bigrams_from_path(&corpus.bigrams, mapping)?;
        Self::from_counts(mapping, bigrams, PairWeights::build())
    }

    fn calculate_score(&self, layout: &Layout) -> u64 {
        let slots = layout.slots();
        let mut score: u64 = 0;
        for i in 0..KEY_COUNT {
            let freqs = self.bigrams.row(slots[i] as usize);
            let weights = self.weights.row(i);
            for j in 0..KEY_COUNT {
                score = score.saturating_add(weights[j].saturating_mul(freqs[slots[j] as usize]));
            }
        }
        score
    }

    fn baseline_score(&self) -> u64 {
        self.baseline
    }
}
