pub mod bigram;
pub mod loader;
pub mod monogram;
pub mod weights;

pub use self::bigram::BigramScorer;
pub use self::monogram::MonogramScorer;
pub use self::weights::{PairWeights, MONOGRAM_KEY_WEIGHTS};

use crate::config::CorpusPaths;
use crate::consts::{KEY_COUNT, REFERENCE_LAYOUT};
use crate::error::{KeResult, KeyEvolveError};
use crate::layout::{Layout, Mapping};
use std::sync::Arc;
use strum_macros::{Display, EnumString};
use tracing::warn;

/// A cost model turning a layout into an integer fitness. Higher is better.
///
/// Implementations precompute everything at construction and never mutate afterwards, so
/// one instance can be shared by every engine thread.
pub trait ScoringFunction: Send + Sync {
    /// Loads corpus counts keyed by `mapping` ids and caches the reference layout's score.
    fn init(mapping: &Mapping, corpus: &CorpusPaths) -> KeResult<Self>
    where
        Self: Sized;

    fn calculate_score(&self, layout: &Layout) -> u64;

    /// Score of the reference layout; the denominator for [`ScoringFunction::normalize_score`].
    fn baseline_score(&self) -> u64;

    /// Ratio to the reference layout. A zero baseline gives `NaN` (or infinity for a
    /// non-zero score).
    fn normalize_score(&self, score: u64) -> f64 {
        score as f64 / self.baseline_score() as f64
    }
}

#[derive(Debug, Clone, Copy, EnumString, Display, PartialEq, Eq)]
#[strum(serialize_all = "snake_case")]
pub enum ScorerKind {
    Monogram,
    Bigram,
}

impl ScorerKind {
    pub fn build(&self, mapping: &Mapping, corpus: &CorpusPaths) -> KeResult<Arc<dyn ScoringFunction>> {
        Ok(match self {
            Self::Monogram => Arc::new(MonogramScorer::init(mapping, corpus)?),
            Self::Bigram => Arc::new(BigramScorer::init(mapping, corpus)?),
        })
    }
}

/// The layout that normalizes to 1.0: qwerty when the mapping has every qwerty symbol,
/// otherwise the alphabet in order.
pub fn reference_layout(mapping: &Mapping) -> Layout {
    Layout::parse(REFERENCE_LAYOUT, mapping).unwrap_or_else(|_| Layout::identity())
}

pub(crate) fn ensure_working_alphabet(mapping: &Mapping) -> KeResult<()> {
    if mapping.len() < KEY_COUNT {
        return Err(KeyEvolveError::Config(format!(
            "scoring needs at least {} symbols in the mapping, got {}",
            KEY_COUNT,
            mapping.len()
        )));
    }
    Ok(())
}

pub(crate) fn warn_on_zero_baseline(name: &str, baseline: u64) {
    if baseline == 0 {
        warn!(
            "⚠️  {} baseline is zero; normalized scores will be NaN or infinite.",
            name
        );
    }
}
