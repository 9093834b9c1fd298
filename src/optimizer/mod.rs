pub mod crossover;
pub mod diversify;
pub mod mutation;
pub mod runner;

pub use self::diversify::DiversifyController;
pub use self::runner::{ProgressCallback, SearchOutcome, Supervisor};

use crate::config::SearchParams;
use crate::layout::Layout;
use crate::scorer::ScoringFunction;
use crossbeam_channel::Sender;
use fastrand::Rng;
use itertools::Itertools;
use std::cmp::Reverse;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// A population member. The score belongs to the last evaluation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutEntry {
    pub layout: Layout,
    pub score: u64,
}

/// Best entry of one engine's generation, handed to the supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationReport {
    pub engine: usize,
    pub layout: Layout,
    pub score: u64,
}

/// One independent genetic search over a fixed-size population.
pub struct Engine {
    id: usize,
    scorer: Arc<dyn ScoringFunction>,
    population: Vec<LayoutEntry>,
    parents: usize,
    diversify: DiversifyController,
    rng: Rng,
}

impl Engine {
    pub fn new(
        id: usize,
        scorer: Arc<dyn ScoringFunction>,
        params: &SearchParams,
        seed: Option<u64>,
    ) -> Self {
        let mut rng = if let Some(s) = seed {
            Rng::with_seed(s)
        } else {
            Rng::new()
        };

        let population = (0..params.population_size)
            .map(|_| LayoutEntry {
                layout: Layout::random(&mut rng),
                score: 0,
            })
            .collect();

        Self {
            id,
            scorer,
            population,
            parents: params.parents,
            diversify: DiversifyController::from_params(params),
            rng,
        }
    }

    pub fn population(&self) -> &[LayoutEntry] {
        &self.population
    }

    pub fn diversify(&self) -> &DiversifyController {
        &self.diversify
    }

    /// Scores every entry and ranks the population best-first.
    pub fn evaluate(&mut self) -> GenerationReport {
        for entry in self.population.iter_mut() {
            entry.score = self.scorer.calculate_score(&entry.layout);
        }
        self.population
            .sort_unstable_by_key(|entry| Reverse(entry.score));

        let top = self.population[0];
        GenerationReport {
            engine: self.id,
            layout: top.layout,
            score: top.score,
        }
    }

    /// Builds the next population from the ranked one: breed, mutate, diversify.
    pub fn advance(&mut self, top_score: u64) {
        let randomize = self.diversify.observe(top_score);
        let len = self.population.len();
        let bred_end = len.saturating_sub(randomize);
        let parents = self.parents.min(len);

        // Elites keep their slots; children fill [parents, bred_end).
        if bred_end > parents {
            let (elite, rest) = self.population.split_at_mut(parents);
            let pairs = (0..parents)
                .cartesian_product(0..parents)
                .filter(|(i, j)| i != j)
                .cycle();
            for (slot, (i, j)) in rest[..bred_end - parents].iter_mut().zip(pairs) {
                slot.layout = crossover::mix(&elite[i].layout, &elite[j].layout, &mut self.rng);
            }
        }

        for entry in self.population[..bred_end].iter_mut() {
            mutation::mutate(&mut entry.layout, &mut self.rng);
        }

        for entry in self.population[bred_end..].iter_mut() {
            entry.layout.randomize(&mut self.rng);
        }
    }

    /// One full generation. Returns the ranking's top entry from before breeding.
    pub fn step(&mut self) -> GenerationReport {
        let report = self.evaluate();
        self.advance(report.score);
        report
    }

    /// Runs generations until `cancel` is set or the supervisor hangs up. The flag is
    /// checked once per generation, before scoring. Blocks while the result queue is full.
    pub fn run(mut self, results: &Sender<GenerationReport>, cancel: &AtomicBool) -> u64 {
        debug!(
            "Engine {} starting with {} layouts.",
            self.id,
            self.population.len()
        );
        let mut generations = 0;

        while !cancel.load(Ordering::Relaxed) {
            let report = self.evaluate();
            if results.send(report).is_err() {
                debug!("Engine {}: result queue closed.", self.id);
                break;
            }
            self.advance(report.score);
            generations += 1;
        }

        debug!(
            "Engine {} stopped after {} generations.",
            self.id, generations
        );
        generations
    }
}
