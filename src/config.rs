use crate::error::{KeResult, KeyEvolveError};
use clap::Args;
use std::time::Duration;

#[derive(Args, Debug, Clone)]
pub struct CorpusPaths {
    /// Single-symbol counts, one `<symbol> <count>` per line.
    #[arg(global = true, long, default_value = "monograms.txt")]
    pub monograms: String,
    /// Symbol-pair counts, one `<symbol><symbol> <count>` per line.
    #[arg(global = true, long, default_value = "bigrams.txt")]
    pub bigrams: String,
}

impl Default for CorpusPaths {
    fn default() -> Self {
        Self {
            monograms: "monograms.txt".to_string(),
            bigrams: "bigrams.txt".to_string(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SearchParams {
    /// Number of independent evolution engines.
    #[arg(long, default_value_t = 10)]
    pub workers: usize,
    /// Generation reports buffered before engines block.
    #[arg(long, default_value_t = 10)]
    pub channel_capacity: usize,
    #[arg(long, default_value_t = 1000)]
    pub population_size: usize,
    /// Elite parents kept verbatim and bred pairwise.
    #[arg(long, default_value_t = 35)]
    pub parents: usize,
    #[arg(long, default_value_t = 100)]
    pub diversify_initial: usize,
    #[arg(long, default_value_t = 10)]
    pub diversify_step: usize,
    #[arg(long, default_value_t = 990)]
    pub diversify_limit: usize,
    /// Base seed; engine `n` uses `seed + n`.
    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
    /// Stop after this many seconds.
    #[arg(short = 'T', long)]
    pub time: Option<u64>,
    /// Stop after this many generation reports (summed over all engines).
    #[arg(short = 'g', long)]
    pub generations: Option<u64>,
    #[arg(long, default_value_t = 2000)]
    pub shutdown_timeout_ms: u64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            workers: 10,
            channel_capacity: 10,
            population_size: 1000,
            parents: 35,
            diversify_initial: 100,
            diversify_step: 10,
            diversify_limit: 990,
            seed: None,
            time: None,
            generations: None,
            shutdown_timeout_ms: 2000,
        }
    }
}

impl SearchParams {
    pub fn validate(&self) -> KeResult<()> {
        if self.workers == 0 {
            return Err(KeyEvolveError::Config("--workers must be at least 1".into()));
        }
        if self.channel_capacity == 0 {
            return Err(KeyEvolveError::Config(
                "--channel-capacity must be at least 1".into(),
            ));
        }
        if self.parents < 2 {
            return Err(KeyEvolveError::Config("--parents must be at least 2".into()));
        }
        if self.parents > self.population_size {
            return Err(KeyEvolveError::Config(format!(
                "--parents ({}) exceeds --population-size ({})",
                self.parents, self.population_size
            )));
        }
        if self.diversify_initial > self.diversify_limit {
            return Err(KeyEvolveError::Config(format!(
                "--diversify-initial ({}) exceeds --diversify-limit ({})",
                self.diversify_initial, self.diversify_limit
            )));
        }
        if self.diversify_limit >= self.population_size {
            return Err(KeyEvolveError::Config(format!(
                "--diversify-limit ({}) must be below --population-size ({})",
                self.diversify_limit, self.population_size
            )));
        }
        Ok(())
    }

    pub fn max_time(&self) -> Option<Duration> {
        self.time.map(Duration::from_secs)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }

    pub fn engine_seed(&self, index: usize) -> Option<u64> {
        self.seed.map(|s| s.wrapping_add(index as u64))
    }
}
