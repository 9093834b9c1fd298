use super::{Engine, GenerationReport};
use crate::config::SearchParams;
use crate::error::KeResult;
use crate::scorer::ScoringFunction;
use crossbeam_channel::{bounded, never, select, Receiver};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Receives every generation report the supervisor drains.
/// Boolean return value indicates if the search should continue (true) or stop (false).
pub trait ProgressCallback {
    fn on_report(&mut self, received: u64, report: &GenerationReport, improved: bool) -> bool;
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub best: Option<GenerationReport>,
    /// Reports drained from all engines.
    pub reports: u64,
    /// Engines that exited before the shutdown deadline.
    pub joined: usize,
    /// Engines still running at the deadline, left detached.
    pub detached: usize,
}

/// Runs several engines against one shared scorer and keeps the best layout any of them
/// reports.
pub struct Supervisor {
    scorer: Arc<dyn ScoringFunction>,
    params: SearchParams,
}

impl Supervisor {
    pub fn new(scorer: Arc<dyn ScoringFunction>, params: SearchParams) -> KeResult<Self> {
        params.validate()?;
        Ok(Self { scorer, params })
    }

    /// Searches until `stop` fires, the callback declines, or a configured generation or
    /// time limit is reached. A disconnected `stop` channel is treated as "never".
    pub fn run<CB: ProgressCallback>(
        &self,
        stop: Receiver<()>,
        callback: &mut CB,
    ) -> KeResult<SearchOutcome> {
        let cancel = Arc::new(AtomicBool::new(false));
        let (results, reports_rx) = bounded(self.params.channel_capacity);

        let mut handles = Vec::with_capacity(self.params.workers);
        for i in 0..self.params.workers {
            let scorer = self.scorer.clone();
            let params = self.params.clone();
            let results = results.clone();
            let cancel_flag = cancel.clone();

            let spawned = thread::Builder::new()
                .name(format!("engine-{}", i))
                .spawn(move || {
                    let engine = Engine::new(i, scorer, &params, params.engine_seed(i));
                    engine.run(&results, &cancel_flag)
                });

            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    cancel.store(true, Ordering::Relaxed);
                    return Err(e.into());
                }
            }
        }
        drop(results);

        info!(
            "🧬 Spawned {} engines ({} layouts each).",
            handles.len(),
            self.params.population_size
        );

        let deadline = self.params.max_time().map(|d| Instant::now() + d);
        let timer = match deadline {
            Some(at) => crossbeam_channel::at(at),
            None => never(),
        };
        let idle = never();
        let mut stop = Some(stop);
        let mut best: Option<GenerationReport> = None;
        let mut received = 0u64;

        loop {
            if let Some(limit) = self.params.generations {
                if received >= limit {
                    info!("Reached {} generations.", limit);
                    break;
                }
            }

            let stop_rx = stop.as_ref().unwrap_or(&idle);
            let mut stop_closed = false;
            select! {
                recv(stop_rx) -> msg => {
                    if msg.is_ok() {
                        info!("Stop requested.");
                        break;
                    }
                    stop_closed = true;
                }
                recv(reports_rx) -> msg => {
                    let Ok(report) = msg else {
                        warn!("All engines exited.");
                        break;
                    };
                    received += 1;
                    let improved = best.map_or(true, |b| b.score < report.score);
                    if improved {
                        debug!(
                            "New best {} from engine {} at report {}.",
                            report.score, report.engine, received
                        );
                        best = Some(report);
                    }
                    if !callback.on_report(received, &report, improved) {
                        break;
                    }
                }
                recv(timer) -> _ => {
                    info!("Time limit reached.");
                    break;
                }
            }
            if stop_closed {
                stop = None;
            }
        }

        cancel.store(true, Ordering::Relaxed);
        // Engines blocked on a full queue see the disconnect instead of waiting for space.
        drop(reports_rx);
        let (joined, detached) = join_with_timeout(handles, self.params.shutdown_timeout());

        Ok(SearchOutcome {
            best,
            reports: received,
            joined,
            detached,
        })
    }
}

/// Joins every engine that exits before `timeout`; the rest are detached.
fn join_with_timeout(handles: Vec<JoinHandle<u64>>, timeout: Duration) -> (usize, usize) {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline && !handles.iter().all(|h| h.is_finished()) {
        thread::sleep(Duration::from_millis(5));
    }

    let mut joined = 0;
    let mut detached = 0;
    let mut generations = 0;
    for handle in handles {
        if handle.is_finished() {
            match handle.join() {
                Ok(g) => generations += g,
                Err(_) => warn!("An engine panicked."),
            }
            joined += 1;
        } else {
            detached += 1;
        }
    }

    if detached > 0 {
        warn!(
            "⚠️  {} engines still running after {:?}; detaching.",
            detached, timeout
        );
    }
    debug!(
        "Joined {} engines ({} generations in total).",
        joined, generations
    );
    (joined, detached)
}
