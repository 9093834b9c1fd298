use crate::reports;
use clap::Args;
use crossbeam_channel::bounded;
use keyevolve::config::{CorpusPaths, SearchParams};
use keyevolve::consts::{DEFAULT_GENERATOR_ALPHABET, KEY_COUNT};
use keyevolve::error::{KeResult, KeyEvolveError};
use keyevolve::layout::Mapping;
use keyevolve::optimizer::{GenerationReport, ProgressCallback, Supervisor};
use keyevolve::scorer::{ScorerKind, ScoringFunction};
use std::io::{self, Write};
use tracing::{info, warn};

const DOT_EVERY: u64 = 100;

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Exactly 30 symbols to place on the keyboard.
    #[arg(short, long, default_value = DEFAULT_GENERATOR_ALPHABET)]
    pub characters: String,

    #[command(flatten)]
    pub params: SearchParams,
}

/// Prints a dot every hundred reports and the diagram of every new best.
struct ConsoleProgress<'a> {
    mapping: &'a Mapping,
    scorer: &'a dyn ScoringFunction,
}

impl ProgressCallback for ConsoleProgress<'_> {
    fn on_report(&mut self, received: u64, report: &GenerationReport, improved: bool) -> bool {
        if received % DOT_EVERY == 0 {
            print!(".");
            let _ = io::stdout().flush();
        }
        if improved {
            println!(
                "\nnew best: {:16.12} at generation {} (engine {})",
                self.scorer.normalize_score(report.score),
                received,
                report.engine
            );
            reports::print_diagram(self.mapping, &report.layout);
        }
        true
    }
}

fn generator_mapping(characters: &str) -> KeResult<Mapping> {
    let count = characters.chars().count();
    if count != KEY_COUNT {
        return Err(KeyEvolveError::Config(format!(
            "the generator needs exactly {} characters, got {}",
            KEY_COUNT, count
        )));
    }
    Mapping::build(characters)
}

pub fn run(args: SearchArgs, kind: ScorerKind, corpus: &CorpusPaths) -> KeResult<()> {
    args.params.validate()?;
    let mapping = generator_mapping(&args.characters)?;

    info!("📂 Loading {} scorer for '{}'", kind, args.characters);
    let scorer = kind.build(&mapping, corpus)?;
    let supervisor = Supervisor::new(scorer.clone(), args.params)?;

    let (stop_tx, stop_rx) = bounded(1);
    ctrlc::set_handler(move || {
        let _ = stop_tx.try_send(());
    })?;

    let mut progress = ConsoleProgress {
        mapping: &mapping,
        scorer: scorer.as_ref(),
    };
    let outcome = supervisor.run(stop_rx, &mut progress)?;

    println!();
    info!(
        "🏁 Search finished after {} generations ({} engines joined, {} detached).",
        outcome.reports, outcome.joined, outcome.detached
    );

    match outcome.best {
        Some(best) => {
            reports::print_search_result(&mapping, &best, scorer.normalize_score(best.score))
        }
        None => warn!("⚠️  Search stopped before any generation finished."),
    }
    Ok(())
}
