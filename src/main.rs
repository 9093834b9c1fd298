use clap::{Parser, Subcommand};
use keyevolve::config::CorpusPaths;
use keyevolve::error::{KeResult, KeyEvolveError};
use keyevolve::scorer::ScorerKind;
use std::process;
use std::str::FromStr;
use tracing::{error, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Cost model: `monogram` or `bigram`.
    #[arg(global = true, short = 's', long, default_value = "monogram")]
    scoring_func: String,

    #[command(flatten)]
    corpus: CorpusPaths,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evolve layouts until interrupted or a limit is hit.
    Search(cmd::search::SearchArgs),
    /// Score named or literal layouts against the corpus.
    Score(cmd::score::ScoreArgs),
}

fn scorer_kind(name: &str) -> KeResult<ScorerKind> {
    ScorerKind::from_str(name).map_err(|_| {
        KeyEvolveError::Config(format!(
            "unknown scoring function '{}' (expected monogram or bigram)",
            name
        ))
    })
}

fn run(cli: Cli) -> KeResult<()> {
    let kind = scorer_kind(&cli.scoring_func)?;
    match cli.command {
        Commands::Search(args) => cmd::search::run(args, kind, &cli.corpus),
        Commands::Score(args) => cmd::score::run(args, kind, &cli.corpus),
    }
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only layouts and scores.
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        error!("❌ {}", e);
        process::exit(1);
    }
}
