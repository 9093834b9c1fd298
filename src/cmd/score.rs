use crate::reports::{self, LayoutScore};
use clap::Args;
use keyevolve::config::CorpusPaths;
use keyevolve::consts::{DEFAULT_ALPHABET, KEY_COUNT};
use keyevolve::error::{KeResult, KeyEvolveError};
use keyevolve::layout::{Layout, Mapping};
use keyevolve::layouts::{get_all_layouts, KnownLayout};
use keyevolve::scorer::ScorerKind;
use std::str::FromStr;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    /// A named layout, `all`, or 30 symbols in slot order.
    #[arg(short, long, default_value = "qwerty")]
    pub layout: String,

    /// Print results as JSON instead of text.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

fn resolve_layouts(text: &str, mapping: &Mapping) -> KeResult<Vec<(String, Layout)>> {
    if text.eq_ignore_ascii_case("all") {
        return Ok(get_all_layouts(mapping)?
            .into_iter()
            .map(|(known, layout)| (known.to_string(), layout))
            .collect());
    }
    if let Ok(known) = KnownLayout::from_str(text) {
        return Ok(vec![(known.to_string(), known.to_layout(mapping)?)]);
    }
    if text.chars().count() == KEY_COUNT {
        return Ok(vec![("custom".to_string(), Layout::parse(text, mapping)?)]);
    }
    Err(KeyEvolveError::Config(format!(
        "'{}' is neither a known layout, 'all', nor {} symbols",
        text, KEY_COUNT
    )))
}

pub fn run(args: ScoreArgs, kind: ScorerKind, corpus: &CorpusPaths) -> KeResult<()> {
    let mapping = Mapping::build(DEFAULT_ALPHABET)?;
    let targets = resolve_layouts(&args.layout, &mapping)?;

    info!("📂 Loading {} scorer", kind);
    let scorer = kind.build(&mapping, corpus)?;

    let mut results: Vec<LayoutScore> = targets
        .into_iter()
        .map(|(name, layout)| {
            let score = scorer.calculate_score(&layout);
            LayoutScore {
                name,
                layout: mapping.layout_string(&layout),
                score,
                normalized: scorer.normalize_score(score),
                keys: layout,
            }
        })
        .collect();
    results.sort_by(|a, b| b.score.cmp(&a.score));

    if args.json {
        return reports::print_json(&results);
    }

    match results.as_slice() {
        [single] => {
            reports::print_score_line(single);
            reports::print_diagram(&mapping, &single.keys);
        }
        many => reports::print_scoring_report(many),
    }
    Ok(())
}
