use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use keyevolve::error::KeResult;
use keyevolve::layout::{Layout, Mapping};
use keyevolve::optimizer::GenerationReport;
use serde::Serialize;

/// One scored layout, as printed by `score`.
#[derive(Debug, Clone, Serialize)]
pub struct LayoutScore {
    pub name: String,
    pub layout: String,
    pub score: u64,
    /// Ratio to the reference layout. Serialized as `null` when NaN.
    pub normalized: f64,
    #[serde(skip)]
    pub keys: Layout,
}

pub fn print_diagram(mapping: &Mapping, layout: &Layout) {
    print!("{}", mapping.render(layout));
}

pub fn print_score_line(entry: &LayoutScore) {
    println!("{}: {:16.12}", entry.name, entry.normalized);
}

pub fn print_search_result(mapping: &Mapping, best: &GenerationReport, normalized: f64) {
    println!("\n🏆 === BEST LAYOUT === 🏆");
    println!("Score:  {:16.12} (raw {})", normalized, best.score);
    println!("Layout: {}", mapping.layout_string(&best.layout));
    print_diagram(mapping, &best.layout);
}

pub fn print_scoring_report(results: &[LayoutScore]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Layout").add_attribute(Attribute::Bold),
        Cell::new("Normalized").fg(Color::Cyan),
        Cell::new("Raw"),
        Cell::new("Keys"),
    ]);

    for i in 1..=2 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for r in results {
        table.add_row(vec![
            Cell::new(&r.name).add_attribute(Attribute::Bold),
            Cell::new(format!("{:.12}", r.normalized)).fg(Color::Cyan),
            Cell::new(r.score),
            Cell::new(&r.layout),
        ]);
    }
    println!("{}", table);
}

pub fn print_json(results: &[LayoutScore]) -> KeResult<()> {
    println!("{}", serde_json::to_string_pretty(results)?);
    Ok(())
}
