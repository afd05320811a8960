//! Terminal rendering of command results.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use podium_cli::session::ImportOutcome;
use podium_compare::{
    Aggregation, Champion, ChampionshipType, ColumnMetric, DatasetOverview, FacetOptions,
    HeadToHead, Kpi, Leader, LeaderMetric, Metric, RiderStats,
};
use podium_map::{MappingReport, Stage};
use podium_model::{Row, Schema};
use podium_normalize::{UNAVAILABLE, format_duration, format_for_display};
use podium_persistence::SourceStatus;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn leading_cell(cell: Cell) -> Cell {
    cell.fg(Color::Green).add_attribute(Attribute::Bold)
}

fn number(value: Option<f64>) -> String {
    value.map_or_else(|| UNAVAILABLE.to_string(), format_for_display)
}

fn duration(value: Option<f64>) -> String {
    value.map_or_else(|| UNAVAILABLE.to_string(), format_duration)
}

pub fn print_mapping(report: &MappingReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Role"),
        header_cell("Column"),
        header_cell("Matched by"),
    ]);
    apply_summary_table_style(&mut table);
    for res in &report.resolutions {
        let column = match &res.column {
            Some(column) => Cell::new(column),
            None => dim_cell(UNAVAILABLE),
        };
        let stage = match (res.stage, &res.matched) {
            (Stage::Unresolved, _) => Cell::new(res.stage.label()).fg(Color::Yellow),
            (stage, Some(matched)) => Cell::new(format!("{stage} '{matched}'")),
            (stage, None) => Cell::new(stage.label()),
        };
        table.add_row(vec![Cell::new(res.role.label()), column, stage]);
    }
    println!("{table}");
}

/// Print at most `limit` rows; the count line always reports the full total.
pub fn print_rows(schema: &Schema, rows: &[&Row], limit: usize) {
    let mut table = Table::new();
    table.set_header(schema.names().iter().map(|n| header_cell(n)));
    apply_table_style(&mut table);
    for row in rows.iter().take(limit) {
        table.add_row(row.cells().iter().map(|c| Cell::new(c.as_raw())));
    }
    println!("{table}");
    if rows.len() > limit {
        println!("Showing {limit} of {} matching rows", rows.len());
    } else {
        println!("{} matching rows", rows.len());
    }
}

fn kpi_rows(kpi: &Kpi) -> Vec<(String, String)> {
    let mut rows = vec![
        ("Starts".to_string(), kpi.starts.to_string()),
        ("Wins".to_string(), kpi.wins.to_string()),
        ("Podiums (<=3)".to_string(), kpi.podiums.to_string()),
        ("Avg rank".to_string(), number(kpi.avg_rank)),
        ("Best rank".to_string(), number(kpi.best_rank)),
    ];
    for kind in ChampionshipType::ALL {
        if let Some(tally) = kpi.medals.get(&kind) {
            rows.push((
                format!("{kind} medals"),
                format!("{} / {} / {}", tally.gold, tally.silver, tally.bronze),
            ));
        }
    }
    rows
}

pub fn print_stats(title: &str, stats: &RiderStats) {
    println!("{title}");
    let mut table = Table::new();
    table.set_header(vec![header_cell("Figure"), header_cell("Value")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (label, value) in kpi_rows(&stats.kpi) {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    table.add_row(vec![Cell::new("Best time"), Cell::new(duration(stats.best_time))]);
    table.add_row(vec![Cell::new("Avg time"), Cell::new(duration(stats.avg_time))]);
    table.add_row(vec![
        Cell::new("Last date"),
        Cell::new(
            stats
                .last_date
                .map_or_else(|| UNAVAILABLE.to_string(), |d| d.date().to_string()),
        ),
    ]);
    table.add_row(vec![
        Cell::new("Top distance"),
        Cell::new(stats.top_distance.as_deref().unwrap_or(UNAVAILABLE)),
    ]);
    println!("{table}");
}

pub fn print_facet_options(options: &FacetOptions) {
    let years: Vec<String> = options.years.iter().map(ToString::to_string).collect();
    println!("year: {}", years.join(", "));
    for (facet, values) in &options.values {
        println!("{}: {}", facet.role().label(), values.join(", "));
    }
}

fn metric_value(metric: &ColumnMetric, value: Option<f64>) -> String {
    match metric.aggregation {
        Aggregation::Count => value.map_or_else(|| UNAVAILABLE.to_string(), |v| v.to_string()),
        _ if metric.is_time => duration(value),
        _ => number(value),
    }
}

pub fn print_head_to_head(result: &HeadToHead, metrics: &[ColumnMetric], leaders: &[Leader]) {
    let mut table = Table::new();
    let mut header = vec![header_cell("Metric")];
    header.extend(result.competitors.iter().map(|c| header_cell(&c.name)));
    table.set_header(header);
    apply_summary_table_style(&mut table);
    for index in 1..=result.competitors.len() {
        align_column(&mut table, index, CellAlignment::Right);
    }

    for metric in Metric::ALL {
        let best = result.leading(metric);
        let mut row = vec![Cell::new(metric.label())];
        for line in &result.competitors {
            let cell = Cell::new(number(line.value(metric)));
            row.push(if best.contains(&line.name.as_str()) {
                leading_cell(cell)
            } else {
                cell
            });
        }
        table.add_row(row);
    }
    for metric in metrics {
        let label = format!("{} ({})", metric.column, metric.aggregation.label());
        let mut row = vec![Cell::new(label)];
        for (index, value) in metric.values.iter().enumerate() {
            let cell = Cell::new(metric_value(metric, *value));
            row.push(if metric.best == Some(index) {
                leading_cell(cell)
            } else {
                cell
            });
        }
        table.add_row(row);
    }
    println!("{table}");

    if !result.pairs.is_empty() {
        let mut pairs = Table::new();
        pairs.set_header(vec![
            header_cell("Pair"),
            header_cell("Meetings"),
            header_cell("A ahead"),
            header_cell("B ahead"),
            header_cell("Ties"),
            header_cell("Unknown"),
        ]);
        apply_table_style(&mut pairs);
        for index in 1..=5 {
            align_column(&mut pairs, index, CellAlignment::Right);
        }
        for pair in &result.pairs {
            pairs.add_row(vec![
                Cell::new(format!("{} vs {}", pair.a, pair.b)),
                Cell::new(pair.meetings),
                Cell::new(pair.a_ahead),
                Cell::new(pair.b_ahead),
                Cell::new(pair.ties),
                dim_cell(pair.unknown),
            ]);
        }
        println!("{pairs}");
    }

    for leader in leaders {
        let value = match leader.metric {
            LeaderMetric::FastestTime => format_duration(leader.value),
            _ => format_for_display(leader.value),
        };
        println!("{}: {} ({value})", leader.metric.label(), leader.name);
    }
}

pub fn print_champions(champions: &[Champion]) {
    if champions.is_empty() {
        println!("No champions found for this selection.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Competition"),
        header_cell("Type"),
        header_cell("Season"),
        header_cell("Distance"),
        header_cell("Champion"),
    ]);
    apply_summary_table_style(&mut table);
    for champion in champions {
        table.add_row(vec![
            Cell::new(&champion.competition),
            champion
                .kind
                .map_or_else(|| dim_cell(UNAVAILABLE), |k| Cell::new(k.code())),
            Cell::new(&champion.season),
            Cell::new(&champion.distance),
            Cell::new(&champion.winner).add_attribute(Attribute::Bold),
        ]);
    }
    println!("{table}");
}

pub fn print_overview(overview: &DatasetOverview) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Figure"), header_cell("Value")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let span = match (overview.first_season, overview.last_season) {
        (Some(first), Some(last)) if first != last => format!("{first}-{last}"),
        (Some(first), _) => first.to_string(),
        _ => UNAVAILABLE.to_string(),
    };
    for (label, value) in [
        ("Rows", overview.rows.to_string()),
        ("Competitors", overview.competitors.to_string()),
        ("Seasons", overview.seasons.to_string()),
        ("Distances", overview.distances.to_string()),
        ("Season span", span),
    ] {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    println!("{table}");
}

pub fn print_import(outcome: &ImportOutcome) {
    match outcome.previous {
        Some(SourceStatus::Changed) => println!("Source changed since the last import."),
        Some(SourceStatus::Unchanged) => println!("Source unchanged since the last import."),
        Some(SourceStatus::Missing | SourceStatus::Unknown) | None => {}
    }
    println!(
        "Imported {} rows ({} roles mapped)",
        outcome.rows, outcome.resolved_roles
    );
    println!("Dataset: {}", outcome.dataset_path.display());
    println!("Mapping: {}", outcome.mapping_path.display());
}
