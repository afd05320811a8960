use anyhow::{Context, Result, anyhow};
use podium_cli::logging::redact_value;
use podium_cli::session::{self, ImportOutcome, Session};
use podium_compare::{
    Aggregation, ChampionSelection, ComparisonFilter, Facet, FacetFilter, MetricRequest, leaders,
    normalize_chosen,
};
use podium_model::{Role, Rule};
use podium_persistence::MappingStore;
use tracing::{debug, info, info_span, warn};

use crate::cli::{
    ChampionsArgs, ColumnsArgs, FacetArgs, HeadToHeadArgs, ImportArgs, QueryArgs, RuleArgs,
    SourceArgs, StatsArgs,
};
use crate::summary::{
    print_champions, print_facet_options, print_head_to_head, print_import, print_mapping,
    print_overview, print_rows, print_stats,
};

fn open(source: &SourceArgs) -> Result<Session> {
    session::open(
        &source.file,
        source.mapping.as_deref(),
        source.synonyms.as_deref(),
    )
}

/// Split `role=column`. An empty column unmaps the role.
fn parse_override(raw: &str) -> Result<(Role, Option<&str>)> {
    let (role, column) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected ROLE=COLUMN, got '{raw}'"))?;
    let role: Role = role.parse()?;
    let column = Some(column.trim()).filter(|c| !c.is_empty());
    Ok((role, column))
}

pub fn run_columns(args: &ColumnsArgs) -> Result<()> {
    let span = info_span!("columns");
    let _guard = span.enter();
    let mut session = open(&args.source)?;
    print_mapping(&session.report);

    for raw in &args.overrides {
        let (role, column) = parse_override(raw)?;
        session
            .context
            .set_mapping(role, column)
            .with_context(|| format!("apply override '{raw}'"))?;
        println!("{} -> {}", role.label(), column.unwrap_or("(unmapped)"));
    }

    if args.save
        && let Some(path) = &args.source.mapping
    {
        MappingStore::new(path)
            .save(session.context.persisted())
            .with_context(|| format!("save mapping to {}", path.display()))?;
        info!(path = %path.display(), "mapping saved");
        println!("Mapping saved to {}", path.display());
    }
    Ok(())
}

pub fn run_query(args: &QueryArgs) -> Result<()> {
    let span = info_span!("query");
    let _guard = span.enter();
    let session = open(&args.source)?;
    let rules = load_rules(&args.filter)?;

    let Some(dataset) = session.context.dataset() else {
        return Err(anyhow!("no dataset loaded"));
    };
    let rows = session.context.query(&rules);
    if let Some(path) = &args.output {
        session::write_csv(path, dataset.schema(), &rows)?;
        println!("Wrote {} rows to {}", rows.len(), path.display());
    }
    print_rows(dataset.schema(), &rows, args.limit);
    Ok(())
}

fn load_rules(args: &RuleArgs) -> Result<Vec<Rule>> {
    let rules = session::load_rules(&args.rules, args.rules_file.as_deref())?;
    debug!(rules = rules.len(), "rules loaded");
    Ok(rules)
}

/// Split `column:aggregation` at the last colon, so column names may
/// contain colons themselves.
fn parse_metric(raw: &str) -> Result<MetricRequest> {
    let (column, aggregation) = raw
        .rsplit_once(':')
        .ok_or_else(|| anyhow!("expected COLUMN:AGGREGATION, got '{raw}'"))?;
    let column = column.trim();
    if column.is_empty() {
        return Err(anyhow!("metric '{raw}' names no column"));
    }
    let aggregation = Aggregation::from_name(aggregation).ok_or_else(|| {
        anyhow!("unknown aggregation '{aggregation}' in '{raw}', expected best, max, avg or count")
    })?;
    Ok(MetricRequest::new(column, aggregation))
}

fn facet_filter(args: &FacetArgs) -> FacetFilter {
    FacetFilter::new()
        .with_year(args.year)
        .with(Facet::Competition, args.competition.as_deref())
        .with(Facet::Location, args.location.as_deref())
        .with(Facet::Distance, args.distance.as_deref())
        .with(Facet::Sex, args.sex.as_deref())
        .with(Facet::Season, args.season.as_deref())
        .with(Facet::Winner, args.winner.as_deref())
        .with(Facet::Country, args.country.as_deref())
}

pub fn run_stats(args: &StatsArgs) -> Result<()> {
    let span = info_span!("stats");
    let _guard = span.enter();
    let session = open(&args.source)?;
    if args.options {
        print_facet_options(&session.context.facet_options());
        return Ok(());
    }

    let filter = facet_filter(&args.facets);
    let rider = args.rider.as_deref();
    if let Some(name) = rider {
        info!(rider = redact_value(name), "rider figures");
    }
    let stats = session.context.stats(rider, &filter);
    if stats.kpi.starts == 0 {
        warn!("no rows match the selection");
    }
    let title = rider.map_or_else(
        || "All results".to_string(),
        |name| format!("Results for {name}"),
    );
    print_stats(&title, &stats);
    Ok(())
}

pub fn run_h2h(args: &HeadToHeadArgs) -> Result<()> {
    let span = info_span!("h2h");
    let _guard = span.enter();
    let session = open(&args.source)?;

    let chosen = normalize_chosen(&args.riders);
    if chosen.len() < 2 {
        warn!(chosen = chosen.len(), "head-to-head needs two competitors");
    }
    let rules = load_rules(&args.filter)?;
    let requests = args
        .metrics
        .iter()
        .map(|raw| parse_metric(raw))
        .collect::<Result<Vec<_>>>()?;
    let filter = ComparisonFilter {
        competition: args.competition.clone(),
        distance: args.distance.clone(),
    };
    let context = &session.context;
    let result = context.head_to_head(&chosen, &rules, &filter);
    let metrics = context.column_metrics(&chosen, &rules, &filter, &requests);
    info!(
        competitors = result.competitors.len(),
        events = result.events,
        metrics = metrics.len(),
        "comparison built"
    );

    if args.json {
        let mut report = serde_json::to_value(&result).context("serialize comparison")?;
        if let serde_json::Value::Object(fields) = &mut report {
            fields.insert(
                "metrics".to_string(),
                serde_json::to_value(&metrics).context("serialize metrics")?,
            );
        }
        let text = serde_json::to_string_pretty(&report).context("serialize comparison")?;
        println!("{text}");
        return Ok(());
    }

    for name in &chosen {
        debug!(rider = redact_value(name), "collecting rider figures");
    }
    let stats = context.competitor_stats(&chosen, &rules, &filter);
    print_head_to_head(&result, &metrics, &leaders(&stats));
    Ok(())
}

pub fn run_champions(args: &ChampionsArgs) -> Result<()> {
    let span = info_span!("champions");
    let _guard = span.enter();
    let session = open(&args.source)?;
    let Ok(selection) = args.competition.parse::<ChampionSelection>();
    print_champions(&session.context.champions(&selection));
    Ok(())
}

pub fn run_overview(args: &SourceArgs) -> Result<()> {
    let span = info_span!("overview");
    let _guard = span.enter();
    let session = open(args)?;
    print_overview(&session.context.overview());
    Ok(())
}

pub fn run_import(args: &ImportArgs) -> Result<ImportOutcome> {
    let span = info_span!("import", store = %args.store.display());
    let _guard = span.enter();
    let outcome = session::import(&args.file, &args.store, args.synonyms.as_deref())?;
    info!(rows = outcome.rows, "import finished");
    print_import(&outcome);
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_parses_role_and_column() {
        let (role, column) = parse_override("competitor= Naam ").unwrap();
        assert_eq!(role, Role::Competitor);
        assert_eq!(column, Some("Naam"));
    }

    #[test]
    fn empty_override_unmaps() {
        let (role, column) = parse_override("rank=").unwrap();
        assert_eq!(role, Role::Rank);
        assert_eq!(column, None);
    }

    #[test]
    fn override_needs_separator() {
        assert!(parse_override("competitor").is_err());
        assert!(parse_override("nonsense=Naam").is_err());
    }

    #[test]
    fn metric_splits_at_last_colon() {
        let request = parse_metric("Tijd:best").unwrap();
        assert_eq!(request, MetricRequest::new("Tijd", Aggregation::Best));
        let request = parse_metric("Split 1:2: AVG").unwrap();
        assert_eq!(request, MetricRequest::new("Split 1:2", Aggregation::Avg));
    }

    #[test]
    fn metric_errors_name_the_input() {
        let err = parse_metric("Tijd:median").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown aggregation 'median' in 'Tijd:median', expected best, max, avg or count"
        );
        assert!(parse_metric("Tijd").is_err());
        assert!(parse_metric(" :count").is_err());
    }

    #[test]
    fn facet_args_build_filter() {
        let args = FacetArgs {
            year: Some(2020),
            competition: Some("WK Afstanden".to_string()),
            location: None,
            distance: Some(" ".to_string()),
            sex: None,
            season: None,
            winner: None,
            country: None,
        };
        let filter = facet_filter(&args);
        assert_eq!(filter.year, Some(2020));
        assert_eq!(filter.get(Facet::Competition), Some("WK Afstanden"));
        assert_eq!(filter.get(Facet::Distance), None);
    }
}
