use podium_compare::{Aggregation, ComparisonFilter, Facet, FacetFilter, MetricRequest};
use podium_core::AppContext;
use podium_model::{CellValue, Dataset, Logic, Operator, PartialMapping, Role, Rule};

fn sheet() -> Dataset {
    let rows = [
        ("A", "1", "X", "01-01-2020", "500m", "1:10.5"),
        ("B", "2", "X", "01-01-2020", "500m", "1:11.0"),
        ("A", "3", "Y", "02-02-2021", "1000m", "2:20.1"),
    ];
    Dataset::from_records(rows.iter().map(|(name, rank, comp, date, dist, time)| {
        vec![
            ("Naam", CellValue::from(*name)),
            ("Ranking", CellValue::from(*rank)),
            ("Wedstrijd", CellValue::from(*comp)),
            ("Datum", CellValue::from(*date)),
            ("Afstand", CellValue::from(*dist)),
            ("Tijd", CellValue::from(*time)),
        ]
    }))
}

#[test]
fn imported_sheet_feeds_every_analysis() {
    let mut ctx = AppContext::new();
    let report = ctx.import(sheet(), None);
    assert_eq!(report.mapping().get(Role::Time), Some("Tijd"));

    let kept = ctx.query(&[Rule::new("Ranking", Operator::Lte, "2")]);
    assert_eq!(kept.len(), 2);

    let h2h = ctx.head_to_head(&["A", "B"], &[], &ComparisonFilter::default());
    assert_eq!(h2h.pairs[0].meetings, 1);
    assert_eq!(h2h.pairs[0].a_ahead, 1);
    assert_eq!(ctx.index(&[]).event_count(), 2);

    let stats = ctx.stats(Some("A"), &FacetFilter::new());
    assert_eq!(stats.kpi.starts, 2);
    assert_eq!(stats.kpi.wins, 1);

    let facets = FacetFilter::new().with_year(Some(2021));
    assert_eq!(ctx.stats(None, &facets).kpi.starts, 1);
    let facets = FacetFilter::new().with(Facet::Competition, Some("X"));
    assert_eq!(ctx.stats(Some("B"), &facets).kpi.best_rank, Some(2.0));

    assert_eq!(ctx.overview().competitors, 2);
    assert_eq!(ctx.facet_options().years, vec![2020, 2021]);
}

#[test]
fn persisted_mapping_wins_over_synonyms() {
    let mut persisted = PartialMapping::new();
    persisted.insert(Role::Competition, "afstand");
    let mut ctx = AppContext::new().with_persisted(persisted);
    ctx.import(sheet(), None);

    assert_eq!(ctx.mapping().unwrap().get(Role::Competition), Some("Afstand"));
    ctx.set_mapping(Role::Competition, Some("Wedstrijd")).unwrap();
    assert_eq!(ctx.persisted().get(Role::Competition), Some("Wedstrijd"));
    assert_eq!(
        ctx.mapping().unwrap().get(Role::Competition),
        Some("Wedstrijd")
    );
}

#[test]
fn rules_narrow_the_compared_events() {
    let mut ctx = AppContext::new();
    ctx.import(sheet(), None);
    let everything = ComparisonFilter::default();

    let winners_only = [Rule::new("Ranking", Operator::Lte, "1")];
    let h2h = ctx.head_to_head(&["A", "B"], &winners_only, &everything);
    assert_eq!(h2h.pairs[0].meetings, 0);
    assert_eq!(h2h.competitors[0].meetings, 0);
    assert_eq!(h2h.competitors[0].kpi.starts, 1);
    assert_eq!(ctx.index(&winners_only).event_count(), 1);

    let sprint_or_y = [
        Rule::new("Afstand", Operator::Equals, "500m"),
        Rule::new("Wedstrijd", Operator::Equals, "Y").with_logic(Logic::Or),
    ];
    let h2h = ctx.head_to_head(&["A", "B"], &sprint_or_y, &everything);
    assert_eq!(h2h.pairs[0].meetings, 1);
    assert_eq!(h2h.events, 2);

    let stats = ctx.competitor_stats(&["A", "B"], &winners_only, &everything);
    assert_eq!(stats[0].1.kpi.wins, 1);
    assert_eq!(stats[1].1.kpi.starts, 0);
}

#[test]
fn column_metrics_follow_rules_and_filter() {
    let mut ctx = AppContext::new();
    ctx.import(sheet(), None);
    let requests = [
        MetricRequest::new("Ranking", Aggregation::Best),
        MetricRequest::new("Ranking", Aggregation::Count),
    ];

    let metrics = ctx.column_metrics(&["A", "B"], &[], &ComparisonFilter::default(), &requests);
    assert_eq!(metrics[0].values, vec![Some(1.0), Some(2.0)]);
    assert_eq!(metrics[0].best, Some(0));
    assert_eq!(metrics[1].values, vec![Some(2.0), Some(1.0)]);

    let filter = ComparisonFilter {
        competition: Some("Y".to_string()),
        distance: None,
    };
    let metrics = ctx.column_metrics(&["A", "B"], &[], &filter, &requests);
    assert_eq!(metrics[0].values, vec![Some(3.0), None]);
    assert_eq!(metrics[1].values, vec![Some(1.0), Some(0.0)]);

    let rules = [Rule::new("Ranking", Operator::Gte, "2")];
    let metrics = ctx.column_metrics(&["A", "B"], &rules, &ComparisonFilter::default(), &requests);
    assert_eq!(metrics[0].values, vec![Some(3.0), Some(2.0)]);
    assert_eq!(metrics[0].best, Some(1));

    assert!(AppContext::new().column_metrics(&["A", "B"], &[], &filter, &requests).is_empty());
}
