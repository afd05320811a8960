use podium_compare::{
    ComparisonFilter, EventIndex, Metric, PairStat, compare, meetings_for, pairwise,
};
use podium_model::{BoundMapping, CellValue, Dataset, Mapping, Role, Row};
use proptest::prelude::*;

const COLUMNS: [(&str, Role); 5] = [
    ("Naam", Role::Competitor),
    ("Ranking", Role::Rank),
    ("Wedstrijd", Role::Competition),
    ("Datum", Role::Date),
    ("Afstand", Role::Distance),
];

/// Rows as (name, rank, competition, date, distance).
fn dataset(rows: &[(&str, &str, &str, &str, &str)]) -> (Dataset, BoundMapping) {
    let ds = Dataset::from_records(rows.iter().map(|(name, rank, comp, date, dist)| {
        let cells = [*name, *rank, *comp, *date, *dist];
        COLUMNS
            .iter()
            .zip(cells)
            .map(|((column, _), value)| (*column, CellValue::from(value)))
            .collect::<Vec<_>>()
    }));
    let mut mapping = Mapping::unresolved();
    for (column, role) in COLUMNS {
        mapping.set(role, Some(column.to_string()));
    }
    let bound = mapping.bind(ds.schema());
    (ds, bound)
}

fn index(ds: &Dataset, mapping: &BoundMapping) -> EventIndex {
    let rows: Vec<&Row> = ds.rows().iter().collect();
    EventIndex::build(&rows, mapping)
}

#[test]
fn shared_event_counts_one_meeting() {
    let (ds, mapping) = dataset(&[
        ("A", "1", "X", "01-01-2020", "500m"),
        ("B", "2", "X", "01-01-2020", "500m"),
    ]);
    let idx = index(&ds, &mapping);

    assert_eq!(meetings_for("A", &["A", "B"], &idx), 1);
    assert_eq!(
        pairwise(&["A", "B"], &idx),
        vec![PairStat {
            a: "A".to_string(),
            b: "B".to_string(),
            meetings: 1,
            a_ahead: 1,
            b_ahead: 0,
            ties: 0,
            unknown: 0,
        }]
    );
}

#[test]
fn missing_rank_is_unknown_not_a_loss() {
    let (ds, mapping) = dataset(&[
        ("A", "1", "X", "01-01-2020", "500m"),
        ("B", "DNF", "X", "01-01-2020", "500m"),
        ("A", "3", "X", "02-01-2020", "500m"),
        ("B", "3", "X", "02-01-2020", "500m"),
        ("A", "4", "Y", "05-01-2020", "1000m"),
        ("B", "2", "Y", "05-01-2020", "1000m"),
    ]);
    let idx = index(&ds, &mapping);
    let stats = pairwise(&["A", "B"], &idx);

    insta::assert_json_snapshot!(stats, @r#"
    [
      {
        "a": "A",
        "b": "B",
        "meetings": 3,
        "aAhead": 0,
        "bAhead": 1,
        "ties": 1,
        "unknown": 1
      }
    ]
    "#);
}

#[test]
fn every_unordered_pair_once() {
    let (ds, mapping) = dataset(&[
        ("A", "1", "X", "01-01-2020", "500m"),
        ("B", "2", "X", "01-01-2020", "500m"),
        ("C", "3", "X", "01-01-2020", "500m"),
    ]);
    let idx = index(&ds, &mapping);
    let pairs: Vec<(String, String)> = pairwise(&["A", "B", "C"], &idx)
        .into_iter()
        .map(|p| (p.a, p.b))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("A".to_string(), "B".to_string()),
            ("A".to_string(), "C".to_string()),
            ("B".to_string(), "C".to_string()),
        ]
    );
}

#[test]
fn compare_builds_metric_table() {
    let (ds, mapping) = dataset(&[
        ("A", "1", "WK Afstanden", "01-01-2020", "500m"),
        ("B", "2", "WK Afstanden", "01-01-2020", "500m"),
        ("A", "2", "World Cup", "08-01-2020", "500m"),
        ("B", "1", "World Cup", "08-01-2020", "500m"),
        ("B", "1", "World Cup", "09-01-2020", "1000m"),
    ]);
    let rows: Vec<&Row> = ds.rows().iter().collect();

    let result = compare(&rows, &mapping, &[" A", "B", "A"], &ComparisonFilter::default());
    assert_eq!(result.competitors.len(), 2);
    assert_eq!(result.events, 3);
    assert_eq!(result.competitors[0].meetings, 2);
    assert_eq!(result.competitors[1].kpi.starts, 3);
    assert_eq!(result.leading(Metric::Wins), vec!["B"]);
    assert_eq!(result.leading(Metric::BestRank), vec!["A", "B"]);
    assert_eq!(result.pairs[0].a_ahead, 1);
    assert_eq!(result.pairs[0].b_ahead, 1);

    let filter = ComparisonFilter {
        competition: Some(" World Cup ".to_string()),
        distance: None,
    };
    let result = compare(&rows, &mapping, &["A", "B"], &filter);
    assert_eq!(result.competitors[0].kpi.starts, 1);
    assert_eq!(result.pairs[0].meetings, 1);
}

#[test]
fn empty_selection_is_empty_result() {
    let (ds, mapping) = dataset(&[("A", "1", "X", "01-01-2020", "500m")]);
    let rows: Vec<&Row> = ds.rows().iter().collect();
    let result = compare::<&str>(&rows, &mapping, &[], &ComparisonFilter::default());
    assert!(result.competitors.is_empty());
    assert!(result.pairs.is_empty());
    assert!(result.leading(Metric::Wins).is_empty());
}

fn row_strategy() -> impl Strategy<Value = (usize, Option<u8>, usize)> {
    (0usize..3, proptest::option::of(1u8..6), 0usize..4)
}

proptest! {
    #[test]
    fn meetings_are_symmetric_and_tallies_add_up(
        entries in proptest::collection::vec(row_strategy(), 0..40)
    ) {
        const NAMES: [&str; 3] = ["A", "B", "C"];
        let rows: Vec<(String, String, String)> = entries
            .iter()
            .map(|(who, rank, event)| {
                (
                    NAMES[*who].to_string(),
                    rank.map(|r| r.to_string()).unwrap_or_default(),
                    format!("0{}-01-2020", event + 1),
                )
            })
            .collect();
        let borrowed: Vec<(&str, &str, &str, &str, &str)> = rows
            .iter()
            .map(|(n, r, d)| (n.as_str(), r.as_str(), "X", d.as_str(), "500m"))
            .collect();
        let (ds, mapping) = dataset(&borrowed);
        let idx = index(&ds, &mapping);

        for (i, a) in NAMES.iter().enumerate() {
            for b in &NAMES[i + 1..] {
                let chosen = [*a, *b];
                let forward = meetings_for(a, &chosen, &idx);
                prop_assert_eq!(forward, meetings_for(b, &chosen, &idx));

                let stats = pairwise(&chosen, &idx);
                prop_assert_eq!(stats.len(), 1);
                let stat = &stats[0];
                prop_assert_eq!(stat.meetings, forward);
                prop_assert_eq!(
                    stat.a_ahead + stat.b_ahead + stat.ties + stat.unknown,
                    stat.meetings
                );
            }
        }
    }
}
