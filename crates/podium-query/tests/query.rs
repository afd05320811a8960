use podium_model::{CellValue, Dataset, Logic, Operator, Rule};
use podium_query::{Query, run};
use proptest::prelude::*;

fn results() -> Dataset {
    let rows = [
        ("Jorien ter Mors", "1", "1:15.003", "WK Afstanden"),
        ("Ireen Wüst", "2", "1:15,410", "WK Afstanden"),
        ("Sven Kramer", "", "6:03.320", "EK Allround"),
        ("Kjeld Nuis", "DSQ", "", "Olympische Spelen"),
    ];
    Dataset::from_records(rows.iter().map(|(name, rank, time, comp)| {
        vec![
            ("Naam", CellValue::from(*name)),
            ("Ranking", CellValue::from(*rank)),
            ("Tijd", CellValue::from(*time)),
            ("Wedstrijd", CellValue::from(*comp)),
        ]
    }))
}

fn names(rows: &[&podium_model::Row]) -> Vec<String> {
    rows.iter().map(|r| r.cells()[0].to_string()).collect()
}

#[test]
fn empty_rule_set_keeps_every_row() {
    let ds = results();
    let kept = run(&[], &ds);
    assert_eq!(kept.len(), ds.height());
    assert!(kept.iter().zip(ds.rows()).all(|(a, b)| std::ptr::eq(*a, b)));
}

#[test]
fn time_column_compares_in_seconds() {
    let ds = results();
    let rules = vec![Rule::new("Tijd", Operator::Lt, "75,2")];
    assert_eq!(names(&run(&rules, &ds)), vec!["Jorien ter Mors"]);
}

#[test]
fn rank_filters_skip_unparseable_cells() {
    let ds = results();
    let rules = vec![Rule::new("Ranking", Operator::Lte, "3")];
    assert_eq!(
        names(&run(&rules, &ds)),
        vec!["Jorien ter Mors", "Ireen Wüst"]
    );
}

#[test]
fn mixed_chain_from_json() {
    let ds = results();
    let rules: Vec<Rule> = serde_json::from_str(
        r#"[
            {"column":"Wedstrijd","operator":"starts","value":"wk"},
            {"logic":"or","column":"Wedstrijd","operator":"contains","value":"olymp"},
            {"column":"Ranking","operator":"notempty"}
        ]"#,
    )
    .unwrap();
    assert_eq!(
        names(&run(&rules, &ds)),
        vec!["Jorien ter Mors", "Ireen Wüst", "Kjeld Nuis"]
    );
}

#[test]
fn left_fold_scenario() {
    let ds = Dataset::from_records(vec![vec![
        ("x", CellValue::from(3.0)),
        ("y", CellValue::from("z")),
    ]]);
    let rules = vec![
        Rule::new("x", Operator::Gt, "5"),
        Rule::new("y", Operator::Equals, "z").with_logic(Logic::Or),
    ];
    let query = Query::compile(&rules, ds.schema());
    assert!(query.matches(&ds.rows()[0]));
}

proptest! {
    #[test]
    fn between_is_inclusive_range(x in -100.0f64..100.0) {
        let ds = Dataset::from_records(vec![vec![("v", CellValue::from(x))]]);
        let in_range = run(&[Rule::new("v", Operator::Between, "10..20")], &ds).len() == 1;
        prop_assert_eq!(in_range, (10.0..=20.0).contains(&x));

        let no_range = run(&[Rule::new("v", Operator::Between, "10")], &ds);
        prop_assert!(no_range.is_empty());
    }
}
