use podium_map::{SynonymConfig, Stage, resolve, resolve_explained};
use podium_model::{PartialMapping, Role};
use proptest::prelude::*;

fn cols(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn dutch_export_resolves_through_synonyms() {
    let columns = cols(&[
        "Naam", "Ranking", "Race", "Nat.", "Opmerking", "Wedstrijd", "Locatie", "Afstand",
        "Datum", "Seizoen", "Sekse", "winnaar",
    ]);
    let report = resolve_explained(&columns, &PartialMapping::new(), &SynonymConfig::default());
    let mapping = report.mapping();

    assert_eq!(mapping.get(Role::Competitor), Some("Naam"));
    assert_eq!(mapping.get(Role::Rank), Some("Ranking"));
    assert_eq!(mapping.get(Role::Country), Some("Nat."));
    assert_eq!(mapping.get(Role::Winner), Some("winnaar"));
    assert_eq!(mapping.get(Role::Time), None);
    assert_eq!(report.unresolved().collect::<Vec<_>>(), vec![Role::Time]);
    assert_eq!(report.get(Role::Season).unwrap().stage, Stage::Synonym);
}

#[test]
fn english_headers_resolve_through_keywords() {
    let columns = cols(&["Athlete", "Gender", "Country", "Event", "Time", "Rank", "Date"]);
    let mapping = resolve(&columns, &PartialMapping::new(), &SynonymConfig::empty());

    assert_eq!(mapping.get(Role::Competitor), Some("Athlete"));
    assert_eq!(mapping.get(Role::Sex), Some("Gender"));
    assert_eq!(mapping.get(Role::Country), Some("Country"));
    assert_eq!(mapping.get(Role::Distance), Some("Event"));
    assert_eq!(mapping.get(Role::Time), Some("Time"));
    assert_eq!(mapping.get(Role::Rank), Some("Rank"));
    assert_eq!(mapping.get(Role::Date), Some("Date"));
    assert_eq!(mapping.get(Role::Season), None);
}

#[test]
fn persisted_binding_wins_over_synonym() {
    let columns = cols(&["Naam", "Schaatser"]);
    let mut persisted = PartialMapping::new();
    persisted.insert(Role::Competitor, "Schaatser");
    let mapping = resolve(&columns, &persisted, &SynonymConfig::default());
    assert_eq!(mapping.get(Role::Competitor), Some("Schaatser"));
}

#[test]
fn empty_columns_leave_everything_unresolved() {
    let mapping = resolve(&[], &PartialMapping::new(), &SynonymConfig::default());
    assert_eq!(mapping.resolved_count(), 0);
}

proptest! {
    #[test]
    fn resolving_twice_is_stable(columns in proptest::collection::vec("[A-Za-z ./]{0,12}", 0..10)) {
        let synonyms = SynonymConfig::default();
        let once = resolve(&columns, &PartialMapping::new(), &synonyms);
        let twice = resolve(&columns, &once.to_partial(), &synonyms);
        prop_assert_eq!(once, twice);
    }
}
