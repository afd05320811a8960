//! Event index: which competitors shared which result instance.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use podium_model::{BoundMapping, Role, Row};
use podium_normalize::to_number;
use serde::Serialize;
use tracing::info;

use crate::distance::DistanceCategory;

/// Identity of one result instance.
///
/// Every field is trimmed and lowercased. The date is compared in its raw
/// string form, so two rows only share an event when their dates match
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EventKey {
    pub competition: String,
    pub location: String,
    pub distance: String,
    pub date: String,
    pub race: String,
    pub sex: String,
    pub season: String,
}

impl EventKey {
    pub fn from_row(row: &Row, mapping: &BoundMapping) -> Self {
        let field = |role| mapping.text(row, role).to_lowercase();
        let distance = DistanceCategory::categorize(&mapping.text(row, Role::Distance));
        Self {
            competition: field(Role::Competition),
            location: field(Role::Location),
            distance: distance.label().to_lowercase(),
            date: field(Role::Date),
            race: field(Role::Race),
            sex: field(Role::Sex),
            season: field(Role::Season),
        }
    }
}

/// Handle to an event inside one [`EventIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(usize);

/// Participation and rank index over a set of rows.
#[derive(Debug, Clone, Default)]
pub struct EventIndex {
    keys: Vec<EventKey>,
    lookup: HashMap<EventKey, EventId>,
    event_competitors: Vec<BTreeSet<String>>,
    event_ranks: Vec<BTreeMap<String, f64>>,
    competitor_events: BTreeMap<String, BTreeSet<EventId>>,
}

impl EventIndex {
    /// Group rows into events. Rows without a competitor name are skipped.
    pub fn build(rows: &[&Row], mapping: &BoundMapping) -> Self {
        let mut index = Self::default();
        for row in rows {
            index.insert(row, mapping);
        }
        info!(
            rows = rows.len(),
            events = index.event_count(),
            competitors = index.competitor_count(),
            "event index built"
        );
        index
    }

    fn insert(&mut self, row: &Row, mapping: &BoundMapping) {
        let name = mapping.text(row, Role::Competitor);
        if name.is_empty() {
            return;
        }
        let id = self.event_id(EventKey::from_row(row, mapping));

        self.event_competitors[id.0].insert(name.to_string());
        self.competitor_events
            .entry(name.to_string())
            .or_default()
            .insert(id);

        // Duplicate heat rows keep the best (lowest) rank.
        if let Some(rank) = to_number(mapping.cell(row, Role::Rank)) {
            self.event_ranks[id.0]
                .entry(name.into_owned())
                .and_modify(|best| *best = best.min(rank))
                .or_insert(rank);
        }
    }

    fn event_id(&mut self, key: EventKey) -> EventId {
        if let Some(id) = self.lookup.get(&key) {
            return *id;
        }
        let id = EventId(self.keys.len());
        self.lookup.insert(key.clone(), id);
        self.keys.push(key);
        self.event_competitors.push(BTreeSet::new());
        self.event_ranks.push(BTreeMap::new());
        id
    }

    pub fn event_count(&self) -> usize {
        self.keys.len()
    }

    pub fn competitor_count(&self) -> usize {
        self.competitor_events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn key(&self, id: EventId) -> Option<&EventKey> {
        self.keys.get(id.0)
    }

    pub fn find(&self, key: &EventKey) -> Option<EventId> {
        self.lookup.get(key).copied()
    }

    /// Events `name` took part in.
    pub fn events_of(&self, name: &str) -> Option<&BTreeSet<EventId>> {
        self.competitor_events.get(name)
    }

    /// Competitors present in an event.
    pub fn competitors(&self, id: EventId) -> Option<&BTreeSet<String>> {
        self.event_competitors.get(id.0)
    }

    /// Best rank `name` recorded in an event, if any was numeric.
    pub fn rank(&self, id: EventId, name: &str) -> Option<f64> {
        self.event_ranks.get(id.0)?.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use podium_model::{CellValue, Dataset, Mapping};

    use super::*;

    fn dataset(rows: &[(&str, &str, &str, &str)]) -> (Dataset, BoundMapping) {
        let ds = Dataset::from_records(rows.iter().map(|(name, rank, dist, date)| {
            vec![
                ("Naam", CellValue::from(*name)),
                ("Ranking", CellValue::from(*rank)),
                ("Afstand", CellValue::from(*dist)),
                ("Datum", CellValue::from(*date)),
            ]
        }));
        let mut mapping = Mapping::unresolved();
        mapping.set(Role::Competitor, Some("Naam".into()));
        mapping.set(Role::Rank, Some("Ranking".into()));
        mapping.set(Role::Distance, Some("Afstand".into()));
        mapping.set(Role::Date, Some("Datum".into()));
        let bound = mapping.bind(ds.schema());
        (ds, bound)
    }

    #[test]
    fn duplicate_rows_keep_lowest_rank() {
        let (ds, mapping) = dataset(&[
            ("A", "4", "500m", "01-01-2020"),
            ("A", "2", "500 m", "01-01-2020"),
            ("A", "x", "500m", "01-01-2020"),
        ]);
        let rows: Vec<&Row> = ds.rows().iter().collect();
        let index = EventIndex::build(&rows, &mapping);
        assert_eq!(index.event_count(), 1);
        let id = *index.events_of("A").unwrap().first().unwrap();
        assert_eq!(index.rank(id, "A"), Some(2.0));
    }

    #[test]
    fn dates_must_match_verbatim() {
        let (ds, mapping) = dataset(&[
            ("A", "1", "500m", "01-01-2020"),
            ("B", "2", "500m", "1-1-2020"),
        ]);
        let rows: Vec<&Row> = ds.rows().iter().collect();
        let index = EventIndex::build(&rows, &mapping);
        assert_eq!(index.event_count(), 2);
    }

    #[test]
    fn keys_are_case_folded_and_blank_names_skipped() {
        let (ds, mapping) = dataset(&[
            (" A ", "1", "Mass Start", "01-01-2020"),
            ("B", "2", "mass start ", "01-01-2020"),
            ("  ", "3", "mass start", "01-01-2020"),
        ]);
        let rows: Vec<&Row> = ds.rows().iter().collect();
        let index = EventIndex::build(&rows, &mapping);
        assert_eq!(index.event_count(), 1);
        assert_eq!(index.competitor_count(), 2);
        let id = *index.events_of("A").unwrap().first().unwrap();
        assert_eq!(index.competitors(id).unwrap().len(), 2);
        assert_eq!(index.key(id).unwrap().distance, "mass start");
    }
}
