//! Dashboard facets: exact-value filters and their option lists.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Datelike;
use podium_model::{BoundMapping, CellValue, Role, Row};
use podium_normalize::parse_date;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Facet {
    Competition,
    Location,
    Distance,
    Sex,
    Season,
    Winner,
    Country,
    Competitor,
}

impl Facet {
    pub const ALL: [Facet; 8] = [
        Facet::Competition,
        Facet::Location,
        Facet::Distance,
        Facet::Sex,
        Facet::Season,
        Facet::Winner,
        Facet::Country,
        Facet::Competitor,
    ];

    pub fn role(self) -> Role {
        match self {
            Facet::Competition => Role::Competition,
            Facet::Location => Role::Location,
            Facet::Distance => Role::Distance,
            Facet::Sex => Role::Sex,
            Facet::Season => Role::Season,
            Facet::Winner => Role::Winner,
            Facet::Country => Role::Country,
            Facet::Competitor => Role::Competitor,
        }
    }
}

/// Year of a date cell, used by the year facet.
pub fn parse_year(cell: &CellValue) -> Option<i32> {
    parse_date(cell).map(|dt| dt.year())
}

/// Conjunction of exact (trimmed, case-sensitive) facet constraints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetFilter {
    pub year: Option<i32>,
    values: BTreeMap<Facet, String>,
}

impl FacetFilter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_year(mut self, year: Option<i32>) -> Self {
        self.year = year;
        self
    }

    /// Constrain `facet` to `value`. Blank values clear the constraint.
    #[must_use]
    pub fn with(mut self, facet: Facet, value: Option<&str>) -> Self {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => {
                self.values.insert(facet, v.to_string());
            }
            None => {
                self.values.remove(&facet);
            }
        }
        self
    }

    pub fn get(&self, facet: Facet) -> Option<&str> {
        self.values.get(&facet).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.values.is_empty()
    }

    pub fn accepts(&self, row: &Row, mapping: &BoundMapping) -> bool {
        if let Some(year) = self.year
            && parse_year(mapping.cell(row, Role::Date)) != Some(year)
        {
            return false;
        }
        self.values
            .iter()
            .all(|(facet, wanted)| mapping.text(row, facet.role()) == wanted.as_str())
    }

    pub fn apply<'r>(&self, rows: &[&'r Row], mapping: &BoundMapping) -> Vec<&'r Row> {
        rows.iter()
            .copied()
            .filter(|row| self.accepts(row, mapping))
            .collect()
    }
}

/// Selectable values per facet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacetOptions {
    pub years: Vec<i32>,
    pub values: BTreeMap<Facet, Vec<String>>,
}

/// Sorted distinct non-empty values of every facet, plus the years present.
pub fn facet_options(rows: &[&Row], mapping: &BoundMapping) -> FacetOptions {
    let years: BTreeSet<i32> = rows
        .iter()
        .filter_map(|row| parse_year(mapping.cell(row, Role::Date)))
        .collect();

    let values = Facet::ALL
        .into_iter()
        .filter(|facet| mapping.has(facet.role()))
        .map(|facet| {
            let distinct: BTreeSet<String> = rows
                .iter()
                .map(|row| mapping.text(row, facet.role()).into_owned())
                .filter(|v| !v.is_empty())
                .collect();
            let mut sorted: Vec<String> = distinct.into_iter().collect();
            sorted.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then(a.cmp(b)));
            (facet, sorted)
        })
        .collect();

    FacetOptions {
        years: years.into_iter().collect(),
        values,
    }
}
