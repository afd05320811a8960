//! Rank-based KPIs for a competitor or a row subset.
//!
//! Unparseable ranks are excluded before reducing; they still count as starts.

use std::collections::BTreeMap;

use podium_model::{BoundMapping, Role, Row};
use podium_normalize::to_number;
use serde::Serialize;

use crate::championship::ChampionshipType;

/// Medals won at one championship type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MedalTally {
    pub gold: usize,
    pub silver: usize,
    pub bronze: usize,
}

impl MedalTally {
    pub fn total(&self) -> usize {
        self.gold + self.silver + self.bronze
    }

    fn record(&mut self, rank: f64) {
        if rank == 1.0 {
            self.gold += 1;
        } else if rank == 2.0 {
            self.silver += 1;
        } else if rank == 3.0 {
            self.bronze += 1;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Kpi {
    pub starts: usize,
    pub wins: usize,
    pub podiums: usize,
    pub avg_rank: Option<f64>,
    pub best_rank: Option<f64>,
    /// Only filled when the competition role is mapped.
    pub medals: BTreeMap<ChampionshipType, MedalTally>,
}

/// Numeric rank of a row.
pub fn rank_of(row: &Row, mapping: &BoundMapping) -> Option<f64> {
    to_number(mapping.cell(row, Role::Rank))
}

/// Rows whose trimmed competitor name equals `name` (trimmed).
pub fn rows_for<'r>(name: &str, rows: &[&'r Row], mapping: &BoundMapping) -> Vec<&'r Row> {
    let name = name.trim();
    rows.iter()
        .copied()
        .filter(|row| mapping.text(row, Role::Competitor) == name)
        .collect()
}

/// KPIs for one competitor over `rows`.
pub fn aggregate(name: &str, rows: &[&Row], mapping: &BoundMapping) -> Kpi {
    aggregate_rows(&rows_for(name, rows, mapping), mapping)
}

/// KPIs over every row given, regardless of competitor.
pub fn aggregate_rows(rows: &[&Row], mapping: &BoundMapping) -> Kpi {
    let ranks: Vec<f64> = rows.iter().filter_map(|row| rank_of(row, mapping)).collect();

    let mut kpi = Kpi {
        starts: rows.len(),
        wins: ranks.iter().filter(|r| **r == 1.0).count(),
        podiums: ranks.iter().filter(|r| **r <= 3.0).count(),
        avg_rank: mean(&ranks),
        best_rank: ranks.iter().copied().reduce(f64::min),
        medals: BTreeMap::new(),
    };

    if mapping.has(Role::Competition) {
        for row in rows {
            let Some(rank) = rank_of(row, mapping) else {
                continue;
            };
            if let Some(kind) = ChampionshipType::classify(&mapping.text(row, Role::Competition))
                && (1.0..=3.0).contains(&rank)
            {
                kpi.medals.entry(kind).or_default().record(rank);
            }
        }
    }
    kpi
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
