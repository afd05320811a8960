//! Dataset-level summary counts.

use std::collections::BTreeSet;

use podium_model::{BoundMapping, Role, Row};
use podium_normalize::{display_year, extract_season_years};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetOverview {
    pub rows: usize,
    pub competitors: usize,
    pub seasons: usize,
    pub distances: usize,
    pub first_season: Option<i32>,
    pub last_season: Option<i32>,
}

/// Row and distinct-value counts. The season span runs from the earliest
/// year any season names to the latest display year.
pub fn overview(rows: &[&Row], mapping: &BoundMapping) -> DatasetOverview {
    let distinct = |role: Role| {
        rows.iter()
            .map(|row| mapping.text(row, role))
            .filter(|v| !v.is_empty())
            .collect::<BTreeSet<_>>()
            .len()
    };

    let mut first_season: Option<i32> = None;
    let mut last_season: Option<i32> = None;
    if mapping.has(Role::Season) {
        for row in rows {
            let cell = mapping.cell(row, Role::Season);
            if let Some(first) = extract_season_years(cell).first() {
                first_season = Some(first_season.map_or(*first, |y| y.min(*first)));
            }
            last_season = last_season.max(display_year(cell));
        }
    }

    DatasetOverview {
        rows: rows.len(),
        competitors: distinct(Role::Competitor),
        seasons: distinct(Role::Season),
        distances: distinct(Role::Distance),
        first_season,
        last_season,
    }
}
