//! Champions: the rank-1 results of championship competitions.

use std::str::FromStr;

use podium_model::{BoundMapping, Role, Row};
use serde::Serialize;
use tracing::info;

use crate::championship::ChampionshipType;
use crate::kpi::rank_of;

/// Which competitions contribute champions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ChampionSelection {
    /// Every competition the classifier recognizes.
    #[default]
    Auto,
    /// One competition, matched on its exact trimmed text.
    Competition(String),
}

impl ChampionSelection {
    fn accepts(&self, competition: &str) -> bool {
        match self {
            ChampionSelection::Auto => ChampionshipType::classify(competition).is_some(),
            ChampionSelection::Competition(wanted) => competition == wanted.trim(),
        }
    }
}

impl FromStr for ChampionSelection {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("auto") {
            Ok(ChampionSelection::Auto)
        } else {
            Ok(ChampionSelection::Competition(s.to_string()))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Champion {
    pub competition: String,
    pub season: String,
    pub distance: String,
    pub kind: Option<ChampionshipType>,
    pub winner: String,
}

/// One entry per (competition, season, distance), in first-seen order.
///
/// The winner column is preferred; the competitor column is the fallback.
pub fn champions(
    rows: &[&Row],
    mapping: &BoundMapping,
    selection: &ChampionSelection,
) -> Vec<Champion> {
    let mut found: Vec<Champion> = Vec::new();
    for row in rows {
        let competition = mapping.text(row, Role::Competition);
        if !selection.accepts(&competition) || rank_of(row, mapping) != Some(1.0) {
            continue;
        }
        let season = mapping.text(row, Role::Season);
        let distance = mapping.text(row, Role::Distance);
        let seen = found.iter().any(|c| {
            c.competition == competition && c.season == season && c.distance == distance
        });
        if seen {
            continue;
        }

        let winner = mapping.text(row, Role::Winner);
        let winner = if winner.is_empty() {
            mapping.text(row, Role::Competitor)
        } else {
            winner
        };
        found.push(Champion {
            kind: ChampionshipType::classify(&competition),
            competition: competition.into_owned(),
            season: season.into_owned(),
            distance: distance.into_owned(),
            winner: winner.into_owned(),
        });
    }
    info!(champions = found.len(), "champions listed");
    found
}
