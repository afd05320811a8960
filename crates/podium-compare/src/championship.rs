//! Competition-type classification for championship statistics.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChampionshipType {
    WorldChampionship,
    Olympics,
    EuropeanChampionship,
}

impl ChampionshipType {
    pub const ALL: [ChampionshipType; 3] = [
        ChampionshipType::WorldChampionship,
        ChampionshipType::Olympics,
        ChampionshipType::EuropeanChampionship,
    ];

    /// Short code used in Dutch result sheets.
    pub fn code(self) -> &'static str {
        match self {
            ChampionshipType::WorldChampionship => "WK",
            ChampionshipType::Olympics => "OS",
            ChampionshipType::EuropeanChampionship => "EK",
        }
    }

    /// Classify competition text.
    ///
    /// Matches English phrases case-insensitively ("World Championships",
    /// "Olympic Games") and the standalone upper-case codes WK, OS and EK.
    pub fn classify(competition: &str) -> Option<Self> {
        let lower = competition.to_lowercase();
        let has_token = |code: &str| {
            competition
                .split(|c: char| !c.is_alphanumeric())
                .any(|token| token == code)
        };
        if (lower.contains("world") && lower.contains("champ")) || has_token("WK") {
            Some(ChampionshipType::WorldChampionship)
        } else if lower.contains("olymp") || has_token("OS") {
            Some(ChampionshipType::Olympics)
        } else if (lower.contains("europe") && lower.contains("champ")) || has_token("EK") {
            Some(ChampionshipType::EuropeanChampionship)
        } else {
            None
        }
    }
}

impl fmt::Display for ChampionshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
