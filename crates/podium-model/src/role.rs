//! Canonical semantic roles that dataset columns are mapped onto.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Competitor,
    Sex,
    Country,
    Distance,
    Time,
    Rank,
    Date,
    Competition,
    Location,
    Season,
    Race,
    Winner,
}

impl Role {
    pub const ALL: [Role; 12] = [
        Role::Competitor,
        Role::Sex,
        Role::Country,
        Role::Distance,
        Role::Time,
        Role::Rank,
        Role::Date,
        Role::Competition,
        Role::Location,
        Role::Season,
        Role::Race,
        Role::Winner,
    ];

    /// Stable key used in persisted mappings and config files.
    pub fn key(self) -> &'static str {
        match self {
            Role::Competitor => "competitor",
            Role::Sex => "sex",
            Role::Country => "country",
            Role::Distance => "distance",
            Role::Time => "time",
            Role::Rank => "rank",
            Role::Date => "date",
            Role::Competition => "competition",
            Role::Location => "location",
            Role::Season => "season",
            Role::Race => "race",
            Role::Winner => "winner",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Competitor => "Competitor",
            Role::Sex => "Sex",
            Role::Country => "Country / nationality",
            Role::Distance => "Distance",
            Role::Time => "Time",
            Role::Rank => "Rank",
            Role::Date => "Date",
            Role::Competition => "Competition",
            Role::Location => "Location",
            Role::Season => "Season",
            Role::Race => "Race / heat",
            Role::Winner => "Winner",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Role {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Role::ALL
            .into_iter()
            .find(|role| role.key() == key)
            .ok_or_else(|| ModelError::UnknownRole {
                value: s.to_string(),
            })
    }
}
