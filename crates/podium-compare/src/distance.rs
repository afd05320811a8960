//! Distance categories used to decide whether two results are comparable.

use std::fmt;

use serde::{Serialize, Serializer};

/// Canonical distance bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DistanceCategory {
    M500,
    M1000,
    M1500,
    M3000,
    M5000,
    M10000,
    Relay,
    FinalClassification,
    /// Unrecognized text, trimmed.
    Other(String),
}

/// Substring patterns in match order. Longer distances come first so that
/// `"1500m"` is not read as 500m and `"5000m relay"` is a relay.
const PATTERNS: [(&str, DistanceCategory); 12] = [
    ("relay", DistanceCategory::Relay),
    ("aflossing", DistanceCategory::Relay),
    ("klassement", DistanceCategory::FinalClassification),
    ("classification", DistanceCategory::FinalClassification),
    ("overall", DistanceCategory::FinalClassification),
    ("allround", DistanceCategory::FinalClassification),
    ("10000", DistanceCategory::M10000),
    ("5000", DistanceCategory::M5000),
    ("3000", DistanceCategory::M3000),
    ("1500", DistanceCategory::M1500),
    ("1000", DistanceCategory::M1000),
    ("500", DistanceCategory::M500),
];

impl DistanceCategory {
    pub fn categorize(raw: &str) -> Self {
        let trimmed = raw.trim();
        // "1.500 m" and "1 500m" both read as 1500m
        let compact: String = trimmed
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '.')
            .collect();
        PATTERNS
            .iter()
            .find(|(pattern, _)| compact.contains(pattern))
            .map_or_else(
                || DistanceCategory::Other(trimmed.to_string()),
                |(_, category)| category.clone(),
            )
    }

    pub fn label(&self) -> &str {
        match self {
            DistanceCategory::M500 => "500m",
            DistanceCategory::M1000 => "1000m",
            DistanceCategory::M1500 => "1500m",
            DistanceCategory::M3000 => "3000m",
            DistanceCategory::M5000 => "5000m",
            DistanceCategory::M10000 => "10000m",
            DistanceCategory::Relay => "relay",
            DistanceCategory::FinalClassification => "final classification",
            DistanceCategory::Other(raw) => raw,
        }
    }
}

impl fmt::Display for DistanceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for DistanceCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
