//! Alternate header variants seen in historical exports.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use podium_model::Role;
use serde::{Deserialize, Serialize};

use crate::error::{MapError, Result};

/// Header synonyms per role, tried before the keyword heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymConfig {
    #[serde(default)]
    pub synonyms: BTreeMap<Role, Vec<String>>,
}

impl Default for SynonymConfig {
    fn default() -> Self {
        let defaults: [(Role, &str); 11] = [
            (Role::Competitor, "Naam"),
            (Role::Rank, "Ranking"),
            (Role::Race, "Race"),
            (Role::Country, "Nat."),
            (Role::Competition, "Wedstrijd"),
            (Role::Location, "Locatie"),
            (Role::Distance, "Afstand"),
            (Role::Date, "Datum"),
            (Role::Season, "Seizoen"),
            (Role::Sex, "Sekse"),
            (Role::Winner, "winnaar"),
        ];
        Self {
            synonyms: defaults
                .into_iter()
                .map(|(role, header)| (role, vec![header.to_string()]))
                .collect(),
        }
    }
}

impl SynonymConfig {
    /// A config with no synonyms at all.
    pub fn empty() -> Self {
        Self {
            synonyms: BTreeMap::new(),
        }
    }

    pub fn for_role(&self, role: Role) -> &[String] {
        self.synonyms
            .get(&role)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Replace the synonym list of every role `other` names.
    #[must_use]
    pub fn merged(mut self, other: SynonymConfig) -> Self {
        self.synonyms.extend(other.synonyms);
        self
    }

    /// Load a JSON config and layer it over the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| MapError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let user: SynonymConfig =
            serde_json::from_str(&contents).map_err(|source| MapError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(
            path = %path.display(),
            roles = user.synonyms.len(),
            "loaded header synonyms"
        );
        Ok(Self::default().merged(user))
    }
}
