//! Role resolution with a fallback chain.
//!
//! For every role the first stage that yields a column wins:
//! 1. persisted binding, exact
//! 2. persisted binding, trimmed and case-insensitive
//! 3. configured header synonyms
//! 4. keyword heuristic (substring of the normalized header)
//!
//! Resolution never fails; a role no stage can bind stays unresolved.

use std::fmt;

use podium_model::{Mapping, PartialMapping, Role};
use serde::Serialize;
use tracing::{debug, info};

use crate::patterns::role_keywords;
use crate::synonyms::SynonymConfig;
use crate::utils::{find_case_insensitive, normalize_header};

/// The stage that produced a role's binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Persisted,
    CaseInsensitive,
    Synonym,
    Heuristic,
    Unresolved,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Stage::Persisted => "persisted",
            Stage::CaseInsensitive => "persisted (case-insensitive)",
            Stage::Synonym => "header synonym",
            Stage::Heuristic => "keyword heuristic",
            Stage::Unresolved => "unresolved",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How one role was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub role: Role,
    pub column: Option<String>,
    pub stage: Stage,
    /// Synonym or keyword that matched, for the synonym and heuristic stages.
    pub matched: Option<String>,
}

impl Resolution {
    /// Human-readable explanation of the binding.
    pub fn explain(&self) -> String {
        match (&self.column, &self.matched) {
            (Some(col), Some(matched)) => format!("{col} ({}: '{matched}')", self.stage),
            (Some(col), None) => format!("{col} ({})", self.stage),
            (None, _) => self.stage.label().to_string(),
        }
    }
}

/// Per-role resolution details, in canonical role order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingReport {
    pub resolutions: Vec<Resolution>,
}

impl MappingReport {
    pub fn mapping(&self) -> Mapping {
        let mut mapping = Mapping::unresolved();
        for res in &self.resolutions {
            mapping.set(res.role, res.column.clone());
        }
        mapping
    }

    pub fn get(&self, role: Role) -> Option<&Resolution> {
        self.resolutions.iter().find(|r| r.role == role)
    }

    pub fn unresolved(&self) -> impl Iterator<Item = Role> + '_ {
        self.resolutions
            .iter()
            .filter(|r| r.column.is_none())
            .map(|r| r.role)
    }
}

/// Resolve every role against `columns`.
pub fn resolve(columns: &[String], persisted: &PartialMapping, synonyms: &SynonymConfig) -> Mapping {
    resolve_explained(columns, persisted, synonyms).mapping()
}

/// Resolve every role and keep the stage that bound it.
pub fn resolve_explained(
    columns: &[String],
    persisted: &PartialMapping,
    synonyms: &SynonymConfig,
) -> MappingReport {
    let resolutions: Vec<Resolution> = Role::ALL
        .into_iter()
        .map(|role| {
            let res = resolve_role(role, columns, persisted.get(role), synonyms.for_role(role));
            debug!(
                role = role.key(),
                column = res.column.as_deref().unwrap_or("-"),
                stage = res.stage.label(),
                "role resolved"
            );
            res
        })
        .collect();

    let resolved = resolutions.iter().filter(|r| r.column.is_some()).count();
    info!(
        columns = columns.len(),
        resolved,
        unresolved = resolutions.len() - resolved,
        "column mapping resolved"
    );
    MappingReport { resolutions }
}

fn resolve_role(
    role: Role,
    columns: &[String],
    persisted: Option<&str>,
    synonyms: &[String],
) -> Resolution {
    let found = |column: &str, stage: Stage, matched: Option<&str>| Resolution {
        role,
        column: Some(column.to_string()),
        stage,
        matched: matched.map(str::to_string),
    };

    if let Some(persisted) = persisted {
        if columns.iter().any(|c| c == persisted) {
            return found(persisted, Stage::Persisted, None);
        }
        if let Some(column) = find_case_insensitive(columns, persisted) {
            return found(column, Stage::CaseInsensitive, None);
        }
        debug!(role = role.key(), persisted, "persisted binding is stale");
    }

    if let Some(synonym) = synonyms.iter().find(|s| columns.contains(s)) {
        return found(synonym, Stage::Synonym, Some(synonym));
    }
    for synonym in synonyms {
        if let Some(column) = find_case_insensitive(columns, synonym) {
            return found(column, Stage::Synonym, Some(synonym));
        }
    }

    if let Some((column, keyword)) = guess_column(role, columns) {
        return found(column, Stage::Heuristic, Some(keyword));
    }

    Resolution {
        role,
        column: None,
        stage: Stage::Unresolved,
        matched: None,
    }
}

/// Keyword heuristic: the first keyword with any match decides, and among
/// its matches the first column wins.
pub fn guess_column(role: Role, columns: &[String]) -> Option<(&str, &'static str)> {
    let normalized: Vec<String> = columns.iter().map(|c| normalize_header(c)).collect();
    role_keywords(role).iter().find_map(|keyword| {
        normalized
            .iter()
            .position(|c| c.contains(keyword))
            .map(|idx| (columns[idx].as_str(), *keyword))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn keyword_order_beats_column_order() {
        // "rider" comes before "name" in the competitor keywords
        let columns = cols(&["Team name", "Rider"]);
        assert_eq!(
            guess_column(Role::Competitor, &columns),
            Some(("Rider", "rider"))
        );
    }

    #[test]
    fn first_column_wins_within_a_keyword() {
        let columns = cols(&["Start date", "Date of birth"]);
        assert_eq!(
            guess_column(Role::Date, &columns),
            Some(("Start date", "date"))
        );
    }

    #[test]
    fn stale_persisted_binding_falls_through() {
        let columns = cols(&["Naam", "Pos"]);
        let mut persisted = PartialMapping::new();
        persisted.insert(Role::Rank, "Ranking");
        let report = resolve_explained(&columns, &persisted, &SynonymConfig::default());
        let rank = report.get(Role::Rank).unwrap();
        assert_eq!(rank.column.as_deref(), Some("Pos"));
        assert_eq!(rank.stage, Stage::Heuristic);
    }

    #[test]
    fn persisted_binding_matches_case_insensitively() {
        let columns = cols(&["RANKING"]);
        let mut persisted = PartialMapping::new();
        persisted.insert(Role::Rank, " ranking");
        let report = resolve_explained(&columns, &persisted, &SynonymConfig::empty());
        let rank = report.get(Role::Rank).unwrap();
        assert_eq!(rank.column.as_deref(), Some("RANKING"));
        assert_eq!(rank.stage, Stage::CaseInsensitive);
    }

    #[test]
    fn explain_mentions_stage() {
        let columns = cols(&["Afstand"]);
        let report = resolve_explained(&columns, &PartialMapping::new(), &SynonymConfig::default());
        assert_eq!(
            report.get(Role::Distance).unwrap().explain(),
            "Afstand (header synonym: 'Afstand')"
        );
        assert_eq!(report.get(Role::Winner).unwrap().explain(), "unresolved");
    }
}
