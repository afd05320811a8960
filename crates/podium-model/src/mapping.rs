//! Role to column bindings.
//!
//! [`PartialMapping`] is the flat record the persistence collaborator keeps.
//! [`Mapping`] is the resolved form, with every role present and possibly
//! unresolved. [`BoundMapping`] pins a resolved mapping to a concrete
//! [`Schema`] so rows can be read by role without name lookups.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::role::Role;
use crate::table::{ColumnId, Row, Schema};
use crate::value::CellValue;

/// Persisted `role -> column name` record. Roles may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartialMapping(BTreeMap<Role, String>);

impl PartialMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, role: Role) -> Option<&str> {
        self.0.get(&role).map(String::as_str)
    }

    pub fn insert(&mut self, role: Role, column: impl Into<String>) {
        self.0.insert(role, column.into());
    }

    pub fn remove(&mut self, role: Role) -> Option<String> {
        self.0.remove(&role)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, &str)> + '_ {
        self.0.iter().map(|(role, col)| (*role, col.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Role, String)> for PartialMapping {
    fn from_iter<T: IntoIterator<Item = (Role, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Resolved mapping: every role is bound to a column name or unresolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mapping(BTreeMap<Role, Option<String>>);

impl Default for Mapping {
    fn default() -> Self {
        Self(Role::ALL.into_iter().map(|role| (role, None)).collect())
    }
}

impl Mapping {
    /// A mapping with every role unresolved.
    pub fn unresolved() -> Self {
        Self::default()
    }

    pub fn get(&self, role: Role) -> Option<&str> {
        self.0.get(&role).and_then(Option::as_deref)
    }

    pub fn set(&mut self, role: Role, column: Option<String>) {
        self.0.insert(role, column);
    }

    /// All roles in canonical order with their binding.
    pub fn iter(&self) -> impl Iterator<Item = (Role, Option<&str>)> + '_ {
        Role::ALL.into_iter().map(|role| (role, self.get(role)))
    }

    /// Roles in `required` that are unresolved.
    pub fn missing(&self, required: &[Role]) -> Vec<Role> {
        required
            .iter()
            .copied()
            .filter(|role| self.get(*role).is_none())
            .collect()
    }

    pub fn resolved_count(&self) -> usize {
        self.iter().filter(|(_, col)| col.is_some()).count()
    }

    /// Resolved bindings only, in persisted form.
    pub fn to_partial(&self) -> PartialMapping {
        self.iter()
            .filter_map(|(role, col)| col.map(|c| (role, c.to_string())))
            .collect()
    }

    /// Pin this mapping to `schema`.
    ///
    /// Bindings naming a column outside the schema are dropped, so a stale
    /// mapping degrades to unresolved roles instead of failing.
    pub fn bind(&self, schema: &Schema) -> BoundMapping {
        let ids = self
            .iter()
            .filter_map(|(role, col)| col.and_then(|c| schema.find(c)).map(|id| (role, id)))
            .collect();
        BoundMapping { ids }
    }
}

/// A mapping resolved against a concrete schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundMapping {
    ids: BTreeMap<Role, ColumnId>,
}

impl BoundMapping {
    pub fn column(&self, role: Role) -> Option<ColumnId> {
        self.ids.get(&role).copied()
    }

    pub fn has(&self, role: Role) -> bool {
        self.ids.contains_key(&role)
    }

    /// Cell for `role`; unbound roles read as empty.
    pub fn cell<'r>(&self, row: &'r Row, role: Role) -> &'r CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        match self.column(role) {
            Some(id) => row.get(id),
            None => &EMPTY,
        }
    }

    /// Trimmed raw string for `role`.
    pub fn text<'r>(&self, row: &'r Row, role: Role) -> Cow<'r, str> {
        self.cell(row, role).trimmed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mapping_lists_every_role() {
        let mapping = Mapping::unresolved();
        assert_eq!(mapping.iter().count(), Role::ALL.len());
        assert_eq!(mapping.resolved_count(), 0);
        assert_eq!(mapping.missing(&[Role::Rank]), vec![Role::Rank]);
    }

    #[test]
    fn bind_drops_stale_columns() {
        let schema = Schema::new(["Naam", "Ranking"]);
        let mut mapping = Mapping::unresolved();
        mapping.set(Role::Competitor, Some("Naam".to_string()));
        mapping.set(Role::Rank, Some("Rank".to_string()));

        let bound = mapping.bind(&schema);
        assert!(bound.has(Role::Competitor));
        assert!(!bound.has(Role::Rank));
    }

    #[test]
    fn partial_round_trips_through_json() {
        let mut partial = PartialMapping::new();
        partial.insert(Role::Rank, "Ranking");
        let json = serde_json::to_string(&partial).unwrap();
        assert_eq!(json, r#"{"rank":"Ranking"}"#);
        let back: PartialMapping = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get(Role::Rank), Some("Ranking"));
    }

    #[test]
    fn to_partial_keeps_resolved_roles() {
        let mut mapping = Mapping::unresolved();
        mapping.set(Role::Date, Some("Datum".to_string()));
        let partial = mapping.to_partial();
        assert_eq!(partial.len(), 1);
        assert_eq!(partial.get(Role::Date), Some("Datum"));
    }
}
