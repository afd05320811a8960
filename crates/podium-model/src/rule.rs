//! Filter rules consumed by the query evaluator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// How a rule combines with the accumulated result of the rules before it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Logic {
    #[default]
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Contains,
    Equals,
    Starts,
    Ends,
    Gt,
    Gte,
    Lt,
    Lte,
    Between,
    Empty,
    NotEmpty,
}

impl Operator {
    pub const ALL: [Operator; 11] = [
        Operator::Contains,
        Operator::Equals,
        Operator::Starts,
        Operator::Ends,
        Operator::Gt,
        Operator::Gte,
        Operator::Lt,
        Operator::Lte,
        Operator::Between,
        Operator::Empty,
        Operator::NotEmpty,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Contains => "contains",
            Operator::Equals => "equals",
            Operator::Starts => "starts",
            Operator::Ends => "ends",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::Between => "between",
            Operator::Empty => "empty",
            Operator::NotEmpty => "notempty",
        }
    }

    /// Whether the operator reads the rule's value at all.
    pub fn takes_value(self) -> bool {
        !matches!(self, Operator::Empty | Operator::NotEmpty)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Operator::ALL
            .into_iter()
            .find(|op| op.as_str() == key)
            .ok_or_else(|| ModelError::UnknownOperator {
                value: s.to_string(),
            })
    }
}

/// One filter predicate plus the logic joining it to the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(default)]
    pub logic: Logic,
    pub column: String,
    pub operator: Operator,
    #[serde(default)]
    pub value: String,
}

impl Rule {
    pub fn new(column: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            logic: Logic::And,
            column: column.into(),
            operator,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn with_logic(mut self, logic: Logic) -> Self {
        self.logic = logic;
        self
    }
}

/// Compact form `[and|or:]column:operator[:value]`.
///
/// The operator is the first segment after the column that names a known
/// operator, so both column names and values may contain `:` (a time like
/// `1:02.345` stays intact).
impl FromStr for Rule {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| ModelError::InvalidRule {
            input: s.to_string(),
            reason,
        };
        let parts: Vec<&str> = s.split(':').collect();

        let (logic, start) = match parts.first().map(|p| p.trim().to_lowercase()) {
            Some(p) if p == "and" && parts.len() >= 3 => (Logic::And, 1),
            Some(p) if p == "or" && parts.len() >= 3 => (Logic::Or, 1),
            _ => (Logic::And, 0),
        };

        let (op_pos, operator) = parts
            .iter()
            .enumerate()
            .skip(start + 1)
            .find_map(|(i, part)| part.parse::<Operator>().ok().map(|op| (i, op)))
            .ok_or_else(|| invalid("expected column:operator[:value]"))?;

        let column = parts[start..op_pos].join(":");
        if column.trim().is_empty() {
            return Err(invalid("column name is empty"));
        }
        let value = parts[op_pos + 1..].join(":");

        Ok(Self {
            logic,
            column,
            operator,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_compact_rule() {
        let rule: Rule = "Ranking:lte:3".parse().unwrap();
        assert_eq!(rule, Rule::new("Ranking", Operator::Lte, "3"));

        let rule: Rule = "or:Naam:contains:jan".parse().unwrap();
        assert_eq!(rule.logic, Logic::Or);
        assert_eq!(rule.column, "Naam");
    }

    #[test]
    fn parse_keeps_colons_in_value() {
        let rule: Rule = "Tijd:lt:1:02.345".parse().unwrap();
        assert_eq!(rule.operator, Operator::Lt);
        assert_eq!(rule.value, "1:02.345");
    }

    #[test]
    fn parse_operator_without_value() {
        let rule: Rule = "Opmerking:notempty".parse().unwrap();
        assert_eq!(rule.operator, Operator::NotEmpty);
        assert_eq!(rule.value, "");
    }

    #[test]
    fn parse_rejects_missing_operator() {
        assert!("Naam:like:x".parse::<Rule>().is_err());
        assert!(":gt:3".parse::<Rule>().is_err());
    }

    #[test]
    fn json_defaults_logic_and_value() {
        let rule: Rule = serde_json::from_str(r#"{"column":"x","operator":"empty"}"#).unwrap();
        assert_eq!(rule.logic, Logic::And);
        assert_eq!(rule.value, "");
        let rule: Rule =
            serde_json::from_str(r#"{"logic":"or","column":"y","operator":"notempty"}"#).unwrap();
        assert_eq!(rule.logic, Logic::Or);
    }
}
