//! Rule chains.
//!
//! A chain is a strict left fold: the first rule seeds the result and each
//! following rule combines with everything before it (`ok = ok OR pass` or
//! `ok = ok AND pass`). There is no precedence or grouping, so
//! `a OR b AND c` means `(a OR b) AND c`.

use podium_model::{ColumnId, Dataset, Logic, Operator, Row, Rule, Schema};
use tracing::{debug, info};

use crate::predicate::test_cell;

#[derive(Debug, Clone)]
struct CompiledRule {
    logic: Logic,
    column: Option<ColumnId>,
    operator: Operator,
    value: String,
}

/// A rule chain resolved against one schema.
///
/// Rules naming a column outside the schema stay in the chain and always
/// evaluate to false.
#[derive(Debug, Clone)]
pub struct Query {
    rules: Vec<CompiledRule>,
}

impl Query {
    pub fn compile(rules: &[Rule], schema: &Schema) -> Self {
        let rules = rules
            .iter()
            .map(|rule| {
                let column = schema.find(&rule.column);
                if column.is_none() {
                    debug!(column = %rule.column, "rule references unknown column");
                }
                CompiledRule {
                    logic: rule.logic,
                    column,
                    operator: rule.operator,
                    value: rule.value.clone(),
                }
            })
            .collect();
        Self { rules }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluate the chain for one row. An empty chain accepts every row.
    pub fn matches(&self, row: &Row) -> bool {
        let mut rules = self.rules.iter();
        let Some(first) = rules.next() else {
            return true;
        };
        rules.fold(eval(first, row), |ok, rule| match rule.logic {
            Logic::Or => ok || eval(rule, row),
            Logic::And => ok && eval(rule, row),
        })
    }

    pub fn filter<'r>(&self, rows: &'r [Row]) -> Vec<&'r Row> {
        rows.iter().filter(|row| self.matches(row)).collect()
    }
}

fn eval(rule: &CompiledRule, row: &Row) -> bool {
    rule.column
        .is_some_and(|id| test_cell(row.get(id), rule.operator, &rule.value))
}

/// Rows of `dataset` that pass the chain, in dataset order.
pub fn run<'d>(rules: &[Rule], dataset: &'d Dataset) -> Vec<&'d Row> {
    let query = Query::compile(rules, dataset.schema());
    let kept = query.filter(dataset.rows());
    info!(
        rules = rules.len(),
        kept = kept.len(),
        total = dataset.height(),
        "query evaluated"
    );
    kept
}

#[cfg(test)]
mod tests {
    use podium_model::CellValue;

    use super::*;

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            vec![("x", CellValue::from(3.0)), ("y", CellValue::from("z"))],
            vec![("x", CellValue::from(8.0)), ("y", CellValue::from("q"))],
        ])
    }

    #[test]
    fn or_after_false_predicate_passes() {
        let ds = dataset();
        let rules = vec![
            Rule::new("x", Operator::Gt, "5"),
            Rule::new("y", Operator::Equals, "z").with_logic(Logic::Or),
        ];
        let kept = run(&rules, &ds);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn first_rule_logic_is_ignored() {
        let ds = dataset();
        let rules = vec![Rule::new("x", Operator::Gt, "5").with_logic(Logic::Or)];
        let kept = run(&rules, &ds);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].get(ds.schema().index_of("x").unwrap()), &CellValue::from(8.0));
    }

    #[test]
    fn unknown_column_fails_closed() {
        let ds = dataset();
        let rules = vec![Rule::new("missing", Operator::Empty, "")];
        assert!(run(&rules, &ds).is_empty());
    }

    #[test]
    fn fold_has_no_precedence() {
        let ds = dataset();
        // (x > 5 OR y = z) AND y = q  -> only the second row
        let rules = vec![
            Rule::new("x", Operator::Gt, "5"),
            Rule::new("y", Operator::Equals, "z").with_logic(Logic::Or),
            Rule::new("y", Operator::Equals, "q"),
        ];
        let kept = run(&rules, &ds);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].cells()[1], CellValue::from("q"));
    }
}
