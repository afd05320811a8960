//! Free-form column aggregation for comparison tables.

use std::fmt;

use podium_model::{BoundMapping, ColumnId, Role, Row, Schema};
use podium_normalize::{duration_to_seconds, to_number};
use serde::Serialize;
use tracing::debug;

use crate::kpi::{mean, rows_for};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Minimum.
    Best,
    Max,
    Avg,
    /// Non-empty cells.
    Count,
}

impl Aggregation {
    pub const ALL: [Aggregation; 4] = [
        Aggregation::Best,
        Aggregation::Max,
        Aggregation::Avg,
        Aggregation::Count,
    ];

    /// Accepts the display names plus `min` and `mean`, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "best" | "min" => Some(Aggregation::Best),
            "max" => Some(Aggregation::Max),
            "avg" | "mean" => Some(Aggregation::Avg),
            "count" => Some(Aggregation::Count),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Aggregation::Best => "Best (min)",
            Aggregation::Max => "Max",
            Aggregation::Avg => "Average",
            Aggregation::Count => "Count",
        }
    }

    pub fn higher_is_better(self) -> bool {
        matches!(self, Aggregation::Max | Aggregation::Count)
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Aggregation::Best => "best",
            Aggregation::Max => "max",
            Aggregation::Avg => "avg",
            Aggregation::Count => "count",
        })
    }
}

/// Aggregate one column over `rows`.
///
/// Cells are read as durations when at least `max(3, n/2)` of the `n`
/// non-empty cells parse as one, otherwise as plain numbers. Returns `None`
/// when no cell yields a value.
pub fn aggregate_column(rows: &[&Row], column: ColumnId, aggregation: Aggregation) -> Option<f64> {
    let cells: Vec<_> = rows
        .iter()
        .map(|row| row.get(column))
        .filter(|cell| !cell.is_blank())
        .collect();
    if aggregation == Aggregation::Count {
        return Some(cells.len() as f64);
    }

    let times: Vec<f64> = cells.iter().filter_map(|c| duration_to_seconds(c)).collect();
    let values = if times.len() >= (cells.len() / 2).max(3) {
        times
    } else {
        cells.iter().filter_map(|c| to_number(c)).collect()
    };

    match aggregation {
        Aggregation::Best => values.iter().copied().reduce(f64::min),
        Aggregation::Max => values.iter().copied().reduce(f64::max),
        Aggregation::Avg => mean(&values),
        Aggregation::Count => None,
    }
}

/// A custom comparison-table row: one column, one aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricRequest {
    pub column: String,
    pub aggregation: Aggregation,
}

impl MetricRequest {
    pub fn new(column: impl Into<String>, aggregation: Aggregation) -> Self {
        Self {
            column: column.into(),
            aggregation,
        }
    }
}

/// A [`MetricRequest`] evaluated for every chosen competitor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnMetric {
    pub column: String,
    pub aggregation: Aggregation,
    /// One entry per competitor, in selection order.
    pub values: Vec<Option<f64>>,
    /// Index of the leading value. The first competitor wins ties.
    pub best: Option<usize>,
    /// The column is the mapped time column, so values are seconds.
    pub is_time: bool,
}

/// Aggregate each requested column over every competitor's rows.
///
/// A column outside `schema` yields no values rather than an error.
pub fn column_metrics<S: AsRef<str>>(
    rows: &[&Row],
    mapping: &BoundMapping,
    schema: &Schema,
    chosen: &[S],
    requests: &[MetricRequest],
) -> Vec<ColumnMetric> {
    let per_competitor: Vec<Vec<&Row>> = chosen
        .iter()
        .map(|name| rows_for(name.as_ref(), rows, mapping))
        .collect();

    requests
        .iter()
        .map(|request| {
            let column = schema.find(request.column.trim());
            if column.is_none() {
                debug!(column = %request.column, "metric references unknown column");
            }
            let values: Vec<Option<f64>> = per_competitor
                .iter()
                .map(|rows| column.and_then(|id| aggregate_column(rows, id, request.aggregation)))
                .collect();
            ColumnMetric {
                column: request.column.clone(),
                aggregation: request.aggregation,
                best: leading_position(&values, request.aggregation),
                is_time: column.is_some() && column == mapping.column(Role::Time),
                values,
            }
        })
        .collect()
}

fn leading_position(values: &[Option<f64>], aggregation: Aggregation) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i, v)))
        .reduce(|lead, next| {
            let ahead = if aggregation.higher_is_better() {
                next.1 > lead.1
            } else {
                next.1 < lead.1
            };
            if ahead { next } else { lead }
        })
        .map(|(i, _)| i)
}
