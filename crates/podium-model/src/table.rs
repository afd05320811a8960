//! Datasets with a closed column set fixed at import time.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::value::CellValue;

static EMPTY_CELL: CellValue = CellValue::Empty;

/// Position of a column inside a [`Schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnId(usize);

impl ColumnId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// The ordered set of column names of a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Schema {
    columns: Vec<String>,
    lookup: HashMap<String, usize>,
}

impl Schema {
    /// Build a schema. Duplicate names keep their first position.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut schema = Self::default();
        for name in columns {
            schema.push(name.into());
        }
        schema
    }

    fn push(&mut self, name: String) -> ColumnId {
        if let Some(&idx) = self.lookup.get(&name) {
            return ColumnId(idx);
        }
        let idx = self.columns.len();
        self.lookup.insert(name.clone(), idx);
        self.columns.push(name);
        ColumnId(idx)
    }

    /// Resolve a column name (exact, case-sensitive).
    pub fn index_of(&self, name: &str) -> Result<ColumnId> {
        self.find(name).ok_or_else(|| ModelError::UnknownColumn {
            column: name.to_string(),
        })
    }

    pub fn find(&self, name: &str) -> Option<ColumnId> {
        self.lookup.get(name).copied().map(ColumnId)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains_key(name)
    }

    pub fn name(&self, id: ColumnId) -> Option<&str> {
        self.columns.get(id.0).map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl From<Vec<String>> for Schema {
    fn from(columns: Vec<String>) -> Self {
        Self::new(columns)
    }
}

impl From<Schema> for Vec<String> {
    fn from(schema: Schema) -> Self {
        schema.columns
    }
}

/// One record; cells are stored in schema order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: Vec<CellValue>,
}

impl Row {
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self { cells }
    }

    /// Cell at `id`; a column beyond the row's width reads as empty.
    pub fn get(&self, id: ColumnId) -> &CellValue {
        self.cells.get(id.0).unwrap_or(&EMPTY_CELL)
    }

    /// Cell for a column name, failing for names outside the schema.
    pub fn cell(&self, schema: &Schema, column: &str) -> Result<&CellValue> {
        schema.index_of(column).map(|id| self.get(id))
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A schema plus rows that all share it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    schema: Schema,
    rows: Vec<Row>,
}

impl Dataset {
    /// Build a dataset, checking every row against the schema width.
    pub fn new(schema: Schema, rows: Vec<Row>) -> Result<Self> {
        if let Some((row, bad)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != schema.len())
        {
            return Err(ModelError::RowWidth {
                row,
                expected: schema.len(),
                found: bad.len(),
            });
        }
        Ok(Self { schema, rows })
    }

    /// Build a dataset from loosely keyed records.
    ///
    /// The column set is the union of all keys in first-seen order. A key a
    /// record does not carry reads as [`CellValue::Empty`]; a key repeated
    /// inside one record keeps its last value.
    pub fn from_records<R, K>(records: R) -> Self
    where
        R: IntoIterator<Item = Vec<(K, CellValue)>>,
        K: Into<String>,
    {
        let mut schema = Schema::default();
        let mut pending: Vec<Vec<(ColumnId, CellValue)>> = Vec::new();
        for record in records {
            let cells = record
                .into_iter()
                .map(|(key, value)| (schema.push(key.into()), value))
                .collect();
            pending.push(cells);
        }

        let width = schema.len();
        let rows = pending
            .into_iter()
            .map(|cells| {
                let mut row = vec![CellValue::Empty; width];
                for (id, value) in cells {
                    row[id.0] = value;
                }
                Row::new(row)
            })
            .collect();
        Self { schema, rows }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.schema.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate the cells of one column.
    pub fn column(&self, id: ColumnId) -> impl Iterator<Item = &CellValue> + '_ {
        self.rows.iter().map(move |row| row.get(id))
    }
}
