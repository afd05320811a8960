use thiserror::Error;

/// Errors raised by the data model.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// A column name outside the dataset's closed column set.
    #[error("unknown column '{column}'")]
    UnknownColumn { column: String },

    /// A row does not have one cell per schema column.
    #[error("row {row} has {found} cells, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A role key that is not one of the canonical roles.
    #[error("unknown role '{value}'")]
    UnknownRole { value: String },

    /// An operator name that is not supported by the query evaluator.
    #[error("unknown operator '{value}'")]
    UnknownOperator { value: String },

    /// A rule that could not be parsed from its compact text form.
    #[error("invalid rule '{input}': {reason}")]
    InvalidRule { input: String, reason: &'static str },
}

pub type Result<T> = std::result::Result<T, ModelError>;
