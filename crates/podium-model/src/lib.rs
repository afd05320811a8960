//! Data model shared by the podium crates: raw cells, datasets with a closed
//! column set, canonical roles, role mappings and filter rules.

pub mod error;
pub mod mapping;
pub mod role;
pub mod rule;
pub mod table;
pub mod value;

pub use error::{ModelError, Result};
pub use mapping::{BoundMapping, Mapping, PartialMapping};
pub use role::Role;
pub use rule::{Logic, Operator, Rule};
pub use table::{ColumnId, Dataset, Row, Schema};
pub use value::{CellValue, format_numeric};
