//! Column mapping: resolves canonical roles onto the columns of a dataset.
//!
//! Resolution is a pure function of the column list, the persisted mapping
//! and the synonym config. Storing the result is up to the caller.

pub mod engine;
pub mod error;
pub mod patterns;
pub mod synonyms;
pub mod utils;

pub use engine::{MappingReport, Resolution, Stage, guess_column, resolve, resolve_explained};
pub use error::{MapError, Result};
pub use patterns::role_keywords;
pub use synonyms::SynonymConfig;
