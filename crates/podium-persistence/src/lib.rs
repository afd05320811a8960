//! Persistent storage for imported datasets and column mappings.
//!
//! # Features
//!
//! - **Atomic writes** (temp file + rename) so a crash never leaves a
//!   half-written store file
//! - **Source change detection** via SHA-256 hashing
//!
//! Both stores write pretty-printed JSON carrying a format `version`.

mod dataset;
mod error;
mod io;
mod mapping;

pub use dataset::{
    DatasetSnapshot, DatasetStore, SNAPSHOT_VERSION, SourceInfo, SourceStatus, verify_source,
};
pub use error::{PersistenceError, Result};
pub use io::{compute_file_hash, verify_file_hash, write_atomic};
pub use mapping::{MAPPING_VERSION, MappingStore, StoredMapping};
