//! Session state for podium: the imported dataset, its resolved mapping and
//! the analyses that run over them.

mod context;

pub use context::{AppContext, LoadedDataset};
