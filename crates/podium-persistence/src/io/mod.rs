//! File I/O: atomic writes and source hashing.

mod atomic;
mod hash;

pub use atomic::{read_json, remove_file, write_atomic, write_json};
pub use hash::{compute_file_hash, verify_file_hash};
