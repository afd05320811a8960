//! Rule-based row filtering.
//!
//! Every evaluation is total: malformed rules, unparseable cells and unknown
//! columns make a predicate false instead of raising an error.

pub mod engine;
pub mod predicate;

pub use engine::{Query, run};
pub use predicate::{numeric_value, parse_range, test_cell};
