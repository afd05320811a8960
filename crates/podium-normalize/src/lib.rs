//! Total conversion functions for raw result cells.
//!
//! Nothing in this crate fails loudly: unparseable input is `None` (or the
//! [`UNAVAILABLE`] marker for display), so aggregate code can filter and
//! carry on.

pub mod datetime;
pub mod display;
pub mod duration;
pub mod numeric;
pub mod season;

pub use datetime::{parse_date, parse_date_str, serial_to_datetime};
pub use display::{display_decimals, format_for_display, round_for_display};
pub use duration::{UNAVAILABLE, duration_to_seconds, format_duration, parse_duration};
pub use numeric::{parse_number, to_number};
pub use season::{display_year, extract_season_years};
