//! CLI library components for podium.

pub mod logging;
pub mod session;
