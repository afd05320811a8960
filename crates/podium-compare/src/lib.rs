//! Event matching and competitor statistics.
//!
//! The crate is organized into:
//!
//! - `events` - Event index over result rows
//! - `headtohead` - Pairwise tallies and the comparison metric table
//! - `kpi` / `stats` - Per-competitor aggregates and leaders
//! - `facets` - Dashboard filters
//! - `champions` / `championship` - Championship classification and winners
//! - `distance` - Distance categories
//! - `metrics` - Custom column aggregates for the comparison table
//! - `overview` - Dataset summary counts
//!
//! All operations take rows plus a [`podium_model::BoundMapping`] and
//! return plain values; unusable cells are skipped, never reported.

pub mod champions;
pub mod championship;
pub mod distance;
pub mod events;
pub mod facets;
pub mod headtohead;
pub mod kpi;
pub mod metrics;
pub mod overview;
pub mod stats;

pub use champions::{Champion, ChampionSelection, champions};
pub use championship::ChampionshipType;
pub use distance::DistanceCategory;
pub use events::{EventId, EventIndex, EventKey};
pub use facets::{Facet, FacetFilter, FacetOptions, facet_options, parse_year};
pub use headtohead::{
    ComparisonFilter, CompetitorLine, HeadToHead, MAX_COMPETITORS, Metric, PairStat, compare,
    meetings_for, normalize_chosen, pairwise,
};
pub use kpi::{Kpi, MedalTally, aggregate, aggregate_rows, rank_of, rows_for};
pub use metrics::{Aggregation, ColumnMetric, MetricRequest, aggregate_column, column_metrics};
pub use overview::{DatasetOverview, overview};
pub use stats::{Leader, LeaderMetric, RiderStats, leaders, rider_stats};
