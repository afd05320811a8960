//! Head-to-head comparison of a small set of competitors.
//!
//! Everything here is recomputed from scratch for each selection; nothing
//! is cached between calls.

use podium_model::{BoundMapping, Role, Row};
use serde::Serialize;
use tracing::{debug, info};

use crate::events::EventIndex;
use crate::kpi::{Kpi, aggregate};

/// Largest competitor selection compared at once.
pub const MAX_COMPETITORS: usize = 4;

/// Outcome of every shared event for one pair.
///
/// `a_ahead + b_ahead + ties + unknown == meetings` always holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairStat {
    pub a: String,
    pub b: String,
    pub meetings: usize,
    pub a_ahead: usize,
    pub b_ahead: usize,
    pub ties: usize,
    /// Shared events where either rank is missing.
    pub unknown: usize,
}

/// Trim names, drop blanks and duplicates, keep at most [`MAX_COMPETITORS`].
pub fn normalize_chosen<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut chosen: Vec<String> = Vec::new();
    for name in names {
        let name = name.as_ref().trim();
        if name.is_empty() || chosen.iter().any(|c| c == name) {
            continue;
        }
        if chosen.len() == MAX_COMPETITORS {
            debug!(limit = MAX_COMPETITORS, "competitor selection truncated");
            break;
        }
        chosen.push(name.to_string());
    }
    chosen
}

/// Events `name` shares with at least one other competitor in `chosen`.
pub fn meetings_for<S: AsRef<str>>(name: &str, chosen: &[S], index: &EventIndex) -> usize {
    let others: Vec<&str> = chosen
        .iter()
        .map(AsRef::as_ref)
        .filter(|other| !other.is_empty() && *other != name)
        .collect();
    if name.is_empty() || others.is_empty() {
        return 0;
    }
    let Some(events) = index.events_of(name) else {
        return 0;
    };
    events
        .iter()
        .filter(|id| {
            index
                .competitors(**id)
                .is_some_and(|present| others.iter().any(|o| present.contains(*o)))
        })
        .count()
}

/// Pairwise tallies for every unordered pair in `chosen`, in selection order.
pub fn pairwise<S: AsRef<str>>(chosen: &[S], index: &EventIndex) -> Vec<PairStat> {
    let names: Vec<&str> = chosen.iter().map(AsRef::as_ref).collect();
    let mut stats = Vec::new();
    for (i, a) in names.iter().enumerate() {
        for b in &names[i + 1..] {
            if a != b {
                stats.push(pair(a, b, index));
            }
        }
    }
    stats
}

fn pair(a: &str, b: &str, index: &EventIndex) -> PairStat {
    let mut stat = PairStat {
        a: a.to_string(),
        b: b.to_string(),
        ..PairStat::default()
    };
    let (Some(events_a), Some(events_b)) = (index.events_of(a), index.events_of(b)) else {
        return stat;
    };
    let (small, large) = if events_a.len() <= events_b.len() {
        (events_a, events_b)
    } else {
        (events_b, events_a)
    };

    for id in small.iter().filter(|id| large.contains(*id)) {
        stat.meetings += 1;
        match (index.rank(*id, a), index.rank(*id, b)) {
            (Some(ra), Some(rb)) if ra < rb => stat.a_ahead += 1,
            (Some(ra), Some(rb)) if ra > rb => stat.b_ahead += 1,
            (Some(_), Some(_)) => stat.ties += 1,
            _ => stat.unknown += 1,
        }
    }
    stat
}

/// Metrics shown per competitor in the comparison table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Wins,
    Meetings,
    Starts,
    Podiums,
    AvgRank,
    BestRank,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::Wins,
        Metric::Meetings,
        Metric::Starts,
        Metric::Podiums,
        Metric::AvgRank,
        Metric::BestRank,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Metric::Wins => "Wins",
            Metric::Meetings => "Meetings",
            Metric::Starts => "Starts",
            Metric::Podiums => "Podiums (<=3)",
            Metric::AvgRank => "Avg rank",
            Metric::BestRank => "Best rank",
        }
    }

    pub fn lower_is_better(self) -> bool {
        matches!(self, Metric::AvgRank | Metric::BestRank)
    }
}

/// One competitor's column in the comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitorLine {
    pub name: String,
    pub kpi: Kpi,
    pub meetings: usize,
}

impl CompetitorLine {
    pub fn value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Wins => Some(self.kpi.wins as f64),
            Metric::Meetings => Some(self.meetings as f64),
            Metric::Starts => Some(self.kpi.starts as f64),
            Metric::Podiums => Some(self.kpi.podiums as f64),
            Metric::AvgRank => self.kpi.avg_rank,
            Metric::BestRank => self.kpi.best_rank,
        }
    }
}

/// Restrict comparison rows to one competition and/or distance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonFilter {
    pub competition: Option<String>,
    pub distance: Option<String>,
}

impl ComparisonFilter {
    pub fn accepts(&self, row: &Row, mapping: &BoundMapping) -> bool {
        let matches = |wanted: &Option<String>, role| {
            wanted
                .as_deref()
                .map(str::trim)
                .filter(|w| !w.is_empty())
                .is_none_or(|w| mapping.text(row, role) == w)
        };
        matches(&self.competition, Role::Competition) && matches(&self.distance, Role::Distance)
    }
}

/// Full head-to-head result for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadToHead {
    pub competitors: Vec<CompetitorLine>,
    pub pairs: Vec<PairStat>,
    pub events: usize,
}

impl HeadToHead {
    /// Competitors holding the best value for `metric`; empty when no
    /// competitor has a value.
    pub fn leading(&self, metric: Metric) -> Vec<&str> {
        let values = self
            .competitors
            .iter()
            .filter_map(|c| c.value(metric).map(|v| (c.name.as_str(), v)));
        let best = values.clone().map(|(_, v)| v).reduce(|a, b| {
            if metric.lower_is_better() {
                a.min(b)
            } else {
                a.max(b)
            }
        });
        match best {
            Some(best) => values.filter(|(_, v)| *v == best).map(|(n, _)| n).collect(),
            None => Vec::new(),
        }
    }
}

/// Filter rows, index them, and compute KPIs and pair tallies for `chosen`.
///
/// Fewer than two usable names yield KPIs only, with no pairs.
pub fn compare<S: AsRef<str>>(
    rows: &[&Row],
    mapping: &BoundMapping,
    chosen: &[S],
    filter: &ComparisonFilter,
) -> HeadToHead {
    let chosen = normalize_chosen(chosen);
    let rows: Vec<&Row> = rows
        .iter()
        .copied()
        .filter(|row| filter.accepts(row, mapping))
        .collect();
    let index = EventIndex::build(&rows, mapping);

    let competitors = chosen
        .iter()
        .map(|name| CompetitorLine {
            name: name.clone(),
            kpi: aggregate(name, &rows, mapping),
            meetings: meetings_for(name, &chosen, &index),
        })
        .collect();
    let pairs = pairwise(&chosen, &index);

    info!(
        competitors = chosen.len(),
        rows = rows.len(),
        events = index.event_count(),
        "head-to-head computed"
    );
    HeadToHead {
        competitors,
        pairs,
        events: index.event_count(),
    }
}
