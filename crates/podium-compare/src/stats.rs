//! Competitor summaries with time and date figures, and the leaders among a
//! selection of competitors.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use podium_model::{BoundMapping, Role, Row};
use podium_normalize::{duration_to_seconds, parse_date};
use serde::Serialize;

use crate::kpi::{Kpi, aggregate_rows, mean};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RiderStats {
    #[serde(flatten)]
    pub kpi: Kpi,
    /// Seconds.
    pub best_time: Option<f64>,
    /// Seconds.
    pub avg_time: Option<f64>,
    pub last_date: Option<NaiveDateTime>,
    /// Most frequent distance text; the first seen wins ties.
    pub top_distance: Option<String>,
}

pub fn rider_stats(rows: &[&Row], mapping: &BoundMapping) -> RiderStats {
    let times: Vec<f64> = if mapping.has(Role::Time) {
        rows.iter()
            .filter_map(|row| duration_to_seconds(mapping.cell(row, Role::Time)))
            .collect()
    } else {
        Vec::new()
    };

    let last_date = rows
        .iter()
        .filter_map(|row| parse_date(mapping.cell(row, Role::Date)))
        .max();

    RiderStats {
        kpi: aggregate_rows(rows, mapping),
        best_time: times.iter().copied().reduce(f64::min),
        avg_time: mean(&times),
        last_date,
        top_distance: most_frequent(rows, mapping, Role::Distance),
    }
}

fn most_frequent(rows: &[&Row], mapping: &BoundMapping, role: Role) -> Option<String> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (pos, row) in rows.iter().enumerate() {
        let value = mapping.text(row, role);
        if value.is_empty() {
            continue;
        }
        counts.entry(value.into_owned()).or_insert((0, pos)).0 += 1;
    }
    counts
        .into_iter()
        .max_by(|(_, (ca, pa)), (_, (cb, pb))| ca.cmp(cb).then(pb.cmp(pa)))
        .map(|(value, _)| value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderMetric {
    MostWins,
    MostPodiums,
    BestRank,
    FastestTime,
}

impl LeaderMetric {
    pub const ALL: [LeaderMetric; 4] = [
        LeaderMetric::MostWins,
        LeaderMetric::MostPodiums,
        LeaderMetric::BestRank,
        LeaderMetric::FastestTime,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LeaderMetric::MostWins => "Most wins",
            LeaderMetric::MostPodiums => "Most podiums",
            LeaderMetric::BestRank => "Best rank",
            LeaderMetric::FastestTime => "Fastest best time",
        }
    }

    fn value(self, stats: &RiderStats) -> Option<f64> {
        match self {
            LeaderMetric::MostWins => Some(stats.kpi.wins as f64),
            LeaderMetric::MostPodiums => Some(stats.kpi.podiums as f64),
            LeaderMetric::BestRank => stats.kpi.best_rank,
            LeaderMetric::FastestTime => stats.best_time,
        }
    }

    fn lower_is_better(self) -> bool {
        matches!(self, LeaderMetric::BestRank | LeaderMetric::FastestTime)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leader {
    pub metric: LeaderMetric,
    pub name: String,
    pub value: f64,
}

/// Leader per metric among `stats`, in selection order.
///
/// A metric is skipped unless at least two competitors have a value for it.
/// Ties go to the competitor listed first.
pub fn leaders(stats: &[(String, RiderStats)]) -> Vec<Leader> {
    LeaderMetric::ALL
        .into_iter()
        .filter_map(|metric| {
            let candidates: Vec<(&str, f64)> = stats
                .iter()
                .filter_map(|(name, s)| {
                    metric
                        .value(s)
                        .filter(|v| v.is_finite())
                        .map(|v| (name.as_str(), v))
                })
                .collect();
            if candidates.len() < 2 {
                return None;
            }
            let better = |a: f64, b: f64| {
                if metric.lower_is_better() { a < b } else { a > b }
            };
            let (name, value) = candidates
                .into_iter()
                .reduce(|best, next| if better(next.1, best.1) { next } else { best })?;
            Some(Leader {
                metric,
                name: name.to_string(),
                value,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use podium_model::{CellValue, Dataset, Mapping};

    use super::*;

    fn fixture() -> (Dataset, BoundMapping) {
        let rows = [
            ("1", "1:10.5", "500m", "01-01-2020"),
            ("4", "1:09.9", "1000m", "15-02-2021"),
            ("2", "DNF", "500m", ""),
        ];
        let ds = Dataset::from_records(rows.iter().map(|(rank, time, dist, date)| {
            vec![
                ("Ranking", CellValue::from(*rank)),
                ("Tijd", CellValue::from(*time)),
                ("Afstand", CellValue::from(*dist)),
                ("Datum", CellValue::from(*date)),
            ]
        }));
        let mut mapping = Mapping::unresolved();
        mapping.set(Role::Rank, Some("Ranking".into()));
        mapping.set(Role::Time, Some("Tijd".into()));
        mapping.set(Role::Distance, Some("Afstand".into()));
        mapping.set(Role::Date, Some("Datum".into()));
        let bound = mapping.bind(ds.schema());
        (ds, bound)
    }

    #[test]
    fn time_and_date_figures() {
        let (ds, mapping) = fixture();
        let rows: Vec<&Row> = ds.rows().iter().collect();
        let stats = rider_stats(&rows, &mapping);
        assert!((stats.best_time.unwrap() - 69.9).abs() < 1e-9);
        assert!((stats.avg_time.unwrap() - 70.2).abs() < 1e-9);
        assert_eq!(
            stats.last_date.map(|d| d.date().to_string()),
            Some("2021-02-15".to_string())
        );
        assert_eq!(stats.top_distance.as_deref(), Some("500m"));
        assert_eq!(stats.kpi.best_rank, Some(1.0));
    }

    #[test]
    fn top_distance_tie_keeps_first_seen() {
        let (ds, mapping) = fixture();
        let rows: Vec<&Row> = ds.rows().iter().take(2).collect();
        let stats = rider_stats(&rows, &mapping);
        assert_eq!(stats.top_distance.as_deref(), Some("500m"));
    }

    fn stats(wins: usize, best_rank: Option<f64>, best_time: Option<f64>) -> RiderStats {
        RiderStats {
            kpi: Kpi {
                wins,
                best_rank,
                ..Kpi::default()
            },
            best_time,
            ..RiderStats::default()
        }
    }

    #[test]
    fn leaders_need_two_values_and_prefer_first_on_ties() {
        let selection = vec![
            ("A".to_string(), stats(2, Some(1.0), None)),
            ("B".to_string(), stats(2, Some(3.0), Some(70.0))),
        ];
        let found = leaders(&selection);
        let by_metric = |m: LeaderMetric| found.iter().find(|l| l.metric == m);

        assert_eq!(by_metric(LeaderMetric::MostWins).unwrap().name, "A");
        assert_eq!(by_metric(LeaderMetric::BestRank).unwrap().name, "A");
        assert!(by_metric(LeaderMetric::FastestTime).is_none());
        assert_eq!(by_metric(LeaderMetric::MostPodiums).unwrap().value, 0.0);
    }
}
