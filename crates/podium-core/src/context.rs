//! Application context for one analysis session.
//!
//! The context owns the imported dataset and its mapping. Its lifecycle is
//! explicit: [`AppContext::import`] replaces everything wholesale,
//! [`AppContext::set_mapping`] applies a single user edit, and
//! [`AppContext::reset`] clears it. Every analysis call reads the current
//! state and returns an empty result when nothing is loaded.

use std::path::{Path, PathBuf};

use podium_compare::{
    Champion, ChampionSelection, ColumnMetric, ComparisonFilter, DatasetOverview, EventIndex,
    FacetFilter, FacetOptions, HeadToHead, MetricRequest, RiderStats, normalize_chosen,
};
use podium_map::{MappingReport, SynonymConfig, resolve_explained};
use podium_model::{BoundMapping, Dataset, Mapping, ModelError, PartialMapping, Role, Row, Rule};
use podium_query::Query;
use tracing::{debug, info};

/// A dataset together with the mapping resolved for it.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    pub mapping: Mapping,
    pub source: Option<PathBuf>,
    bound: BoundMapping,
}

impl LoadedDataset {
    pub fn bound(&self) -> &BoundMapping {
        &self.bound
    }

    pub fn rows(&self) -> Vec<&Row> {
        self.dataset.rows().iter().collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppContext {
    synonyms: SynonymConfig,
    persisted: PartialMapping,
    loaded: Option<LoadedDataset>,
}

impl AppContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_synonyms(mut self, synonyms: SynonymConfig) -> Self {
        self.synonyms = synonyms;
        self
    }

    /// Seed the mapping that the next import starts from.
    pub fn with_persisted(mut self, persisted: PartialMapping) -> Self {
        self.persisted = persisted;
        self
    }

    pub fn loaded(&self) -> Option<&LoadedDataset> {
        self.loaded.as_ref()
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.loaded.as_ref().map(|l| &l.dataset)
    }

    pub fn mapping(&self) -> Option<&Mapping> {
        self.loaded.as_ref().map(|l| &l.mapping)
    }

    /// The mapping to persist: the last resolution plus user edits.
    pub fn persisted(&self) -> &PartialMapping {
        &self.persisted
    }

    /// Replace the current dataset and resolve its mapping.
    pub fn import(&mut self, dataset: Dataset, source: Option<&Path>) -> MappingReport {
        let report = resolve_explained(dataset.schema().names(), &self.persisted, &self.synonyms);
        let mapping = report.mapping();
        let bound = mapping.bind(dataset.schema());
        info!(
            rows = dataset.height(),
            columns = dataset.width(),
            resolved = mapping.resolved_count(),
            "dataset imported"
        );
        self.persisted = mapping.to_partial();
        self.loaded = Some(LoadedDataset {
            dataset,
            mapping,
            source: source.map(Path::to_path_buf),
            bound,
        });
        report
    }

    /// Apply one user edit. `None` unmaps the role.
    ///
    /// With a dataset loaded, a column outside its schema is rejected.
    pub fn set_mapping(&mut self, role: Role, column: Option<&str>) -> Result<(), ModelError> {
        let column = column.map(str::trim).filter(|c| !c.is_empty());
        if let Some(loaded) = &mut self.loaded {
            if let Some(column) = column {
                loaded.dataset.schema().index_of(column)?;
            }
            loaded.mapping.set(role, column.map(str::to_string));
            loaded.bound = loaded.mapping.bind(loaded.dataset.schema());
        }
        match column {
            Some(column) => self.persisted.insert(role, column),
            None => {
                self.persisted.remove(role);
            }
        }
        debug!(role = %role, column = ?column, "mapping edited");
        Ok(())
    }

    pub fn reset(&mut self) {
        self.loaded = None;
        self.persisted = PartialMapping::new();
        info!("context reset");
    }

    fn rows_and_mapping(&self) -> (Vec<&Row>, BoundMapping) {
        match &self.loaded {
            Some(loaded) => (loaded.rows(), loaded.bound.clone()),
            None => (Vec::new(), BoundMapping::default()),
        }
    }

    pub fn query(&self, rules: &[Rule]) -> Vec<&Row> {
        let Some(loaded) = &self.loaded else {
            return Vec::new();
        };
        let query = Query::compile(rules, loaded.dataset.schema());
        let kept = query.filter(loaded.dataset.rows());
        info!(rules = rules.len(), kept = kept.len(), "query evaluated");
        kept
    }

    /// Rows that pass `rules`, with the current binding. An empty chain keeps
    /// every row.
    fn filtered(&self, rules: &[Rule]) -> (Vec<&Row>, BoundMapping) {
        let mapping = self
            .loaded
            .as_ref()
            .map(|loaded| loaded.bound.clone())
            .unwrap_or_default();
        (self.query(rules), mapping)
    }

    /// Index the events of the rows that pass `rules`.
    pub fn index(&self, rules: &[Rule]) -> EventIndex {
        let (rows, mapping) = self.filtered(rules);
        EventIndex::build(&rows, &mapping)
    }

    /// Compare `chosen` over the rows that pass `rules` and `filter`.
    pub fn head_to_head<S: AsRef<str>>(
        &self,
        chosen: &[S],
        rules: &[Rule],
        filter: &ComparisonFilter,
    ) -> HeadToHead {
        let (rows, mapping) = self.filtered(rules);
        podium_compare::compare(&rows, &mapping, chosen, filter)
    }

    /// Rows passing both `rules` and `filter`: what a comparison looks at.
    fn compared(&self, rules: &[Rule], filter: &ComparisonFilter) -> (Vec<&Row>, BoundMapping) {
        let (rows, mapping) = self.filtered(rules);
        let rows: Vec<&Row> = rows
            .into_iter()
            .filter(|row| filter.accepts(row, &mapping))
            .collect();
        (rows, mapping)
    }

    /// Custom column aggregates for `chosen`, over the same rows
    /// [`AppContext::head_to_head`] compares.
    pub fn column_metrics<S: AsRef<str>>(
        &self,
        chosen: &[S],
        rules: &[Rule],
        filter: &ComparisonFilter,
        requests: &[MetricRequest],
    ) -> Vec<ColumnMetric> {
        let Some(loaded) = &self.loaded else {
            return Vec::new();
        };
        let chosen = normalize_chosen(chosen);
        let (rows, mapping) = self.compared(rules, filter);
        podium_compare::column_metrics(
            &rows,
            &mapping,
            loaded.dataset.schema(),
            &chosen,
            requests,
        )
    }

    /// Per-competitor figures for a comparison, in selection order.
    pub fn competitor_stats<S: AsRef<str>>(
        &self,
        chosen: &[S],
        rules: &[Rule],
        filter: &ComparisonFilter,
    ) -> Vec<(String, RiderStats)> {
        let (rows, mapping) = self.compared(rules, filter);
        normalize_chosen(chosen)
            .into_iter()
            .map(|name| {
                let own = podium_compare::rows_for(&name, &rows, &mapping);
                let stats = podium_compare::rider_stats(&own, &mapping);
                (name, stats)
            })
            .collect()
    }

    /// Dashboard figures over the facet-filtered rows, optionally for one
    /// competitor.
    pub fn stats(&self, competitor: Option<&str>, facets: &FacetFilter) -> RiderStats {
        let (rows, mapping) = self.rows_and_mapping();
        let rows = facets.apply(&rows, &mapping);
        match competitor.map(str::trim).filter(|c| !c.is_empty()) {
            Some(name) => {
                let rows = podium_compare::rows_for(name, &rows, &mapping);
                podium_compare::rider_stats(&rows, &mapping)
            }
            None => podium_compare::rider_stats(&rows, &mapping),
        }
    }

    pub fn facet_options(&self) -> FacetOptions {
        let (rows, mapping) = self.rows_and_mapping();
        podium_compare::facet_options(&rows, &mapping)
    }

    pub fn champions(&self, selection: &ChampionSelection) -> Vec<Champion> {
        let (rows, mapping) = self.rows_and_mapping();
        podium_compare::champions(&rows, &mapping, selection)
    }

    pub fn overview(&self) -> DatasetOverview {
        let (rows, mapping) = self.rows_and_mapping();
        podium_compare::overview(&rows, &mapping)
    }
}
