//! Loading a sheet into an application context, plus the file plumbing
//! the commands share: rule files, mapping files, CSV export and the
//! snapshot store.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use podium_core::AppContext;
use podium_ingest::load_dataset;
use podium_map::{MappingReport, SynonymConfig};
use podium_model::{Row, Rule, Schema};
use podium_persistence::{
    DatasetSnapshot, DatasetStore, MappingStore, SourceInfo, SourceStatus, verify_source,
};
use tracing::{info, info_span};

/// File holding the mapping inside a store directory.
pub const STORE_MAPPING_FILE: &str = "mapping.json";

/// Subdirectory of a store directory holding dataset snapshots.
pub const STORE_DATASETS_DIR: &str = "datasets";

/// A loaded sheet and how its columns were resolved.
pub struct Session {
    pub context: AppContext,
    pub report: MappingReport,
}

/// Dutch defaults, overlaid by `path` when given.
pub fn load_synonyms(path: Option<&Path>) -> Result<SynonymConfig> {
    match path {
        Some(path) => SynonymConfig::load(path)
            .with_context(|| format!("load synonyms from {}", path.display())),
        None => Ok(SynonymConfig::default()),
    }
}

/// Load `file` and resolve its mapping, starting from the mapping file if
/// one is given.
pub fn open(file: &Path, mapping: Option<&Path>, synonyms: Option<&Path>) -> Result<Session> {
    let span = info_span!("open", file = %file.display());
    let _guard = span.enter();

    let synonyms = load_synonyms(synonyms)?;
    let persisted = match mapping {
        Some(path) => MappingStore::new(path)
            .load()
            .with_context(|| format!("load mapping from {}", path.display()))?,
        None => Default::default(),
    };
    let dataset = load_dataset(file).with_context(|| format!("load {}", file.display()))?;

    let mut context = AppContext::new()
        .with_synonyms(synonyms)
        .with_persisted(persisted);
    let report = context.import(dataset, Some(file));
    Ok(Session { context, report })
}

/// Rules from a JSON file (an array of rule objects) followed by the
/// compact `[and|or:]column:operator[:value]` forms.
pub fn load_rules(inline: &[String], file: Option<&Path>) -> Result<Vec<Rule>> {
    let mut rules: Vec<Rule> = match file {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("read rules from {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parse rules from {}", path.display()))?
        }
        None => Vec::new(),
    };
    for raw in inline {
        let rule = raw
            .parse::<Rule>()
            .with_context(|| format!("invalid rule '{raw}'"))?;
        rules.push(rule);
    }
    Ok(rules)
}

/// Write rows with the schema as header. Returns the number of data rows.
pub fn write_csv(path: &Path, schema: &Schema, rows: &[&Row]) -> Result<usize> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    writer
        .write_record(schema.names())
        .context("write CSV header")?;
    for row in rows {
        writer
            .write_record(row.cells().iter().map(|c| c.as_raw().into_owned()))
            .context("write CSV row")?;
    }
    writer.flush().with_context(|| format!("flush {}", path.display()))?;
    info!(path = %path.display(), rows = rows.len(), "CSV written");
    Ok(rows.len())
}

/// Where an import landed.
#[derive(Debug)]
pub struct ImportOutcome {
    pub dataset_path: PathBuf,
    pub mapping_path: PathBuf,
    pub rows: usize,
    pub resolved_roles: usize,
    /// State of the snapshot this import replaced, if there was one.
    pub previous: Option<SourceStatus>,
}

/// Snapshot `file` into `store_dir` together with its resolved mapping.
///
/// A mapping already in the store seeds resolution, so earlier edits
/// survive a re-import.
pub fn import(file: &Path, store_dir: &Path, synonyms: Option<&Path>) -> Result<ImportOutcome> {
    let store = DatasetStore::new(store_dir.join(STORE_DATASETS_DIR))
        .with_context(|| format!("open store {}", store_dir.display()))?;
    let key = file
        .file_stem()
        .and_then(std::ffi::OsStr::to_str)
        .unwrap_or("dataset");

    let previous = store
        .load(key)
        .with_context(|| format!("read previous snapshot '{key}'"))?
        .map(|snapshot| verify_source(&snapshot))
        .transpose()
        .context("check previous source")?;

    let mapping_path = store_dir.join(STORE_MAPPING_FILE);
    let session = open(file, Some(mapping_path.as_path()), synonyms)?;
    let Some(loaded) = session.context.loaded() else {
        anyhow::bail!("no dataset loaded from {}", file.display());
    };

    let source = SourceInfo::from_file(file).context("hash source file")?;
    let snapshot = DatasetSnapshot::new(&loaded.dataset, Some(source));
    let dataset_path = store.save(key, &snapshot).context("save snapshot")?;
    MappingStore::new(&mapping_path)
        .save(session.context.persisted())
        .context("save mapping")?;

    Ok(ImportOutcome {
        dataset_path,
        mapping_path,
        rows: loaded.dataset.height(),
        resolved_roles: loaded.mapping.resolved_count(),
        previous,
    })
}
