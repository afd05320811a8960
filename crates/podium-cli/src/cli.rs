//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use podium_cli::logging::LogFormat;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "podium",
    version,
    about = "Explore speed skating result sheets",
    long_about = "Explore result sheets exported as CSV or JSON.\n\n\
                  Columns are matched to roles (competitor, rank, time, ...) automatically;\n\
                  every command then filters, aggregates or compares the rows."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow competitor names in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show how each role was matched to a column.
    Columns(ColumnsArgs),

    /// Filter rows with a chain of rules.
    Query(QueryArgs),

    /// Dashboard figures, optionally for one competitor.
    Stats(StatsArgs),

    /// Compare two to four competitors.
    H2h(HeadToHeadArgs),

    /// Winners of championship competitions.
    Champions(ChampionsArgs),

    /// Row and distinct-value counts.
    Overview(SourceArgs),

    /// Snapshot a sheet and its mapping into a store directory.
    Import(ImportArgs),
}

#[derive(Args)]
pub struct SourceArgs {
    /// Result sheet (.csv or .json).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Persisted mapping file used as the starting point.
    #[arg(long, value_name = "PATH")]
    pub mapping: Option<PathBuf>,

    /// Header synonym configuration (JSON).
    #[arg(long, value_name = "PATH")]
    pub synonyms: Option<PathBuf>,
}

#[derive(Args)]
pub struct ColumnsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Write the resolved mapping back to --mapping.
    #[arg(long, requires = "mapping")]
    pub save: bool,

    /// Override one role, e.g. `--set competitor=Naam` (empty value unmaps).
    #[arg(long = "set", value_name = "ROLE=COLUMN")]
    pub overrides: Vec<String>,
}

#[derive(Args)]
pub struct RuleArgs {
    /// Rule as `[and|or:]column:operator[:value]`, applied in order.
    #[arg(long = "rule", value_name = "RULE")]
    pub rules: Vec<String>,

    /// JSON file with an array of rules, applied before --rule.
    #[arg(long = "rules", value_name = "PATH")]
    pub rules_file: Option<PathBuf>,
}

#[derive(Args)]
pub struct QueryArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub filter: RuleArgs,

    /// Write every matching row to this CSV file.
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Rows shown in the terminal.
    #[arg(long, default_value_t = 50)]
    pub limit: usize,
}

#[derive(Args)]
pub struct FacetArgs {
    #[arg(long)]
    pub year: Option<i32>,
    #[arg(long)]
    pub competition: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub distance: Option<String>,
    #[arg(long)]
    pub sex: Option<String>,
    #[arg(long)]
    pub season: Option<String>,
    #[arg(long)]
    pub winner: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
}

#[derive(Args)]
pub struct StatsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Restrict figures to one competitor.
    #[arg(long)]
    pub rider: Option<String>,

    #[command(flatten)]
    pub facets: FacetArgs,

    /// List the values each facet can take.
    #[arg(long)]
    pub options: bool,
}

#[derive(Args)]
pub struct HeadToHeadArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Competitor to compare; repeat for each (at most four are used).
    #[arg(long = "rider", required = true)]
    pub riders: Vec<String>,

    #[arg(long)]
    pub competition: Option<String>,

    #[arg(long)]
    pub distance: Option<String>,

    /// Only rows passing these rules are compared.
    #[command(flatten)]
    pub filter: RuleArgs,

    /// Extra table row as `COLUMN:best|max|avg|count`; repeat for more.
    #[arg(long = "metric", value_name = "COLUMN:AGG")]
    pub metrics: Vec<String>,

    /// Print the comparison as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ChampionsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Exact competition value, or `auto` for every recognized championship.
    #[arg(long, default_value = "auto")]
    pub competition: String,
}

#[derive(Args)]
pub struct ImportArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Store directory for the snapshot and mapping.
    #[arg(long, value_name = "DIR")]
    pub store: PathBuf,

    #[arg(long, value_name = "PATH")]
    pub synonyms: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
