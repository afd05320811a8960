//! Podium command-line entry point.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::{ColorChoice, Parser};
use podium_cli::logging::{LogConfig, init_logging};

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command};
use crate::commands::{
    run_champions, run_columns, run_h2h, run_import, run_overview, run_query, run_stats,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.color.write_global();

    if let Err(error) = init_logging(&log_config(&cli)) {
        eprintln!("error: cannot set up logging: {error}");
        return ExitCode::FAILURE;
    }

    let outcome = match &cli.command {
        Command::Columns(args) => run_columns(args),
        Command::Query(args) => run_query(args),
        Command::Stats(args) => run_stats(args),
        Command::H2h(args) => run_h2h(args),
        Command::Champions(args) => run_champions(args),
        Command::Overview(args) => run_overview(args),
        Command::Import(args) => run_import(args).map(drop),
    };
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

/// `--log-level` beats `-v`/`-q`, which beat `RUST_LOG`.
fn log_config(cli: &Cli) -> LogConfig {
    let base = LogConfig::default()
        .with_format(cli.log_format.into())
        .with_log_file(cli.log_file.clone())
        .with_log_data(cli.log_data);
    let mut config = match cli.log_level {
        Some(level) => base.with_level_filter(level.into()),
        None if cli.verbosity.is_present() => {
            base.with_level_filter(cli.verbosity.tracing_level_filter())
        }
        None => LogConfig {
            level_filter: cli.verbosity.tracing_level_filter(),
            ..base
        },
    };
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
