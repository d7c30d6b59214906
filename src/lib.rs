//! DirDiff - purge source files that already exist in a destination tree
//!
//! A cross-platform Rust CLI that matches a source directory against a
//! destination directory by exact name, name prefix and byte content, then
//! reports or deletes the duplicated source files. A rename mode normalizes
//! phone capture names to a date-based scheme.

pub mod actions;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod rename;
pub mod scanner;

use std::time::Instant;

use anyhow::{Context, Result};

use crate::actions::{resolve, ResolveSummary};
use crate::cli::{Cli, Commands, DedupeArgs, RenameArgs};
use crate::config::{Config, DedupePlan};
use crate::duplicates::MatchEngine;
use crate::error::ExitCode;
use crate::logging::{LogFacade, LogSink};
use crate::rename::{rename_mobile_files, RenameSummary};
use crate::scanner::{Walker, WalkerConfig};

/// Run the application for already-parsed arguments.
///
/// # Errors
///
/// Returns an error when the configuration is rejected or a filesystem
/// operation fails mid-run.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet, cli.no_color);
    let defaults = Config::load();
    let log = LogFacade;

    match cli.command {
        Commands::Dedupe(args) => {
            run_dedupe(&args, &defaults, &log)?;
        }
        Commands::Rename(args) => {
            run_rename(&args, &defaults, &log)?;
        }
    }

    Ok(ExitCode::Success)
}

/// Validate, enumerate, match and resolve one dedupe run.
///
/// # Errors
///
/// Fails on invalid configuration or any filesystem error.
pub fn run_dedupe(
    args: &DedupeArgs,
    defaults: &Config,
    log: &dyn LogSink,
) -> Result<ResolveSummary> {
    let started = Instant::now();
    let plan = DedupePlan::from_args(args, defaults, log)?;
    log::debug!("Run plan: {:?}", plan);

    let sources = Walker::new(&plan.source, WalkerConfig::with_filter(&plan.filter))
        .collect_files()
        .with_context(|| format!("Failed to list source files in {}", plan.source.display()))?;
    let destinations = if plan.matching.search_only {
        sources.clone()
    } else {
        Walker::new(&plan.destination, WalkerConfig::with_filter(&plan.filter))
            .collect_files()
            .with_context(|| {
                format!(
                    "Failed to list destination files in {}",
                    plan.destination.display()
                )
            })?
    };

    let engine = MatchEngine::new(plan.matching.clone(), log);
    let (map, stats) = engine
        .run(&sources, &destinations)
        .context("Failed to compare files")?;
    log::debug!("{:?}", stats);

    let summary = resolve(&map, sources.len(), plan.matching.delete, log)
        .context("Failed to delete duplicate source file")?;

    log.info(&format!("Duration {}", started.elapsed().as_secs_f64()));
    Ok(summary)
}

/// Rename mobile captures under `--src`.
///
/// # Errors
///
/// Fails when listing or renaming fails.
pub fn run_rename(
    args: &RenameArgs,
    defaults: &Config,
    log: &dyn LogSink,
) -> Result<RenameSummary> {
    let started = Instant::now();
    let filter = defaults.filter_or_default(args.filter.as_deref());

    let summary = rename_mobile_files(&args.src, &filter, log)?;
    log.info(&format!(
        "Renamed {} of {} files ({} skipped)",
        summary.renamed, summary.scanned, summary.skipped
    ));

    log.info(&format!("Duration {}", started.elapsed().as_secs_f64()));
    Ok(summary)
}
