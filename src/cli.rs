//! Command-line interface definitions for DirDiff.
//!
//! This module defines all CLI arguments, subcommands, and options using the clap derive API.
//! Global options (verbosity, color, error format) apply to every subcommand; the
//! subcommand selects the mode.
//!
//! # Example
//!
//! ```bash
//! # Report phone pictures that already exist in the collection
//! dirdiff dedupe --src ~/scratch/Phone_2020 --dest ~/Pics
//!
//! # Delete renamed copies, matching on name prefix and content
//! dirdiff dedupe -f '*' --src ~/scratch/Phone_2020 --dest ~/Pics \
//!     --match-prefix --match-content --del-dupe-src
//!
//! # Look for internal duplicates of 10 MB or more
//! dirdiff dedupe --src-only /data --match-content --min-mb 10
//!
//! # Rename phone captures to the date-based scheme
//! dirdiff rename --src ~/scratch/Phone_2020
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Purge source files that already exist somewhere in a destination tree.
///
/// Built to cut down the time it takes to fold new files into an
/// already categorized collection.
#[derive(Debug, Parser)]
#[command(name = "dirdiff")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Print fatal errors as JSON on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Mode to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available modes.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Find (and optionally delete) source files duplicated in a destination
    Dedupe(DedupeArgs),
    /// Rename mobile capture files to a date-based scheme
    #[command(name = "rename", alias = "renmob")]
    Rename(RenameArgs),
}

/// Arguments for the dedupe subcommand.
#[derive(Debug, Clone, Default, Args)]
pub struct DedupeArgs {
    /// Source directory
    #[arg(long, value_name = "DIR")]
    pub src: Option<PathBuf>,

    /// Destination directory
    #[arg(long, value_name = "DIR")]
    pub dest: Option<PathBuf>,

    /// Search this directory, including subdirectories, for internal duplicates
    #[arg(long, value_name = "DIR")]
    pub src_only: Option<PathBuf>,

    /// File filter glob (defaults to `*`)
    #[arg(short, long, value_name = "GLOB")]
    pub filter: Option<String>,

    /// Delete duplicate source files instead of reporting them
    #[arg(long)]
    pub del_dupe_src: bool,

    /// Match files whose name starts with the source name without extension
    #[arg(long)]
    pub match_prefix: bool,

    /// Match files on content, to find duplicates even if renamed
    #[arg(long)]
    pub match_content: bool,

    /// Ignore files smaller than N megabytes
    #[arg(long = "min-mb", alias = "min", value_name = "N", value_parser = parse_min_size)]
    pub min_mb: Option<u64>,
}

/// Arguments for the rename subcommand.
#[derive(Debug, Clone, Args)]
pub struct RenameArgs {
    /// Directory holding the files to rename (searched recursively)
    #[arg(long, value_name = "DIR")]
    pub src: PathBuf,

    /// File filter glob (defaults to `*`)
    #[arg(short, long, value_name = "GLOB")]
    pub filter: Option<String>,
}

/// Parse a minimum size given in whole megabytes.
///
/// A trailing `MB`/`M` is accepted and ignored. Case-insensitive.
///
/// # Examples
///
/// ```
/// use dirdiff::cli::parse_min_size;
///
/// assert_eq!(parse_min_size("10").unwrap(), 10);
/// assert_eq!(parse_min_size("10MB").unwrap(), 10);
/// assert!(parse_min_size("ten").is_err());
/// ```
///
/// # Errors
///
/// Returns an error if the string is empty, negative, or not an integer.
pub fn parse_min_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Size cannot be empty".to_string());
    }

    let upper = s.to_uppercase();
    let num_str = upper
        .strip_suffix("MB")
        .or_else(|| upper.strip_suffix('M'))
        .unwrap_or(&upper)
        .trim();

    if num_str.starts_with('-') {
        return Err("Size cannot be negative".to_string());
    }

    num_str
        .parse()
        .map_err(|_| format!("Invalid number of megabytes: '{s}'"))
}
