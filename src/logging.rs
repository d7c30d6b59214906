//! Logging infrastructure for DirDiff.
//!
//! Two layers live here:
//!
//! 1. Process-wide initialisation of the `log` facade with an `env_logger`
//!    backend. Log levels are determined by (in priority order):
//!    `RUST_LOG`, then `--quiet` (error only) or `--verbose` (debug/trace),
//!    then the default info level.
//! 2. The [`LogSink`] interface that the matching engine, resolver and
//!    renamer receive explicitly. [`LogFacade`] forwards to the `log`
//!    macros; [`RecordingSink`] keeps every message for inspection in tests.
//!
//! # Example
//!
//! ```rust,no_run
//! use dirdiff::logging::{init_logging, LogFacade, LogSink};
//!
//! init_logging(0, false, false);
//!
//! let sink = LogFacade;
//! sink.info("Duplicate data summary:");
//! ```

use env_logger::{Builder, WriteStyle};
use log::{Level, LevelFilter};
use std::env;
use std::io::Write;
use std::sync::Mutex;

/// Leveled message sink handed to every component that reports to the user.
pub trait LogSink {
    /// Report an error-level message.
    fn error(&self, msg: &str);
    /// Report a warning-level message.
    fn warn(&self, msg: &str);
    /// Report an info-level message.
    fn info(&self, msg: &str);
    /// Report a debug-level message.
    fn debug(&self, msg: &str);
}

/// Sink that forwards to the global `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFacade;

impl LogSink for LogFacade {
    fn error(&self, msg: &str) {
        log::error!("{}", msg);
    }

    fn warn(&self, msg: &str) {
        log::warn!("{}", msg);
    }

    fn info(&self, msg: &str) {
        log::info!("{}", msg);
    }

    fn debug(&self, msg: &str) {
        log::debug!("{}", msg);
    }
}

/// Sink that records messages in memory.
///
/// Used by tests to assert on the exact wording of warnings and report lines.
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Mutex<Vec<(Level, String)>>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, level: Level, msg: &str) {
        if let Ok(mut records) = self.records.lock() {
            records.push((level, msg.to_string()));
        }
    }

    /// All recorded messages in arrival order.
    #[must_use]
    pub fn records(&self) -> Vec<(Level, String)> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    /// Recorded messages at the given level.
    #[must_use]
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, msg)| msg)
            .collect()
    }

    /// Recorded warning messages.
    #[must_use]
    pub fn warnings(&self) -> Vec<String> {
        self.messages(Level::Warn)
    }

    /// Recorded info messages.
    #[must_use]
    pub fn infos(&self) -> Vec<String> {
        self.messages(Level::Info)
    }
}

impl LogSink for RecordingSink {
    fn error(&self, msg: &str) {
        self.push(Level::Error, msg);
    }

    fn warn(&self, msg: &str) {
        self.push(Level::Warn, msg);
    }

    fn info(&self, msg: &str) {
        self.push(Level::Info, msg);
    }

    fn debug(&self, msg: &str) {
        self.push(Level::Debug, msg);
    }
}

/// Initialize the logging subsystem based on CLI verbosity flags.
///
/// Call once at the start of the application, before any logging calls.
/// A second call is ignored with a debug message rather than panicking.
///
/// # Arguments
///
/// * `verbose` - Verbosity count from CLI (0=normal, 1=debug, 2+=trace)
/// * `quiet` - If true, only show errors (overridden by RUST_LOG)
/// * `no_color` - Disable ANSI styling of the level column
pub fn init_logging(verbose: u8, quiet: bool, no_color: bool) {
    let use_env = env::var("RUST_LOG").is_ok();

    let mut builder = Builder::new();

    if use_env {
        builder.parse_default_env();
    } else {
        builder.filter_level(determine_level(verbose, quiet));
    }

    builder.write_style(if no_color {
        WriteStyle::Never
    } else {
        WriteStyle::Auto
    });

    configure_format(&mut builder, verbose);

    if builder.try_init().is_err() {
        log::debug!("Logger already initialized, keeping existing configuration");
        return;
    }

    if use_env {
        log::debug!(
            "Logging initialized from RUST_LOG environment variable: {:?}",
            env::var("RUST_LOG").ok()
        );
    } else {
        log::debug!(
            "Logging initialized at level: {:?}",
            determine_level(verbose, quiet)
        );
    }
}

/// Determine the log level from CLI flags.
fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Configure the log format based on build type and verbosity.
///
/// - Debug builds: timestamp and level, plus module path at `-v` and above
/// - Release builds: compact format (level + message only)
fn configure_format(builder: &mut Builder, verbose: u8) {
    #[cfg(debug_assertions)]
    {
        builder.format(move |buf, record| {
            let timestamp = buf.timestamp_seconds();
            let level = record.level();
            let level_style = buf.default_level_style(level);

            if verbose >= 1 {
                writeln!(
                    buf,
                    "{} {level_style}{:<5}{level_style:#} [{}] {}",
                    timestamp,
                    level,
                    record.module_path().unwrap_or("unknown"),
                    record.args()
                )
            } else {
                writeln!(
                    buf,
                    "{} {level_style}{:<5}{level_style:#} {}",
                    timestamp,
                    level,
                    record.args()
                )
            }
        });
    }

    #[cfg(not(debug_assertions))]
    {
        let _ = verbose;
        builder.format(|buf, record| {
            let level = record.level();
            let level_style = buf.default_level_style(level);
            writeln!(
                buf,
                "{level_style}{:<5}{level_style:#} {}",
                level,
                record.args()
            )
        });
    }
}
