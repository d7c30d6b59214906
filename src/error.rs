//! Structured error handling and exit codes.

use serde::Serialize;
use std::path::PathBuf;

/// Exit codes for the DirDiff application.
///
/// - 0: Success (completed normally, including help/version requests)
/// - 1: General error (invalid configuration or an unhandled I/O failure)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: Run completed.
    Success = 0,
    /// General error: Configuration was rejected or the run aborted.
    GeneralError = 1,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DD000",
            Self::GeneralError => "DD001",
        }
    }
}

/// Problems found while turning parsed arguments into a run configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No source directory (and no search-only directory) was given.
    #[error("Expected non empty --src")]
    MissingSource,

    /// No destination directory (and no search-only directory) was given.
    #[error("Expected non empty --dest")]
    MissingDestination,

    /// Search-only mode was combined with an explicit source or destination.
    #[error("--src-only cannot be combined with --src or --dest")]
    ConflictingModes,

    /// The file filter is not a valid glob.
    #[error("Invalid file filter '{pattern}': {message}")]
    InvalidFilter {
        /// Offending glob
        pattern: String,
        /// Parser message
        message: String,
    },

    /// A directory argument does not point at a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "DD001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message including its cause chain
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{:#}", err),
        }
    }
}
