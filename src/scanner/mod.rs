//! Scanner module for directory traversal and file comparison.
//!
//! This module provides functionality for:
//! - Recursive, glob-filtered directory walking using walkdir
//! - Byte-exact content comparison of two files
//! - Case-insensitive, Unicode-normalized path keys
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`walker`]: Directory traversal and file discovery
//! - [`compare`]: Chunked byte-for-byte file comparison
//! - [`path_utils`]: Path normalization and comparison keys
//!
//! # Example
//!
//! ```no_run
//! use dirdiff::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let config = WalkerConfig::with_filter("*.jpg");
//! let walker = Walker::new(Path::new("."), config);
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(file) => println!("{}: {} bytes", file.path.display(), file.size),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```

pub mod compare;
pub mod path_utils;
pub mod walker;

use std::borrow::Cow;
use std::ffi::OsStr;
use std::path::PathBuf;

// Re-export main types
pub use compare::{CompareStats, ContentComparator, CHUNK_SIZE};
pub use walker::Walker;

/// Default file filter: every file.
pub const DEFAULT_FILTER: &str = "*";

/// A discovered file.
///
/// The name and the name without extension are derived from the path on
/// demand; the size is captured from metadata when the file is enumerated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Absolute path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

impl FileEntry {
    /// Create a new FileEntry.
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self { path, size }
    }

    /// The final path component as the OS reports it.
    #[must_use]
    pub fn file_name(&self) -> &OsStr {
        self.path.file_name().unwrap_or_default()
    }

    /// The file name, lossily converted for display and prefix matching.
    #[must_use]
    pub fn name(&self) -> Cow<'_, str> {
        self.file_name().to_string_lossy()
    }

    /// The file name without its extension.
    #[must_use]
    pub fn stem(&self) -> Cow<'_, str> {
        self.path
            .file_stem()
            .map(OsStr::to_string_lossy)
            .unwrap_or_default()
    }
}

/// Configuration for directory walking.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Glob applied to every file (`*`, `*.jpg`, `IMG_*`).
    ///
    /// A pattern without a `/` matches the file name at any depth.
    pub filter: String,

    /// Follow symbolic links during traversal.
    pub follow_symlinks: bool,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            follow_symlinks: false,
        }
    }
}

impl WalkerConfig {
    /// Create a configuration with the given glob filter.
    #[must_use]
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
            ..Default::default()
        }
    }
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// The file filter could not be compiled.
    #[error("Invalid file filter '{pattern}': {message}")]
    InvalidFilter {
        /// Offending glob
        pattern: String,
        /// Parser message
        message: String,
    },

    /// An I/O error occurred while accessing a file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur while comparing file contents.
#[derive(thiserror::Error, Debug)]
pub enum CompareError {
    /// An I/O error occurred while reading one of the files.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
