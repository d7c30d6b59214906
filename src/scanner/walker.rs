//! Directory walker implementation using walkdir.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for recursively listing every
//! file under a root that matches a glob filter. Children are visited in
//! file-name order so the encounter order is the same on every platform;
//! the matching passes rely on it when they have to pick one file out of
//! several equally good candidates.
//!
//! # Example
//!
//! ```no_run
//! use dirdiff::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Pictures"), WalkerConfig::default());
//! let files = walker.collect_files().unwrap();
//! println!("Found {} files", files.len());
//! ```

use std::path::{Path, PathBuf};

use ignore::overrides::{Override, OverrideBuilder};
use walkdir::WalkDir;

use super::{FileEntry, ScanError, WalkerConfig};

/// Directory walker for recursive file discovery.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given path.
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
        }
    }

    /// Root directory of this walker.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Compile the glob filter into an include-only matcher.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidFilter`] when the glob does not parse.
    pub fn build_filter(root: &Path, pattern: &str) -> Result<Override, ScanError> {
        let invalid = |e: ignore::Error| ScanError::InvalidFilter {
            pattern: pattern.to_string(),
            message: e.to_string(),
        };

        let mut builder = OverrideBuilder::new(root);
        builder.case_insensitive(true).map_err(invalid)?;
        builder.add(pattern).map_err(invalid)?;
        builder.build().map_err(invalid)
    }

    /// Walk the directory tree, yielding file entries.
    ///
    /// Errors are yielded as [`ScanError`] values; a broken filter is
    /// reported as the only item.
    pub fn walk(&self) -> impl Iterator<Item = Result<FileEntry, ScanError>> + '_ {
        let (filter, setup_error) = match Self::build_filter(&self.root, &self.config.filter) {
            Ok(filter) => (Some(filter), None),
            Err(e) => (None, Some(e)),
        };

        let entries = filter.as_ref().map(|_| {
            WalkDir::new(&self.root)
                .min_depth(1)
                .follow_links(self.config.follow_symlinks)
                .sort_by_file_name()
                .into_iter()
        });

        setup_error.map(Err).into_iter().chain(
            entries
                .into_iter()
                .flatten()
                .filter_map(move |entry| self.process_entry(entry, filter.as_ref())),
        )
    }

    /// Walk the whole tree, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first [`ScanError`] met during traversal.
    pub fn collect_files(&self) -> Result<Vec<FileEntry>, ScanError> {
        let files = self.walk().collect::<Result<Vec<_>, _>>()?;
        log::debug!(
            "Found {} files under {} matching '{}'",
            files.len(),
            self.root.display(),
            self.config.filter
        );
        Ok(files)
    }

    /// Turn a walkdir entry into a FileEntry if it is a matching regular file.
    fn process_entry(
        &self,
        entry: walkdir::Result<walkdir::DirEntry>,
        filter: Option<&Override>,
    ) -> Option<Result<FileEntry, ScanError>> {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => return Some(Err(self.handle_walk_error(e))),
        };

        let file_type = entry.file_type();
        if file_type.is_dir() {
            return None;
        }

        if file_type.is_symlink() && !self.config.follow_symlinks {
            log::trace!("Skipping symlink: {}", entry.path().display());
            return None;
        }

        if !file_type.is_file() && !file_type.is_symlink() {
            return None;
        }

        if let Some(filter) = filter {
            if !filter.matched(entry.path(), false).is_whitelist() {
                log::trace!("Filtered out: {}", entry.path().display());
                return None;
            }
        }

        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => return Some(Err(self.handle_walk_error(e))),
        };

        if !metadata.is_file() {
            return None;
        }

        Some(Ok(FileEntry::new(entry.into_path(), metadata.len())))
    }

    /// Classify a walkdir error.
    fn handle_walk_error(&self, error: walkdir::Error) -> ScanError {
        use std::io::ErrorKind;

        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);

        match error.io_error().map(std::io::Error::kind) {
            Some(ErrorKind::PermissionDenied) => {
                log::debug!("Permission denied: {}", path.display());
                ScanError::PermissionDenied(path)
            }
            Some(ErrorKind::NotFound) => {
                log::debug!("Path not found: {}", path.display());
                ScanError::NotFound(path)
            }
            _ => ScanError::Io {
                path,
                source: error
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk failed")),
            },
        }
    }
}
