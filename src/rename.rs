//! Rename device-captured media files to a date-based scheme.
//!
//! Phones name captures after their timestamp (`20200517_142301.jpg`,
//! `VID_20200517_142301.mp4`). This module rewrites such names in place to
//! `2020-05-17 14-23-01_(mob)_<rest>` so they sort and read like the rest of
//! a curated collection.
//!
//! ```no_run
//! use dirdiff::logging::LogFacade;
//! use dirdiff::rename::rename_mobile_files;
//! use std::path::Path;
//!
//! let summary = rename_mobile_files(Path::new("phone"), "*", &LogFacade).unwrap();
//! println!("renamed {} of {} files", summary.renamed, summary.scanned);
//! ```

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::logging::LogSink;
use crate::scanner::{ScanError, Walker, WalkerConfig};

static VIDEO_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"VID_([0-9]{4})([0-9]{2})([0-9]{2})_([0-9]{2})([0-9]{2})([0-9]{2})(.*)")
        .expect("video name pattern is valid")
});

static PHOTO_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{4})([0-9]{2})([0-9]{2})_([0-9]{2})([0-9]{2})([0-9]{2})(.*)")
        .expect("photo name pattern is valid")
});

const TARGET_NAME: &str = "${1}-${2}-${3} ${4}-${5}-${6}_(mob)_${7}";

/// Errors that abort a rename run.
#[derive(thiserror::Error, Debug)]
pub enum RenameError {
    /// Listing the directory failed.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// Moving a file failed.
    #[error("failed to rename {from} to {to}: {source}")]
    Io {
        /// Original path
        from: PathBuf,
        /// Intended new path
        to: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Counts from a rename run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenameSummary {
    /// Files enumerated
    pub scanned: usize,
    /// Files renamed
    pub renamed: usize,
    /// Mobile-looking files left alone (target exists or no date found)
    pub skipped: usize,
}

/// Whether `name` looks like a file straight off a phone.
///
/// No `-`, at least one `_`, and either a `VID_*.mp4` video or exactly one
/// `_` overall.
#[must_use]
pub fn is_mobile_file_name(name: &str) -> bool {
    if name.trim().is_empty() || name.contains('-') || !name.contains('_') {
        return false;
    }

    if name.starts_with("VID_") && name.ends_with(".mp4") {
        return true;
    }

    name.find('_') == name.rfind('_')
}

/// The normalized name for a mobile file, or `None` if no timestamp is found.
#[must_use]
pub fn normalized_name(name: &str) -> Option<String> {
    let pattern = if name.starts_with("VID_") {
        &*VIDEO_NAME
    } else {
        &*PHOTO_NAME
    };

    match pattern.replace(name, TARGET_NAME) {
        Cow::Owned(renamed) => Some(renamed),
        Cow::Borrowed(_) => None,
    }
}

/// Rename every mobile file under `root` matching `filter`.
///
/// # Errors
///
/// Returns [`RenameError`] on the first listing or rename failure.
pub fn rename_mobile_files(
    root: &Path,
    filter: &str,
    log: &dyn LogSink,
) -> Result<RenameSummary, RenameError> {
    let files = Walker::new(root, WalkerConfig::with_filter(filter)).collect_files()?;
    let mut summary = RenameSummary {
        scanned: files.len(),
        ..Default::default()
    };

    for file in files {
        let name = file.name();
        if !is_mobile_file_name(&name) {
            continue;
        }

        let Some(new_name) = normalized_name(&name) else {
            log.warn(&format!(
                "Dest File already exists, srcFilePath={}",
                file.path.display()
            ));
            summary.skipped += 1;
            continue;
        };

        let dir = file.path.parent().unwrap_or(root);
        log.info(&format!(
            "Is mobile :{} -> {} {} {}",
            name,
            new_name,
            file.path.display(),
            dir.display()
        ));

        let target = dir.join(&new_name);
        if target.try_exists().unwrap_or(true) {
            log.warn(&format!(
                "Dest File already exists, srcFilePath={}",
                file.path.display()
            ));
            summary.skipped += 1;
            continue;
        }

        fs::rename(&file.path, &target).map_err(|source| RenameError::Io {
            from: file.path.clone(),
            to: target.clone(),
            source,
        })?;
        summary.renamed += 1;
    }

    Ok(summary)
}
