//! Final report or deletion over a duplicate map.
//!
//! [`resolve`] walks the map once in key order. Each pair is either reported
//! as `{mb} MB "source" => "destination"` or, when deletion is requested,
//! its source file is deleted. A two-line summary closes the run.

use super::delete::{permanent_delete, DeleteError};
use crate::duplicates::{whole_mb, DuplicateMap};
use crate::logging::LogSink;

/// What [`resolve`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveSummary {
    /// Duplicate pairs in the map
    pub duplicates: usize,
    /// Source files that were scanned
    pub scanned: usize,
    /// Sum of the sizes of all duplicate source files
    pub total_bytes: u64,
    /// Files actually deleted
    pub deleted: usize,
}

impl ResolveSummary {
    /// Duplicate data in whole megabytes, truncating.
    #[must_use]
    pub fn total_mb(&self) -> u64 {
        whole_mb(self.total_bytes)
    }
}

/// Report every duplicate, or delete every duplicate source file.
///
/// # Errors
///
/// Stops at the first file that cannot be deleted. Files deleted before the
/// failure stay deleted.
pub fn resolve(
    map: &DuplicateMap,
    scanned: usize,
    delete: bool,
    log: &dyn LogSink,
) -> Result<ResolveSummary, DeleteError> {
    let mut summary = ResolveSummary {
        duplicates: map.len(),
        scanned,
        ..Default::default()
    };

    for pair in map {
        summary.total_bytes += pair.size;

        if delete {
            log.info(&format!("Deleting {}", pair.source.display()));
            permanent_delete(&pair.source)?;
            summary.deleted += 1;
        } else {
            log.info(&format!(
                "{} MB \"{}\" => \"{}\"",
                whole_mb(pair.size),
                pair.source.display(),
                pair.destination.display()
            ));
        }
    }

    log.info("Duplicate data summary:");
    log.info(&format!(
        "- Dupe files... {}/{}",
        summary.duplicates, summary.scanned
    ));
    log.info(&format!("- Dupe data...  {} MB", summary.total_mb()));

    Ok(summary)
}
