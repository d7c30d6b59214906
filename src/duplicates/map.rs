//! The duplicate map shared by all matching passes.
//!
//! # Overview
//!
//! A [`DuplicateMap`] maps a source file (the copy that may be deleted) to
//! exactly one destination file (the copy that is kept). Keys compare
//! case-insensitively after Unicode normalization, and iteration is ordered
//! by key so reports are reproducible.
//!
//! Every insertion goes through [`DuplicateMap::claim`], which enforces:
//!
//! - the first claim on a source wins;
//! - a pair already recorded with its endpoints swapped is the same
//!   duplicate and is not recorded twice;
//! - a file that some recorded pair keeps is never itself marked for
//!   deletion, and a file already marked for deletion is never chosen as
//!   the kept copy.
//!
//! Together these guarantee that deleting every key leaves at least one
//! copy of each duplicate set on disk.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use crate::scanner::path_utils::path_key;

/// One recorded duplicate pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicatePair {
    /// The source file (candidate for deletion)
    pub source: PathBuf,
    /// Size of the source file in bytes
    pub size: u64,
    /// The matching destination file (kept)
    pub destination: PathBuf,
}

/// Result of attempting to record a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The pair was recorded.
    Recorded,
    /// The source was already claimed by an earlier match.
    AlreadyClaimed,
    /// The same pair is already recorded with source and destination swapped.
    Reversed,
    /// The source is the kept copy of a recorded pair.
    SourceIsKept,
    /// The destination is already marked for deletion.
    DestinationClaimed,
}

impl ClaimOutcome {
    /// Whether the pair ended up in the map.
    #[must_use]
    pub fn is_recorded(self) -> bool {
        self == Self::Recorded
    }
}

/// Source path → destination path, one destination per source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateMap {
    entries: BTreeMap<String, DuplicatePair>,
    kept: HashSet<String>,
}

impl DuplicateMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no pair has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `source` is already claimed as a key.
    #[must_use]
    pub fn contains_source(&self, source: &Path) -> bool {
        self.entries.contains_key(&path_key(source))
    }

    /// Destination recorded for `source`, if any.
    #[must_use]
    pub fn get(&self, source: &Path) -> Option<&DuplicatePair> {
        self.entries.get(&path_key(source))
    }

    /// Whether `destination` is recorded as a key mapping back to `source`.
    #[must_use]
    pub fn is_reversed(&self, source: &Path, destination: &Path) -> bool {
        self.entries
            .get(&path_key(destination))
            .is_some_and(|pair| path_key(&pair.destination) == path_key(source))
    }

    /// Try to record `source -> destination`.
    pub fn claim(&mut self, source: &Path, size: u64, destination: &Path) -> ClaimOutcome {
        let source_key = path_key(source);
        let destination_key = path_key(destination);

        if self.entries.contains_key(&source_key) {
            return ClaimOutcome::AlreadyClaimed;
        }
        if self.is_reversed(source, destination) {
            return ClaimOutcome::Reversed;
        }
        if self.kept.contains(&source_key) {
            return ClaimOutcome::SourceIsKept;
        }
        if self.entries.contains_key(&destination_key) {
            return ClaimOutcome::DestinationClaimed;
        }

        self.kept.insert(destination_key);
        self.entries.insert(
            source_key,
            DuplicatePair {
                source: source.to_path_buf(),
                size,
                destination: destination.to_path_buf(),
            },
        );
        ClaimOutcome::Recorded
    }

    /// Recorded pairs, ordered by source key.
    pub fn iter(&self) -> impl Iterator<Item = &DuplicatePair> {
        self.entries.values()
    }

    /// Total size of all source files in bytes.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.iter().map(|pair| pair.size).sum()
    }
}

impl<'a> IntoIterator for &'a DuplicateMap {
    type Item = &'a DuplicatePair;
    type IntoIter = std::collections::btree_map::Values<'a, String, DuplicatePair>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}
