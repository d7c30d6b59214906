//! Duplicate finder implementation with three ordered matching passes.
//!
//! # Overview
//!
//! [`MatchEngine::run`] matches a source file set against a destination
//! file set and fills one [`DuplicateMap`]:
//!
//! 1. **Pass 1 - Exact name**: destination files with the same file name,
//!    optionally confirmed by content and filtered by minimum size.
//! 2. **Pass 2 - Prefix** (opt-in): destination files whose name starts with
//!    the source name without extension and whose size is identical.
//! 3. **Pass 3 - Content** (opt-in): unclaimed, non-empty sources against
//!    same-size destinations, confirmed byte for byte.
//!
//! Every pass records through [`DuplicateMap::claim`], so a source claimed by
//! an earlier pass is never reprocessed and a pair seen in both directions
//! is counted once.
//!
//! Where several destinations qualify, the first in enumeration order wins.
//! The walker sorts every directory by file name, which makes that choice
//! reproducible.
//!
//! # Example
//!
//! ```no_run
//! use dirdiff::duplicates::{MatchConfig, MatchEngine};
//! use dirdiff::logging::LogFacade;
//! use dirdiff::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let sources = Walker::new(Path::new("phone"), WalkerConfig::default())
//!     .collect_files()
//!     .unwrap();
//! let destinations = Walker::new(Path::new("pics"), WalkerConfig::default())
//!     .collect_files()
//!     .unwrap();
//!
//! let config = MatchConfig::default().with_content(true);
//! let engine = MatchEngine::new(config, &LogFacade);
//! let (map, stats) = engine.run(&sources, &destinations).unwrap();
//! println!("{} duplicates ({} by content)", map.len(), stats.content);
//! ```

use std::collections::{HashMap, HashSet};
use std::ffi::OsStr;
use std::path::Path;

use super::map::{ClaimOutcome, DuplicateMap};
use super::{whole_mb, BYTES_PER_MB};
use crate::logging::LogSink;
use crate::scanner::path_utils::paths_equal;
use crate::scanner::{CompareError, ContentComparator, FileEntry};

/// Errors that abort a matching run.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// Reading file content for comparison failed.
    #[error(transparent)]
    Compare(#[from] CompareError),
}

/// Matching options, fixed for the duration of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchConfig {
    /// Run the prefix pass.
    pub match_prefix: bool,
    /// Confirm name matches by content and run the content pass.
    pub match_content: bool,
    /// Ignore files smaller than this many megabytes (0 = no minimum).
    pub min_size_mb: u64,
    /// Delete duplicate source files instead of reporting them.
    pub delete: bool,
    /// Source and destination are the same tree.
    pub search_only: bool,
}

impl MatchConfig {
    /// Enable or disable the prefix pass.
    #[must_use]
    pub fn with_prefix(mut self, enabled: bool) -> Self {
        self.match_prefix = enabled;
        self
    }

    /// Enable or disable content matching.
    #[must_use]
    pub fn with_content(mut self, enabled: bool) -> Self {
        self.match_content = enabled;
        self
    }

    /// Set the minimum size in megabytes.
    #[must_use]
    pub fn with_min_size_mb(mut self, mb: u64) -> Self {
        self.min_size_mb = mb;
        self
    }

    /// Request deletion of duplicate source files.
    #[must_use]
    pub fn with_delete(mut self, enabled: bool) -> Self {
        self.delete = enabled;
        self
    }

    /// Mark the run as a single-tree search.
    #[must_use]
    pub fn with_search_only(mut self, enabled: bool) -> Self {
        self.search_only = enabled;
        self
    }

    /// Minimum size in bytes.
    #[must_use]
    pub fn min_size_bytes(&self) -> u64 {
        self.min_size_mb.saturating_mul(BYTES_PER_MB)
    }

    /// Whether a file of `size` bytes passes the minimum size filter.
    #[must_use]
    pub fn meets_min_size(&self, size: u64) -> bool {
        self.min_size_mb == 0 || size >= self.min_size_bytes()
    }

    /// Whether a destination of `size` bytes may be a content pass candidate.
    ///
    /// Strictly above the threshold, unlike [`Self::meets_min_size`].
    #[must_use]
    pub fn meets_content_min_size(&self, size: u64) -> bool {
        self.min_size_mb == 0 || size > self.min_size_bytes()
    }
}

/// Pairs recorded by each pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchStats {
    /// Source files considered
    pub source_files: usize,
    /// Destination files considered
    pub destination_files: usize,
    /// Pairs recorded by the exact name pass
    pub exact_name: usize,
    /// Pairs recorded by the prefix pass
    pub prefix: usize,
    /// Pairs recorded by the content pass
    pub content: usize,
    /// Self-matching pairs that were skipped
    pub self_matches: usize,
}

impl MatchStats {
    /// Pairs recorded across all passes.
    #[must_use]
    pub fn total(&self) -> usize {
        self.exact_name + self.prefix + self.content
    }
}

/// The three-pass matcher.
pub struct MatchEngine<'a> {
    config: MatchConfig,
    comparator: ContentComparator,
    log: &'a dyn LogSink,
}

impl std::fmt::Debug for MatchEngine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchEngine")
            .field("config", &self.config)
            .field("comparator", &self.comparator)
            .field("log", &"<sink>")
            .finish()
    }
}

impl<'a> MatchEngine<'a> {
    /// Create an engine reporting to `log`.
    #[must_use]
    pub fn new(config: MatchConfig, log: &'a dyn LogSink) -> Self {
        Self {
            config,
            comparator: ContentComparator::new(),
            log,
        }
    }

    /// The configuration this engine runs with.
    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// The comparator used for content checks.
    #[must_use]
    pub fn comparator(&self) -> &ContentComparator {
        &self.comparator
    }

    /// Run every enabled pass and return the final duplicate map.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError`] when a file cannot be read for comparison.
    pub fn run(
        &self,
        sources: &[FileEntry],
        destinations: &[FileEntry],
    ) -> Result<(DuplicateMap, MatchStats), FinderError> {
        let mut map = DuplicateMap::new();
        let mut stats = MatchStats {
            source_files: sources.len(),
            destination_files: destinations.len(),
            ..Default::default()
        };

        log::debug!(
            "Matching {} source files against {} destination files",
            sources.len(),
            destinations.len()
        );

        self.match_exact_names(sources, destinations, &mut map, &mut stats)?;
        log::debug!("Pass 1 (exact name): {} duplicates", stats.exact_name);

        if self.config.match_prefix {
            self.match_prefixes(sources, destinations, &mut map, &mut stats);
            log::debug!("Pass 2 (prefix): {} duplicates", stats.prefix);
        }

        if self.config.match_content {
            self.match_content(sources, destinations, &mut map, &mut stats)?;
            log::debug!("Pass 3 (content): {} duplicates", stats.content);
        }

        Ok((map, stats))
    }

    /// Pass 1: destinations with exactly the source's file name.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError`] when content confirmation fails to read a file.
    pub fn match_exact_names(
        &self,
        sources: &[FileEntry],
        destinations: &[FileEntry],
        map: &mut DuplicateMap,
        stats: &mut MatchStats,
    ) -> Result<(), FinderError> {
        let mut by_name: HashMap<&OsStr, Vec<&FileEntry>> = HashMap::new();
        for dest in destinations {
            by_name.entry(dest.file_name()).or_default().push(dest);
        }

        for src in sources {
            let Some(matches) = by_name.get(src.file_name()) else {
                continue;
            };

            for dest in matches {
                if paths_equal(&src.path, &dest.path) {
                    self.skip_self_match(1, &src.path, true, stats);
                    continue;
                }

                if map.contains_source(&src.path) {
                    break;
                }

                if self.config.match_content
                    && !self.comparator.are_equal(&dest.path, &src.path)?
                {
                    continue;
                }

                if !self.config.meets_min_size(src.size) {
                    continue;
                }

                if self.record(map, src, &dest.path).is_recorded() {
                    stats.exact_name += 1;
                }
            }
        }

        Ok(())
    }

    /// Pass 2: destinations whose name starts with the source's stem and
    /// whose size is identical. No content is read.
    pub fn match_prefixes(
        &self,
        sources: &[FileEntry],
        destinations: &[FileEntry],
        map: &mut DuplicateMap,
        stats: &mut MatchStats,
    ) {
        // One destination per distinct name: the first one enumerated.
        let mut seen = HashSet::new();
        let first_by_name: Vec<&FileEntry> = destinations
            .iter()
            .filter(|dest| seen.insert(dest.file_name()))
            .collect();

        for src in sources {
            if map.contains_source(&src.path) {
                continue;
            }

            let stem = src.stem();
            if stem.is_empty() {
                continue;
            }

            for dest in &first_by_name {
                if !dest.name().starts_with(stem.as_ref()) {
                    continue;
                }

                if paths_equal(&src.path, &dest.path) {
                    self.skip_self_match(2, &src.path, false, stats);
                    continue;
                }

                if src.size != dest.size {
                    self.log.warn(&format!(
                        "Skipping prefix matched files with diff content lengths, {}",
                        src.path.display()
                    ));
                    self.log.info(&format!(
                        "- {} => {}",
                        src.path.display(),
                        dest.path.display()
                    ));
                    continue;
                }

                if self.record(map, src, &dest.path).is_recorded() {
                    stats.prefix += 1;
                }
            }
        }
    }

    /// Pass 3: byte-for-byte matches among same-size files.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError`] when a file cannot be read.
    pub fn match_content(
        &self,
        sources: &[FileEntry],
        destinations: &[FileEntry],
        map: &mut DuplicateMap,
        stats: &mut MatchStats,
    ) -> Result<(), FinderError> {
        let mut by_size: HashMap<u64, Vec<&FileEntry>> = HashMap::new();
        for dest in destinations
            .iter()
            .filter(|dest| self.config.meets_content_min_size(dest.size))
        {
            by_size.entry(dest.size).or_default().push(dest);
        }

        for src in sources {
            if let Some(pair) = map.get(&src.path) {
                self.log.debug(&format!(
                    "Skip content check for known dupe {} => {}",
                    src.path.display(),
                    pair.destination.display()
                ));
                continue;
            }

            // Empty files are placeholders that exist for a reason.
            if src.size == 0 {
                continue;
            }

            let Some(candidates) = by_size.get(&src.size) else {
                continue;
            };

            for dest in candidates.iter().filter(|dest| dest.path != src.path) {
                if !self.comparator.are_equal(&src.path, &dest.path)? {
                    continue;
                }

                self.log.debug(&format!(
                    "Content Match, {} MB {} => {}",
                    whole_mb(src.size),
                    src.path.display(),
                    dest.path.display()
                ));

                if paths_equal(&src.path, &dest.path) {
                    self.skip_self_match(3, &src.path, true, stats);
                    continue;
                }

                match self.record(map, src, &dest.path) {
                    ClaimOutcome::Recorded => {
                        stats.content += 1;
                        break;
                    }
                    ClaimOutcome::DestinationClaimed => continue,
                    ClaimOutcome::AlreadyClaimed
                    | ClaimOutcome::Reversed
                    | ClaimOutcome::SourceIsKept => break,
                }
            }
        }

        Ok(())
    }

    fn record(&self, map: &mut DuplicateMap, src: &FileEntry, dest: &Path) -> ClaimOutcome {
        let outcome = map.claim(&src.path, src.size, dest);
        if !outcome.is_recorded() {
            log::trace!(
                "Not recording {} => {}: {:?}",
                src.path.display(),
                dest.display(),
                outcome
            );
        }
        outcome
    }

    /// Handle a candidate pair whose two sides are the same file.
    ///
    /// Silent in search-only mode when `silent_when_searching` is set,
    /// otherwise a warning naming the pass.
    fn skip_self_match(
        &self,
        pass: u8,
        path: &Path,
        silent_when_searching: bool,
        stats: &mut MatchStats,
    ) {
        stats.self_matches += 1;
        if silent_when_searching && self.config.search_only {
            return;
        }
        self.log.warn(&self_match_warning(pass, path));
    }
}

/// Warning for a pair whose source and destination are one file.
#[must_use]
pub fn self_match_warning(pass: u8, path: &Path) -> String {
    format!(
        "{} Check args!  Ignoring to avoid deleting only copy.  Source and Dest path match {}",
        pass,
        path.display()
    )
}
