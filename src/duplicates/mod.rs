//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Exact file name matching (Pass 1)
//! - File name prefix matching (Pass 2)
//! - Byte-for-byte content matching (Pass 3)
//! - The shared duplicate map all passes write into

pub mod finder;
pub mod map;

pub use finder::{FinderError, MatchConfig, MatchEngine, MatchStats};
pub use map::{ClaimOutcome, DuplicateMap, DuplicatePair};

/// Bytes in one megabyte as used for thresholds and reports.
pub const BYTES_PER_MB: u64 = 1024 * 1024;

/// Whole megabytes in `bytes`, truncating.
#[must_use]
pub fn whole_mb(bytes: u64) -> u64 {
    bytes / BYTES_PER_MB
}
