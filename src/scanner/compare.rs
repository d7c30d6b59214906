//! Byte-exact file comparison.
//!
//! # Overview
//!
//! [`ContentComparator::are_equal`] answers whether two files hold the same
//! bytes. It never reads content when it does not have to:
//!
//! 1. Two spellings of the same path are equal without any I/O.
//! 2. Files whose sizes differ are unequal after a metadata lookup only.
//! 3. Otherwise both files are streamed in [`CHUNK_SIZE`]-byte words and
//!    compared word by word, stopping at the first difference.
//!
//! Both read handles are owned by the comparison call and closed on every
//! exit path, including the early return on a mismatch.
//!
//! # Example
//!
//! ```no_run
//! use dirdiff::scanner::ContentComparator;
//! use std::path::Path;
//!
//! let comparator = ContentComparator::new();
//! let same = comparator.are_equal(Path::new("a.jpg"), Path::new("b.jpg")).unwrap();
//! println!("identical: {}", same);
//! ```

use std::cell::Cell;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use super::path_utils::paths_equal;
use super::CompareError;

/// Comparison word size: one native 64-bit word.
pub const CHUNK_SIZE: usize = std::mem::size_of::<u64>();

/// Read-ahead buffer behind each word reader.
const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Counters describing the work a comparator has done.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompareStats {
    /// Calls to [`ContentComparator::are_equal`]
    pub comparisons: usize,
    /// Calls answered by path equality alone
    pub same_path: usize,
    /// Calls answered by a size mismatch alone
    pub size_mismatches: usize,
    /// File handles opened for content reads
    pub handles_opened: usize,
    /// Words compared across all calls
    pub chunks_compared: u64,
}

/// Byte-for-byte file comparator.
///
/// Single-threaded by construction: the statistics live in a [`Cell`].
#[derive(Debug, Default)]
pub struct ContentComparator {
    stats: Cell<CompareStats>,
}

impl ContentComparator {
    /// Create a comparator with zeroed statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Work done so far.
    #[must_use]
    pub fn stats(&self) -> CompareStats {
        self.stats.get()
    }

    fn record(&self, update: impl FnOnce(&mut CompareStats)) {
        let mut stats = self.stats.get();
        update(&mut stats);
        self.stats.set(stats);
    }

    /// Check whether two files have identical content.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError::Io`] if either file cannot be inspected or read.
    pub fn are_equal(&self, first: &Path, second: &Path) -> Result<bool, CompareError> {
        self.record(|s| s.comparisons += 1);

        if paths_equal(first, second) {
            self.record(|s| s.same_path += 1);
            return Ok(true);
        }

        let first_len = file_len(first)?;
        let second_len = file_len(second)?;
        if first_len != second_len {
            self.record(|s| s.size_mismatches += 1);
            return Ok(false);
        }

        let mut one = open(first)?;
        self.record(|s| s.handles_opened += 1);
        let mut two = open(second)?;
        self.record(|s| s.handles_opened += 1);

        let mut word_one = [0u8; CHUNK_SIZE];
        let mut word_two = [0u8; CHUNK_SIZE];
        let mut chunks = 0u64;

        let result = loop {
            let read_one = read_word(&mut one, &mut word_one).map_err(|e| io_error(first, e))?;
            let read_two = read_word(&mut two, &mut word_two).map_err(|e| io_error(second, e))?;

            if read_one == 0 && read_two == 0 {
                break true;
            }
            chunks += 1;

            if read_one != read_two
                || u64::from_ne_bytes(word_one) != u64::from_ne_bytes(word_two)
            {
                break false;
            }
        };

        self.record(|s| s.chunks_compared += chunks);
        Ok(result)
    }
}

fn io_error(path: &Path, source: io::Error) -> CompareError {
    CompareError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn file_len(path: &Path) -> Result<u64, CompareError> {
    std::fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| io_error(path, e))
}

fn open(path: &Path) -> Result<BufReader<File>, CompareError> {
    File::open(path)
        .map(|f| BufReader::with_capacity(READ_BUFFER_SIZE, f))
        .map_err(|e| io_error(path, e))
}

/// Fill `word` from `reader`, returning how many bytes were read.
///
/// A short final read leaves the unread tail zeroed so both sides of a
/// comparison see the same padding.
fn read_word(reader: &mut impl Read, word: &mut [u8; CHUNK_SIZE]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < CHUNK_SIZE {
        match reader.read(&mut word[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    word[filled..].fill(0);
    Ok(filled)
}
