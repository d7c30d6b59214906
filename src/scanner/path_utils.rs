//! Path normalization utilities.
//!
//! Paths are compared the way the duplicate map stores them: Unicode NFC
//! form, then lowercased. Two spellings that differ only in normalization
//! form or letter case denote the same entry.
//!
//! # Background
//!
//! macOS uses NFD (Decomposed) normalization for file paths, while Windows
//! and Linux typically use NFC (Composed) normalization. This means the same
//! visual filename can have different byte representations:
//!
//! - NFC: `café.txt` - 'é' is U+00E9 (single code point)
//! - NFD: `café.txt` - 'e' U+0065 + combining acute accent U+0301
//!
//! # Example
//!
//! ```
//! use dirdiff::scanner::path_utils::{path_key, paths_equal};
//! use std::path::Path;
//!
//! assert!(paths_equal(Path::new("C:/Pics/IMG.jpg"), Path::new("c:/pics/img.JPG")));
//! assert_eq!(path_key(Path::new("cafe\u{0301}.txt")), "café.txt");
//! ```

use std::path::Path;
use unicode_normalization::UnicodeNormalization;

/// Normalize a path string to NFC (Composed) form.
///
/// # Example
///
/// ```
/// use dirdiff::scanner::path_utils::normalize_path_str;
///
/// let nfd = "cafe\u{0301}.txt"; // NFD form
/// assert_eq!(normalize_path_str(nfd), "café.txt");
/// ```
#[must_use]
pub fn normalize_path_str(s: &str) -> String {
    s.nfc().collect()
}

/// Create a comparison key for a path.
///
/// The key is NFC-normalized and lowercased, so it is suitable for
/// case-insensitive map keys. Invalid UTF-8 is converted lossily.
#[must_use]
pub fn path_key(path: &Path) -> String {
    normalize_path_str(&path.to_string_lossy()).to_lowercase()
}

/// Check whether two paths denote the same entry, ignoring case and
/// Unicode normalization form.
#[must_use]
pub fn paths_equal(a: &Path, b: &Path) -> bool {
    a == b || path_key(a) == path_key(b)
}
