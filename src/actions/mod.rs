//! File actions module.
//!
//! This module provides the terminal step of a dedupe run:
//! - Reporting each duplicate pair with its size
//! - Permanent deletion of duplicate source files
//! - The closing summary (count and total size)
//!
//! ```no_run
//! use dirdiff::actions::resolve;
//! use dirdiff::duplicates::DuplicateMap;
//! use dirdiff::logging::LogFacade;
//!
//! let map = DuplicateMap::new();
//! let summary = resolve(&map, 0, false, &LogFacade).unwrap();
//! println!("{} MB of duplicates", summary.total_mb());
//! ```

pub mod delete;
pub mod resolve;

// Re-export commonly used types
pub use delete::{permanent_delete, DeleteError};
pub use resolve::{resolve, ResolveSummary};
