//! Application configuration management.
//!
//! Two layers feed a run:
//! - [`Config`], optional user defaults stored as `config.json` in the
//!   platform config directory (default filter, default minimum size).
//! - [`DedupePlan`], the validated, immutable configuration of one dedupe
//!   run, built from the parsed command line with [`Config`] filling gaps.
//!
//! Command-line values always win over the defaults file.

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::DedupeArgs;
use crate::duplicates::MatchConfig;
use crate::error::ConfigError;
use crate::logging::LogSink;
use crate::scanner::{ScanError, Walker, DEFAULT_FILTER};

/// User defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Filter used when `--filter` is not given.
    #[serde(default = "default_filter")]
    pub default_filter: String,

    /// Minimum size in megabytes used when `--min-mb` is not given.
    #[serde(default)]
    pub default_min_size_mb: u64,
}

fn default_filter() -> String {
    DEFAULT_FILTER.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_filter: default_filter(),
            default_min_size_mb: 0,
        }
    }
}

impl Config {
    /// Load the configuration from the default platform-specific path.
    ///
    /// A missing or unreadable file yields the defaults.
    pub fn load() -> Self {
        match Self::config_path().and_then(|path| Self::load_from(&path)) {
            Ok(config) => config,
            Err(e) => {
                log::debug!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        }
    }

    /// Load the configuration from `path`, or the defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Fails when the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Get the default platform-specific configuration path.
    ///
    /// # Errors
    ///
    /// Fails when no home directory can be found.
    pub fn config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("com", "dirdiff", "dirdiff")
            .ok_or_else(|| anyhow::anyhow!("Failed to determine project directories"))?;
        Ok(project_dirs.config_dir().join("config.json"))
    }

    /// The filter to use, preferring an explicit one.
    #[must_use]
    pub fn filter_or_default(&self, explicit: Option<&str>) -> String {
        explicit
            .filter(|f| !f.trim().is_empty())
            .unwrap_or(&self.default_filter)
            .to_string()
    }
}

/// Validated settings for one dedupe run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupePlan {
    /// Absolute source directory
    pub source: PathBuf,
    /// Absolute destination directory (equal to `source` in search-only mode)
    pub destination: PathBuf,
    /// Glob applied to both trees
    pub filter: String,
    /// Matching options
    pub matching: MatchConfig,
}

impl DedupePlan {
    /// Validate parsed arguments and build the plan.
    ///
    /// Every problem found is logged at error level; the first one is returned.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when a directory is missing or invalid, the
    /// modes conflict, or the filter does not parse.
    pub fn from_args(
        args: &DedupeArgs,
        defaults: &Config,
        log: &dyn LogSink,
    ) -> Result<Self, ConfigError> {
        let result = Self::validate(args, defaults);
        if let Err(errors) = &result {
            for error in errors {
                log.error(&error.to_string());
            }
        }
        result.map_err(|mut errors| errors.swap_remove(0))
    }

    fn validate(args: &DedupeArgs, defaults: &Config) -> Result<Self, Vec<ConfigError>> {
        let src = non_empty(args.src.as_deref());
        let dest = non_empty(args.dest.as_deref());
        let src_only = non_empty(args.src_only.as_deref());

        let (source, destination) = match (src_only, src, dest) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
                return Err(vec![ConfigError::ConflictingModes])
            }
            (Some(dir), None, None) => (dir, dir),
            (None, src, dest) => {
                let mut errors = Vec::new();
                if src.is_none() {
                    errors.push(ConfigError::MissingSource);
                }
                if dest.is_none() {
                    errors.push(ConfigError::MissingDestination);
                }
                match (src, dest) {
                    (Some(src), Some(dest)) => (src, dest),
                    _ => return Err(errors),
                }
            }
        };

        let mut errors = Vec::new();
        for dir in [source, destination] {
            let not_a_dir = ConfigError::NotADirectory(dir.to_path_buf());
            if !dir.is_dir() && !errors.contains(&not_a_dir) {
                errors.push(not_a_dir);
            }
        }

        let filter = defaults.filter_or_default(args.filter.as_deref());
        if let Err(ScanError::InvalidFilter { pattern, message }) =
            Walker::build_filter(source, &filter)
        {
            errors.push(ConfigError::InvalidFilter { pattern, message });
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let matching = MatchConfig::default()
            .with_prefix(args.match_prefix)
            .with_content(args.match_content)
            .with_min_size_mb(args.min_mb.unwrap_or(defaults.default_min_size_mb))
            .with_delete(args.del_dupe_src)
            .with_search_only(src_only.is_some());

        Ok(Self {
            source: absolute(source),
            destination: absolute(destination),
            filter,
            matching,
        })
    }
}

fn non_empty(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| !p.as_os_str().is_empty())
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
