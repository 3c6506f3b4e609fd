//! Runtime configuration resolved from the environment.
//!
//! # Responsibility
//! - Resolve the database path and logging settings for front ends.
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - Resolution never fails; invalid log levels surface at `init_logging`.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "CALORIE_TRACKER_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "CALORIE_TRACKER_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "CALORIE_TRACKER_LOG_DIR";
pub const DEFAULT_DB_FILE_NAME: &str = "calorie_tracker.sqlite3";

/// Effective settings for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    /// File logging is disabled when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl TrackerConfig {
    /// Reads settings from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults.
    ///
    /// Every value is trimmed, paths included, so a path cannot start or
    /// end with whitespace.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();
        Self {
            db_path: read(DB_PATH_ENV).map_or(defaults.db_path, PathBuf::from),
            log_level: read(LOG_LEVEL_ENV).unwrap_or(defaults.log_level),
            log_dir: read(LOG_DIR_ENV).map(PathBuf::from),
        }
    }
}

/// Default database location inside the platform temp directory.
pub fn default_db_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::{default_db_path, TrackerConfig, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn missing_values_fall_back_to_defaults() {
        let config = TrackerConfig::from_lookup(lookup(&[]));
        assert_eq!(config, TrackerConfig::default());
        assert_eq!(config.db_path, default_db_path());
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn explicit_values_override_defaults_and_blanks_are_ignored() {
        let config = TrackerConfig::from_lookup(lookup(&[
            (DB_PATH_ENV, " /data/calories.db "),
            (LOG_LEVEL_ENV, "warn"),
            (LOG_DIR_ENV, "   "),
        ]));
        assert_eq!(config.db_path, PathBuf::from("/data/calories.db"));
        assert_eq!(config.log_level, "warn");
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn path_values_are_trimmed() {
        let config = TrackerConfig::from_lookup(lookup(&[
            (DB_PATH_ENV, "\t/data/my calories.db\n"),
            (LOG_DIR_ENV, "  /var/log/calories  "),
        ]));
        assert_eq!(config.db_path, PathBuf::from("/data/my calories.db"));
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/calories")));
    }
}
