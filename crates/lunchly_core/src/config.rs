//! Runtime configuration for processes embedding Lunchly core.
//!
//! # Responsibility
//! - Resolve database location and logging settings from the environment.
//! - Reject unusable values before any storage or logging bootstrap runs.
//!
//! # Invariants
//! - `log_level` is always one of `trace|debug|info|warn|error`.
//! - `log_dir` is always absolute.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "LUNCHLY_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "LUNCHLY_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "LUNCHLY_LOG_DIR";

const DEFAULT_DB_PATH: &str = "lunchly.db";
const DEFAULT_LOG_DIR_NAME: &str = "lunchly-logs";

/// Configuration error for an environment-provided value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyValue(&'static str),
    InvalidValue { key: &'static str, message: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyValue(key) => write!(f, "{key} cannot be empty"),
            Self::InvalidValue { key, message } => write!(f, "invalid {key}: {message}"),
        }
    }
}

impl Error for ConfigError {}

/// Resolved process configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through an arbitrary key lookup.
    ///
    /// Unset keys fall back to defaults; set-but-blank keys are rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = match lookup(DB_PATH_ENV) {
            Some(value) => PathBuf::from(non_empty(DB_PATH_ENV, &value)?),
            None => PathBuf::from(DEFAULT_DB_PATH),
        };

        let log_level = match lookup(LOG_LEVEL_ENV) {
            Some(value) => normalize_level(non_empty(LOG_LEVEL_ENV, &value)?).map_err(
                |message| ConfigError::InvalidValue {
                    key: LOG_LEVEL_ENV,
                    message,
                },
            )?,
            None => default_log_level(),
        };

        let log_dir = match lookup(LOG_DIR_ENV) {
            Some(value) => {
                let dir = PathBuf::from(non_empty(LOG_DIR_ENV, &value)?);
                if !dir.is_absolute() {
                    return Err(ConfigError::InvalidValue {
                        key: LOG_DIR_ENV,
                        message: format!("must be an absolute path, got `{}`", dir.display()),
                    });
                }
                dir
            }
            None => std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME),
        };

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }
}

fn non_empty<'a>(key: &'static str, value: &'a str) -> Result<&'a str, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyValue(key));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use crate::logging::default_log_level;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn unset_keys_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.db_path, PathBuf::from("lunchly.db"));
        assert_eq!(config.log_level, default_log_level());
        assert!(config.log_dir.is_absolute());
    }

    #[test]
    fn explicit_values_are_normalized() {
        let log_dir = std::env::temp_dir().join("lunchly-config-test");
        let log_dir_str = log_dir.to_str().unwrap();
        let config = AppConfig::from_lookup(lookup_from(&[
            (DB_PATH_ENV, " /srv/lunchly/app.db "),
            (LOG_LEVEL_ENV, "WARNING"),
            (LOG_DIR_ENV, log_dir_str),
        ]))
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/srv/lunchly/app.db"));
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, log_dir);
    }

    #[test]
    fn blank_and_invalid_values_are_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[(DB_PATH_ENV, "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::EmptyValue(DB_PATH_ENV));

        let err = AppConfig::from_lookup(lookup_from(&[(LOG_LEVEL_ENV, "loud")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == LOG_LEVEL_ENV));

        let err =
            AppConfig::from_lookup(lookup_from(&[(LOG_DIR_ENV, "relative/logs")])).unwrap_err();
        assert!(err.to_string().contains("absolute"));
    }
}
