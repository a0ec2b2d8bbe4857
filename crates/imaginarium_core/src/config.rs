//! Runtime configuration for catalog front-ends.
//!
//! Resolution order, highest first: explicit overrides (CLI flags), the
//! `IMAGINARIUM_DATA_DIR` / `IMAGINARIUM_LOG_LEVEL` environment variables,
//! then built-in defaults.

use crate::logging::{default_log_level, normalize_level, LoggingError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "IMAGINARIUM_DATA_DIR";
pub const LOG_LEVEL_ENV: &str = "IMAGINARIUM_LOG_LEVEL";

const DEFAULT_DATA_DIR: &str = "data";
const CATALOG_FILE_NAME: &str = "items.csv";
const EXPORT_FILE_NAME: &str = "items.json";
const LOG_DIR_NAME: &str = "logs";

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Catalog file backing the item store.
    pub data_file: PathBuf,
    /// Default JSON export destination.
    pub export_file: PathBuf,
    /// Absolute directory for rolling log files.
    pub log_dir: PathBuf,
    /// Canonical log level string.
    pub log_level: &'static str,
}

/// Caller-supplied values that win over environment and defaults.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidLogLevel(LoggingError),
    WorkingDirectory(std::io::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(err) => write!(f, "{err}"),
            Self::WorkingDirectory(err) => {
                write!(f, "cannot resolve current working directory: {err}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidLogLevel(err) => Some(err),
            Self::WorkingDirectory(err) => Some(err),
        }
    }
}

impl AppConfig {
    /// Resolves configuration from overrides and the process environment.
    pub fn resolve(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(ConfigError::WorkingDirectory)?;
        Self::resolve_with(
            overrides,
            |key| std::env::var(key).ok().filter(|value| !value.trim().is_empty()),
            &cwd,
        )
    }

    /// Resolves configuration against an explicit environment lookup and
    /// working directory.
    pub fn resolve_with<F>(
        overrides: &ConfigOverrides,
        env: F,
        cwd: &Path,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = overrides
            .data_dir
            .clone()
            .or_else(|| env(DATA_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let data_dir = if data_dir.is_absolute() {
            data_dir
        } else {
            cwd.join(data_dir)
        };

        let log_level = match overrides.log_level.clone().or_else(|| env(LOG_LEVEL_ENV)) {
            Some(level) => normalize_level(&level).map_err(ConfigError::InvalidLogLevel)?,
            None => default_log_level(),
        };

        Ok(Self {
            data_file: data_dir.join(CATALOG_FILE_NAME),
            export_file: data_dir.join(EXPORT_FILE_NAME),
            log_dir: data_dir.join(LOG_DIR_NAME),
            log_level,
        })
    }
}
