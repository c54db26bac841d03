//! Configuration management and validation.
//!
//! Settings are layered: built-in defaults, then an optional JSON config file,
//! then environment variables, then command-line flags (applied by the CLI).

use crate::constants::{
    APP_DIR_NAME, CONFIG_FILE_NAME, ENV_CACHE_DIR, ENV_WORKERS, MAX_OFFSET_MINUTES,
};
use crate::error::{ForecastError, Result};
use crate::parser::BulletinParser;
use crate::timestamp::AbbreviationTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Global configuration for forecast parsing and the product cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding cached product documents
    pub cache_dir: PathBuf,

    /// Number of products parsed concurrently by batch commands
    pub workers: usize,

    /// Pretty-print JSON output
    pub pretty_json: bool,

    /// Extra or replacement timezone abbreviations, in minutes east of UTC
    pub timezone_offsets: BTreeMap<String, i32>,
}

impl Default for Config {
    fn default() -> Self {
        let cache_dir = dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_DIR_NAME);

        Self {
            cache_dir,
            workers: num_cpus::get(),
            pretty_json: true,
            timezone_offsets: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Config file location in the platform config directory
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Read a JSON config file; missing keys fall back to defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ForecastError::configuration(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            ForecastError::configuration(format!(
                "Invalid config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Load defaults, then the config file, then environment overrides.
    ///
    /// An explicit `config_file` must exist; the default location is only used
    /// when present.
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path().filter(|path| path.exists()) {
                Some(path) => {
                    debug!("Using config file: {}", path.display());
                    Self::from_file(&path)?
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides read through `lookup`
    pub fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<()> {
        if let Some(dir) = lookup(ENV_CACHE_DIR).filter(|dir| !dir.is_empty()) {
            self.cache_dir = PathBuf::from(dir);
        }

        if let Some(workers) = lookup(ENV_WORKERS) {
            self.workers = workers.trim().parse().map_err(|_| {
                ForecastError::configuration(format!(
                    "{} must be a positive integer, got '{}'",
                    ENV_WORKERS, workers
                ))
            })?;
        }

        Ok(())
    }

    /// Check settings for consistency
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(ForecastError::configuration("workers must be at least 1"));
        }

        for (abbreviation, minutes) in &self.timezone_offsets {
            if abbreviation.is_empty() || !abbreviation.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(ForecastError::configuration(format!(
                    "Invalid timezone abbreviation '{}'",
                    abbreviation
                )));
            }
            if minutes.abs() > MAX_OFFSET_MINUTES {
                return Err(ForecastError::configuration(format!(
                    "Offset for {} is out of range: {} minutes",
                    abbreviation, minutes
                )));
            }
        }

        Ok(())
    }

    /// Set the cache directory
    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = cache_dir.into();
        self
    }

    /// Set the worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Add a timezone abbreviation
    pub fn with_timezone_offset(mut self, abbreviation: &str, minutes: i32) -> Self {
        self.timezone_offsets
            .insert(abbreviation.to_uppercase(), minutes);
        self
    }

    /// Abbreviation table with the configured overrides applied
    pub fn abbreviation_table(&self) -> AbbreviationTable {
        AbbreviationTable::new().with_overrides(&self.timezone_offsets)
    }

    /// Bulletin parser using the configured timezone table
    pub fn parser(&self) -> BulletinParser {
        BulletinParser::with_resolver(Arc::new(self.abbreviation_table()))
    }
}
