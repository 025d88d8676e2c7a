//! Configuration loading and typed config structures for the Juku simulation.
//!
//! The canonical configuration lives in `juku-config.yaml` at the project
//! root. This module defines strongly-typed structs that mirror the YAML
//! structure and a loader that reads the file and applies environment
//! overrides. Sections the library does not know about (for example the
//! driver's `engine` section) are ignored.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::calendar::{CalendarDate, CalendarError};

/// Environment variable overriding the directory holding the catalog files.
pub const CATALOG_DIR_ENV: &str = "JUKU_CATALOG_DIR";

/// Environment variable overriding the save-slot directory.
pub const SAVE_DIR_ENV: &str = "JUKU_SAVE_DIR";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A campaign date is out of range.
    #[error("invalid campaign date: {source}")]
    Calendar {
        /// The underlying calendar error.
        #[from]
        source: CalendarError,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `juku-config.yaml`. Every field has a default,
/// so an empty document is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// Campaign rules: starting cash, calendar bounds, seed.
    #[serde(default)]
    pub campaign: CampaignConfig,

    /// Catalog file locations.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Save-slot storage.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values for paths:
    /// - `JUKU_CATALOG_DIR` replaces the directory of both catalog files
    /// - `JUKU_SAVE_DIR` overrides `storage.save_dir`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Calendar`] if a campaign date is invalid.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, applying env overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Calendar`] if a campaign date is invalid.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.campaign.validate()?;
        config.catalog.apply_env_overrides();
        config.storage.apply_env_overrides();
        Ok(config)
    }
}

/// Campaign rules.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CampaignConfig {
    /// Cash given to a new player, in yen.
    #[serde(default = "default_starting_funds")]
    pub starting_funds: i64,

    /// Campaign year the player starts in.
    #[serde(default = "default_start_year")]
    pub start_year: u32,

    /// Month the player starts in.
    #[serde(default = "default_start_month")]
    pub start_month: u32,

    /// Year of the last simulated month.
    #[serde(default = "default_end_year")]
    pub end_year: u32,

    /// Last simulated month.
    #[serde(default = "default_end_month")]
    pub end_month: u32,

    /// RNG seed. `None` seeds from the operating system.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl CampaignConfig {
    /// Opening date of a new campaign.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `start_month` is out of range.
    pub const fn start_date(&self) -> Result<CalendarDate, CalendarError> {
        CalendarDate::new(self.start_year, self.start_month)
    }

    /// Last month of the campaign.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `end_month` is out of range.
    pub const fn end_date(&self) -> Result<CalendarDate, CalendarError> {
        CalendarDate::new(self.end_year, self.end_month)
    }

    fn validate(&self) -> Result<(), CalendarError> {
        self.start_date()?;
        self.end_date()?;
        Ok(())
    }
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            starting_funds: default_starting_funds(),
            start_year: default_start_year(),
            start_month: default_start_month(),
            end_year: default_end_year(),
            end_month: default_end_month(),
            seed: None,
        }
    }
}

/// Locations of the static template catalogs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogConfig {
    /// Campus template JSON file.
    #[serde(default = "default_campuses_path")]
    pub campuses_path: PathBuf,

    /// Teacher template JSON file.
    #[serde(default = "default_teachers_path")]
    pub teachers_path: PathBuf,
}

impl CatalogConfig {
    /// Re-root both catalog files under `JUKU_CATALOG_DIR` if it is set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var(CATALOG_DIR_ENV) {
            self.rebase(Path::new(&dir));
        }
    }

    /// Keep each file name but move it into `dir`.
    pub fn rebase(&mut self, dir: &Path) {
        if let Some(name) = self.campuses_path.file_name() {
            self.campuses_path = dir.join(name);
        }
        if let Some(name) = self.teachers_path.file_name() {
            self.teachers_path = dir.join(name);
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            campuses_path: default_campuses_path(),
            teachers_path: default_teachers_path(),
        }
    }
}

/// Save-slot storage configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON file per save slot.
    #[serde(default = "default_save_dir")]
    pub save_dir: PathBuf,
}

impl StorageConfig {
    /// Apply `JUKU_SAVE_DIR` if it is set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var(SAVE_DIR_ENV) {
            self.save_dir = PathBuf::from(dir);
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            save_dir: default_save_dir(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_starting_funds() -> i64 {
    10_000_000
}

const fn default_start_year() -> u32 {
    1
}

const fn default_start_month() -> u32 {
    4
}

const fn default_end_year() -> u32 {
    6
}

const fn default_end_month() -> u32 {
    3
}

fn default_campuses_path() -> PathBuf {
    PathBuf::from("data/campuses.json")
}

fn default_teachers_path() -> PathBuf {
    PathBuf::from("data/teachers.json")
}

fn default_save_dir() -> PathBuf {
    PathBuf::from("saves")
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: SimulationConfig = serde_yml::from_str("{}").unwrap();
        assert_eq!(config.campaign.starting_funds, 10_000_000);
        assert_eq!(config.campaign.start_date().unwrap(), CalendarDate { year: 1, month: 4 });
        assert_eq!(config.campaign.end_date().unwrap(), CalendarDate { year: 6, month: 3 });
        assert!(config.campaign.seed.is_none());
        assert_eq!(config.catalog.campuses_path, PathBuf::from("data/campuses.json"));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let yaml = r"
campaign:
  starting_funds: 20000000
  seed: 42
logging:
  level: debug
engine:
  auto_hire: true
";
        let config: SimulationConfig = serde_yml::from_str(yaml).unwrap();
        assert_eq!(config.campaign.starting_funds, 20_000_000);
        assert_eq!(config.campaign.seed, Some(42));
        assert_eq!(config.campaign.start_month, 4);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.storage.save_dir, PathBuf::from("saves"));
    }

    #[test]
    fn invalid_month_is_rejected() {
        let yaml = "campaign:\n  start_month: 13\n";
        assert!(matches!(
            SimulationConfig::parse(yaml),
            Err(ConfigError::Calendar { .. })
        ));
    }

    #[test]
    fn malformed_yaml_is_rejected() {
        assert!(matches!(
            SimulationConfig::parse("campaign: [unclosed"),
            Err(ConfigError::Yaml { .. })
        ));
    }

    #[test]
    fn rebase_keeps_file_names() {
        let mut catalog = CatalogConfig::default();
        catalog.rebase(Path::new("/srv/juku"));
        assert_eq!(catalog.campuses_path, PathBuf::from("/srv/juku/campuses.json"));
        assert_eq!(catalog.teachers_path, PathBuf::from("/srv/juku/teachers.json"));
    }
}
