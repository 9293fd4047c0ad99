//! # Shelf Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line flags (highest priority)                              │
//! │     --inventory, --users, report --month/--year/--limit                │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     SHELF_INVENTORY=/srv/shop/inventario.txt                           │
//! │     SHELF_RETURN_ACCOUNTING=reverse                                    │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config <path>, else                                              │
//! │     ~/.config/shelf/shelf.toml (Linux)                                 │
//! │     ~/Library/Application Support/com.shelf.shelf/shelf.toml (macOS)   │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     inventario.txt, usuarios.txt, 07/2023, 14 day returns              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [data]
//! inventory = "inventario.txt"
//! users = "usuarios.txt"
//!
//! [reporting]
//! month = 7
//! year = 2023
//! top_customers = 5
//!
//! [returns]
//! window_days = 14
//! accounting = "count_as_sale"  # count_as_sale | reverse
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shelf_core::validation::validate_month;
use shelf_core::{
    CatalogPolicy, ReportingPeriod, ReturnAccounting, ReturnPolicy, ValidationError,
    DEFAULT_RETURN_WINDOW_DAYS, DEFAULT_TOP_CUSTOMERS,
};
use thiserror::Error;
use tracing::{debug, info};

// =============================================================================
// Errors
// =============================================================================

#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("Cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for [`ShelfConfig`].
    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range or not one of the allowed options.
    ///
    /// ## When This Occurs
    /// - `[reporting] month = 13`
    /// - `SHELF_RETURN_ACCOUNTING=refund`
    /// - `SHELF_REPORT_YEAR=twenty`
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

impl ConfigError {
    fn invalid(key: &str, reason: impl ToString) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Environment Variable Names
// =============================================================================

pub const ENV_INVENTORY: &str = "SHELF_INVENTORY";
pub const ENV_USERS: &str = "SHELF_USERS";
pub const ENV_REPORT_MONTH: &str = "SHELF_REPORT_MONTH";
pub const ENV_REPORT_YEAR: &str = "SHELF_REPORT_YEAR";
pub const ENV_RETURN_WINDOW_DAYS: &str = "SHELF_RETURN_WINDOW_DAYS";
pub const ENV_RETURN_ACCOUNTING: &str = "SHELF_RETURN_ACCOUNTING";

// =============================================================================
// Data Files
// =============================================================================

/// Where the inventory and user files live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_inventory")]
    pub inventory: PathBuf,

    #[serde(default = "default_users")]
    pub users: PathBuf,
}

fn default_inventory() -> PathBuf {
    PathBuf::from("inventario.txt")
}

fn default_users() -> PathBuf {
    PathBuf::from("usuarios.txt")
}

impl Default for DataSettings {
    fn default() -> Self {
        DataSettings {
            inventory: default_inventory(),
            users: default_users(),
        }
    }
}

// =============================================================================
// Reporting Settings
// =============================================================================

/// The reference period and the size of the top customers listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingSettings {
    #[serde(default = "default_month")]
    pub month: u32,

    #[serde(default = "default_year")]
    pub year: i32,

    #[serde(default = "default_top_customers")]
    pub top_customers: usize,
}

fn default_month() -> u32 {
    ReportingPeriod::default().month()
}

fn default_year() -> i32 {
    ReportingPeriod::default().year()
}

fn default_top_customers() -> usize {
    DEFAULT_TOP_CUSTOMERS
}

impl Default for ReportingSettings {
    fn default() -> Self {
        ReportingSettings {
            month: default_month(),
            year: default_year(),
            top_customers: default_top_customers(),
        }
    }
}

// =============================================================================
// Return Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnSettings {
    /// Days after a purchase during which it may be returned.
    #[serde(default = "default_window_days")]
    pub window_days: i64,

    #[serde(default)]
    pub accounting: ReturnAccounting,
}

fn default_window_days() -> i64 {
    DEFAULT_RETURN_WINDOW_DAYS
}

impl Default for ReturnSettings {
    fn default() -> Self {
        ReturnSettings {
            window_days: default_window_days(),
            accounting: ReturnAccounting::default(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete `shelf` configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelfConfig {
    #[serde(default)]
    pub data: DataSettings,

    #[serde(default)]
    pub reporting: ReportingSettings,

    #[serde(default)]
    pub returns: ReturnSettings,
}

impl ShelfConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else the platform `shelf.toml`)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` that does not exist is an error; a missing
    /// platform file is not.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parses a TOML document; missing sections and keys take defaults.
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies `SHELF_*` environment variable overrides.
    pub fn apply_env_overrides(&mut self) -> ConfigResult<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from any key lookup, so tests can pass a map
    /// instead of touching the process environment.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<()> {
        if let Some(path) = lookup(ENV_INVENTORY) {
            debug!(path = %path, "Overriding inventory path from environment");
            self.data.inventory = PathBuf::from(path);
        }

        if let Some(path) = lookup(ENV_USERS) {
            debug!(path = %path, "Overriding users path from environment");
            self.data.users = PathBuf::from(path);
        }

        if let Some(month) = lookup(ENV_REPORT_MONTH) {
            self.reporting.month = parse_value(ENV_REPORT_MONTH, &month)?;
        }

        if let Some(year) = lookup(ENV_REPORT_YEAR) {
            self.reporting.year = parse_value(ENV_REPORT_YEAR, &year)?;
        }

        if let Some(days) = lookup(ENV_RETURN_WINDOW_DAYS) {
            self.returns.window_days = parse_value(ENV_RETURN_WINDOW_DAYS, &days)?;
        }

        if let Some(accounting) = lookup(ENV_RETURN_ACCOUNTING) {
            debug!(accounting = %accounting, "Overriding return accounting from environment");
            self.returns.accounting = accounting
                .parse()
                .map_err(|e: ValidationError| ConfigError::invalid(ENV_RETURN_ACCOUNTING, e))?;
        }

        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_month(self.reporting.month)
            .map_err(|e| ConfigError::invalid("reporting.month", e))?;

        if self.reporting.top_customers == 0 {
            return Err(ConfigError::invalid(
                "reporting.top_customers",
                "must be greater than 0",
            ));
        }

        if self.returns.window_days < 0 {
            return Err(ConfigError::invalid(
                "returns.window_days",
                "must not be negative",
            ));
        }

        Ok(())
    }

    /// Builds the catalog rules this configuration describes.
    pub fn catalog_policy(&self) -> ConfigResult<CatalogPolicy> {
        let reporting = ReportingPeriod::new(self.reporting.month, self.reporting.year)
            .map_err(|e| ConfigError::invalid("reporting", e))?;
        let returns = ReturnPolicy::with_window_days(self.returns.window_days, self.returns.accounting)
            .map_err(|e| ConfigError::invalid("returns.window_days", e))?;

        Ok(CatalogPolicy {
            reporting,
            returns,
            top_customers_limit: self.reporting.top_customers,
        })
    }

    /// Returns the platform config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "shelf", "shelf")
            .map(|dirs| dirs.config_dir().join("shelf.toml"))
    }
}

fn parse_value<T>(key: &str, raw: &str) -> ConfigResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e| ConfigError::invalid(key, e))
}
