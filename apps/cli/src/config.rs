//! # Configuration
//!
//! Settings for the `matolinha` binary.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     MATOLINHA_DB_PATH=/srv/padaria/vendas.db                           │
//! │     MATOLINHA_STORE_NAME="Pão Matolinha"                               │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/matolinha/matolinha.toml (Linux)                         │
//! │     or the path in MATOLINHA_CONFIG / --config                         │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     Pão Matolinha, MZN, 5.00 per loaf, platform data dir               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # matolinha.toml
//! [store]
//! name = "Pão Matolinha"
//! currency = "MZN"
//! default_price = 5.00
//!
//! [database]
//! path = "/srv/padaria/vendas.db"
//! ```

use directories::ProjectDirs;
use matolinha_core::{Money, ReportOptions, DEFAULT_CURRENCY, DEFAULT_STORE_NAME, DEFAULT_UNIT_PRICE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Name of the SQLite file inside the data directory.
pub const DB_FILE_NAME: &str = "vendas.db";

/// Name of the config file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "matolinha.toml";

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// `[store]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Shown in the report title and footer.
    #[serde(default = "default_store_name")]
    pub name: String,

    /// Currency code appended to amounts.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Unit price used when `add` is given no `--preco`.
    #[serde(default = "default_price")]
    pub default_price: Money,
}

fn default_store_name() -> String {
    DEFAULT_STORE_NAME.to_string()
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_price() -> Money {
    DEFAULT_UNIT_PRICE
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
            currency: default_currency(),
            default_price: default_price(),
        }
    }
}

/// `[database]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file. Defaults to `vendas.db` in the platform data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

// =============================================================================
// App Config
// =============================================================================

/// Merged configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub database: DatabaseSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file: `config_path`, else `MATOLINHA_CONFIG`, else the
    ///    platform config directory. Only the platform file may be missing.
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = AppConfig::default();

        let explicit = config_path
            .or_else(|| std::env::var_os("MATOLINHA_CONFIG").map(PathBuf::from));

        match explicit {
            Some(path) => config = AppConfig::from_file(&path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => config = AppConfig::from_file(&path)?,
                Some(path) => debug!(?path, "Config file not found, using defaults"),
                None => debug!("No config directory, using defaults"),
            },
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Reads and parses a config file. A missing file is [`ConfigError::Io`].
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(path = %path.display(), "Loading config file");
        let contents = std::fs::read_to_string(path)?;
        AppConfig::from_toml(&contents)
    }

    /// Parses a config file's contents. Missing keys keep their defaults.
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Checks the merged values.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(ConfigError::Invalid("store name must not be empty".into()));
        }

        if self.store.currency.trim().is_empty() {
            return Err(ConfigError::Invalid("currency must not be empty".into()));
        }

        if !self.store.default_price.is_positive() {
            return Err(ConfigError::Invalid(format!(
                "default price must be greater than zero, got {}",
                self.store.default_price
            )));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `MATOLINHA_*` overrides read through `var`.
    ///
    /// An unparseable price is logged and ignored.
    pub fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = var("MATOLINHA_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = Some(PathBuf::from(path));
        }

        if let Some(name) = var("MATOLINHA_STORE_NAME") {
            self.store.name = name;
        }

        if let Some(currency) = var("MATOLINHA_CURRENCY") {
            self.store.currency = currency;
        }

        if let Some(price) = var("MATOLINHA_DEFAULT_PRICE") {
            match price.parse::<Money>() {
                Ok(parsed) => self.store.default_price = parsed,
                Err(e) => warn!(value = %price, error = %e, "Ignoring MATOLINHA_DEFAULT_PRICE"),
            }
        }
    }

    /// The SQLite file to open.
    pub fn database_path(&self) -> ConfigResult<PathBuf> {
        match &self.database.path {
            Some(path) => Ok(path.clone()),
            None => project_dirs()
                .map(|dirs| dirs.data_dir().join(DB_FILE_NAME))
                .ok_or_else(|| {
                    ConfigError::Invalid("could not determine a data directory".into())
                }),
        }
    }

    /// Names used in the WhatsApp report.
    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            store_name: self.store.name.clone(),
            currency: self.store.currency.clone(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("mz", "Matolinha", "matolinha")
}

fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
