//! Configuration module for dewit
//!
//! Manages application configuration: where state is stored, which catalog
//! to use and how long writes are debounced. Configuration is stored in the
//! user's config directory (`~/.config/dewit/config.toml` on Linux).

use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

const fn default_debounce_ms() -> u64 {
    100
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DewitConfig {
    /// Directory of the state database; defaults to the user data directory
    #[serde(default)]
    pub database: Option<PathBuf>,

    /// Custom catalog file; the bundled catalog is used when unset
    #[serde(default)]
    pub catalog: Option<PathBuf>,

    /// Delay before mutations are written, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,
}

impl Default for DewitConfig {
    fn default() -> Self {
        Self {
            database: None,
            catalog: None,
            debounce_ms: default_debounce_ms(),
            quiet: false,
        }
    }
}

/// Keys accepted by `config set` / `config get`
pub const KEYS: [&str; 4] = ["database", "catalog", "debounce_ms", "quiet"];

impl DewitConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("dewit").join("config.toml"))
    }

    /// Default state database location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system data directory cannot be determined.
    pub fn default_database_path() -> Result<PathBuf, ConfigError> {
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string()))?;

        Ok(data_dir.join("dewit").join("state"))
    }

    /// Load configuration from file, creating default if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        Self::load_from(config_path)
    }

    /// Load configuration from a specific TOML file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load_from(path: PathBuf) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Self::config_path()?)
    }

    /// Save configuration to a specific file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, config_path: PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(&config_path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Resolved state database directory
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no path is configured and the data directory is unknown.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        self.database
            .clone()
            .map_or_else(Self::default_database_path, Ok)
    }

    /// Debounce delay as a `Duration`
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Read a setting as text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `key` is not a known setting.
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let display_path = |path: &Option<PathBuf>| {
            path.as_ref()
                .map_or_else(|| "(default)".to_string(), |p| p.display().to_string())
        };

        match key {
            "database" => Ok(display_path(&self.database)),
            "catalog" => Ok(display_path(&self.catalog)),
            "debounce_ms" => Ok(self.debounce_ms.to_string()),
            "quiet" => Ok(self.quiet.to_string()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Update a setting from text; an empty value resets path settings to their default
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `key` is unknown or `value` cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let optional_path = |value: &str| (!value.is_empty()).then(|| PathBuf::from(value));

        match key {
            "database" => self.database = optional_path(value),
            "catalog" => self.catalog = optional_path(value),
            "debounce_ms" => {
                self.debounce_ms = value.parse().map_err(|_| {
                    ConfigError::Message(format!(
                        "Invalid value for debounce_ms: '{value}'. Use a whole number of milliseconds"
                    ))
                })?;
            }
            "quiet" => {
                self.quiet = value.parse().map_err(|_| {
                    ConfigError::Message(format!(
                        "Invalid value for quiet: '{value}'. Use 'true' or 'false'"
                    ))
                })?;
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> ConfigError {
    ConfigError::Message(format!(
        "Unknown configuration key: '{key}'. Available keys: {}",
        KEYS.join(", ")
    ))
}
