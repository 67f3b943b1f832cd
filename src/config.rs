use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_KEYS: &[&str] = &["storage_path", "log_level"];

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub storage_path: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path()
                .map(|path| path.to_string_lossy().into_owned())
                .unwrap_or_else(|| "bookshelf-storage".to_string()),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads the user config, falling back to defaults when no file exists yet.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&get_config_file_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path)
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Ok(config)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&get_config_file_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let content =
            toml::to_string(self).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        fs::write(config_path, content).map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<&str, ConfigError> {
        match key {
            "storage_path" => Ok(&self.storage_path),
            "log_level" => Ok(&self.log_level),
            _ => Err(ConfigError::UnknownKey(key.to_string())),
        }
    }

    pub fn set(&mut self, key: &str, value: String) -> Result<(), ConfigError> {
        match key {
            "storage_path" => self.storage_path = value,
            "log_level" => self.log_level = value,
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }
}

fn get_config_file_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir().ok_or(ConfigError::ConfigDirNotFound)?;

    Ok(config_dir.join("bookshelf").join("config.toml"))
}

/// Directory for the log file and the default storage location.
pub fn data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("bookshelf"))
}

fn default_storage_path() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("storage"))
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not find config directory")]
    ConfigDirNotFound,

    #[error("Unknown configuration key '{0}'. Supported keys: storage_path, log_level")]
    UnknownKey(String),

    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to serialize config: {0}")]
    SerializeError(String),
}
