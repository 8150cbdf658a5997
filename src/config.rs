//! Where notes live and how noisy the logs are.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{NotekitError, Result};
use crate::storage::DEFAULT_STORAGE_KEY;

pub const DATA_DIR_ENV: &str = "NOTEKIT_DATA_DIR";
pub const CONFIG_FILE: &str = "config.yaml";
const APP_DIR: &str = "notekit";
const FALLBACK_DIR: &str = ".notekit";
const DEFAULT_LOG_FILTER: &str = "warn";

/// Optional overrides read from `<data_dir>/config.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub storage_key: Option<String>,
    pub log_filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub log_filter: String,
}

impl Config {
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }

    /// Resolve the data directory (flag, then env, then the platform data
    /// dir) and apply `config.yaml` from it if present.
    pub fn load(data_dir_flag: Option<PathBuf>) -> Result<Self> {
        let data_dir = data_dir_flag
            .or_else(|| std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
            .or_else(|| dirs::data_dir().map(|d| d.join(APP_DIR)))
            .unwrap_or_else(|| PathBuf::from(FALLBACK_DIR));

        let mut config = Self::with_data_dir(data_dir);
        if let Some(file) = read_config_file(&config.data_dir)? {
            config.apply(file)?;
        }
        Ok(config)
    }

    fn apply(&mut self, file: ConfigFile) -> Result<()> {
        if let Some(key) = file.storage_key {
            let valid = !key.is_empty()
                && key
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
            if !valid {
                return Err(NotekitError::Config(format!(
                    "storage_key must be non-empty and use only letters, digits, '_' or '-': {:?}",
                    key
                )));
            }
            self.storage_key = key;
        }
        if let Some(filter) = file.log_filter {
            self.log_filter = filter;
        }
        Ok(())
    }
}

fn read_config_file(data_dir: &Path) -> Result<Option<ConfigFile>> {
    let path = data_dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(&path)?;
    let file = serde_yaml::from_str(&contents)
        .map_err(|e| NotekitError::Config(format!("failed to parse {}: {}", path.display(), e)))?;
    Ok(Some(file))
}
