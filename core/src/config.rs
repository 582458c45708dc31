use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::repository::file::default_data_dir;
use crate::repository::DEFAULT_STORAGE_KEY;

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DATA_DIR_ENV: &str = "VOLUNTEER_HOURS_DIR";
pub const DEFAULT_LOG_FILTER: &str = "volunteer_hours_core=info,volunteer_hours=info";

/// Settings read from `<data dir>/config.json`. Every field is optional in
/// the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Storage key the entry list is saved under.
    pub storage_key: String,
    /// Filter used when `RUST_LOG` is not set.
    pub log_filter: String,
    #[serde(skip)]
    pub data_dir: PathBuf,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            data_dir: PathBuf::new(),
        }
    }
}

impl TrackerConfig {
    /// Resolves the data directory (explicit path, then `VOLUNTEER_HOURS_DIR`,
    /// then `~/.volunteer-hours`) and reads the config file there if any.
    pub fn load(data_dir: Option<PathBuf>) -> Result<Self> {
        let dir = match data_dir {
            Some(dir) => dir,
            None => match env::var_os(DATA_DIR_ENV) {
                Some(dir) if !dir.is_empty() => PathBuf::from(dir),
                _ => default_data_dir()?,
            },
        };
        Self::load_from(&dir)
    }

    pub fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        let mut config = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Could not read {}", path.display()))?;
            serde_json::from_str::<TrackerConfig>(&content)
                .with_context(|| format!("Invalid config file {}", path.display()))?
        } else {
            debug!(path = %path.display(), "no config file; using defaults");
            TrackerConfig::default()
        };
        config.data_dir = dir.to_path_buf();
        Ok(config)
    }
}
