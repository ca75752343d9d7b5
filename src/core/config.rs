use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Connection defaults read from `config.json`; command line options win.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Snapshot file used instead of the HTTP inventory
    #[serde(default)]
    pub snapshot: Option<PathBuf>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load `explicit` if given, otherwise the default config file.
    ///
    /// A missing default file yields the default config; a missing explicit
    /// file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config_path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = Self::get_config_path()?;
                if !path.exists() {
                    log::debug!("no config file at {:?}", path);
                    return Ok(Config::default());
                }
                path
            }
        };

        let data = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        if data.trim().is_empty() {
            return Ok(Config::default());
        }

        let config: Config = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

        log::debug!("loaded config from {:?}", config_path);
        Ok(config)
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().with_context(|| "Could not determine config directory")?;

        Ok(config_dir.join("check_vsphere").join("config.json"))
    }
}
