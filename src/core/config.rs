use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{GlsmError, Result};
use crate::utils::fs;

/// Default cap on the archive fetch, in seconds. The download is the only
/// unbounded step in an install, so it always runs under a deadline.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 300;

/// Name of the managed executable inside version directories and the bin dir.
pub const BINARY_NAME: &str = "gls";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub active_version: Option<String>,
    pub glsm_dir: PathBuf,
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,
}

fn default_fetch_timeout() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}

impl Config {
    pub fn new() -> Result<Self> {
        Ok(Config {
            active_version: None,
            glsm_dir: get_glsm_dir()?,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
        })
    }

    /// Config rooted at an explicit directory instead of the home default.
    pub fn for_root(root: PathBuf) -> Self {
        Config {
            active_version: None,
            glsm_dir: root,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
        }
    }

    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;

        if !config_path.exists() {
            let config = Self::new()?;
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Config = serde_json::from_str(&content)?;

        // Ensure directories exist
        fs::ensure_dir_exists(&config.glsm_dir)?;
        fs::ensure_dir_exists(&config.get_versions_dir())?;
        fs::ensure_dir_exists(&config.get_bin_dir())?;

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::ensure_dir_exists(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    pub fn set_active_version(&mut self, version: String) -> Result<()> {
        self.active_version = Some(version);
        self.save()
    }

    pub fn clear_active_version(&mut self) -> Result<()> {
        self.active_version = None;
        self.save()
    }

    pub fn get_versions_dir(&self) -> PathBuf {
        self.glsm_dir.join("versions")
    }

    pub fn get_bin_dir(&self) -> PathBuf {
        self.glsm_dir.join("bin")
    }

    pub fn get_version_dir(&self, version: &str) -> PathBuf {
        self.get_versions_dir().join(version)
    }

    pub fn get_version_binary(&self, version: &str) -> PathBuf {
        self.get_version_dir(version).join(BINARY_NAME)
    }

    pub fn get_shim_path(&self) -> PathBuf {
        self.get_bin_dir().join(BINARY_NAME)
    }
}

fn get_glsm_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".glsm"))
        .ok_or(GlsmError::HomeDirectoryNotFound)
}

fn get_config_path() -> Result<PathBuf> {
    Ok(get_glsm_dir()?.join("config.json"))
}
