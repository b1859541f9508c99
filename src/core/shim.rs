use std::path::Path;

use crate::core::config::Config;
use crate::core::version::normalize;
use crate::error::{GlsmError, Result};
use crate::utils::fs;

/// Manages the `gls` entry in the glsm bin directory. The shim is a symlink
/// to the active version's binary, so switching versions never copies files.
pub struct ShimManager {
    config: Config,
}

impl ShimManager {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn create_shim(&self, version: &str) -> Result<()> {
        let plain_version = normalize::to_plain_version(version);
        let shim_path = self.config.get_shim_path();

        let binary_path = self.config.get_version_binary(&plain_version);
        if !binary_path.exists() {
            return Err(GlsmError::VersionNotFound {
                version: plain_version,
            });
        }

        // Replace any existing shim
        self.remove_shim()?;
        fs::ensure_dir_exists(&self.config.get_bin_dir())?;
        self.create_link(&binary_path, &shim_path)?;

        Ok(())
    }

    pub fn remove_shim(&self) -> Result<()> {
        let shim_path = self.config.get_shim_path();

        if shim_path.symlink_metadata().is_ok() {
            std::fs::remove_file(&shim_path)?;
        }

        Ok(())
    }

    pub fn verify_shim(&self) -> Result<bool> {
        let shim_path = self.config.get_shim_path();

        if !shim_path.exists() {
            return Ok(false);
        }

        if let Some(version) = self.config.active_version.as_ref() {
            let binary_path = self.config.get_version_binary(version);
            return Ok(binary_path.exists() && fs::is_executable(&binary_path));
        }

        Ok(false)
    }

    #[cfg(unix)]
    fn create_link(&self, target: &Path, link: &Path) -> Result<()> {
        std::os::unix::fs::symlink(target, link)?;
        Ok(())
    }

    #[cfg(windows)]
    fn create_link(&self, target: &Path, link: &Path) -> Result<()> {
        // No symlinks without elevation on Windows, copy instead
        std::fs::copy(target, link)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn installed_config(version: &str) -> (tempfile::TempDir, Config) {
        let root = tempfile::tempdir().unwrap();
        let config = Config::for_root(root.path().to_path_buf());

        let version_dir = config.get_version_dir(version);
        std::fs::create_dir_all(&version_dir).unwrap();
        let binary = config.get_version_binary(version);
        std::fs::write(&binary, b"#!/bin/sh\nexit 0\n").unwrap();
        fs::make_executable(&binary).unwrap();

        (root, config)
    }

    #[test]
    fn test_create_shim_points_at_version_binary() {
        let (_root, config) = installed_config("0.3.0");
        let manager = ShimManager::new(config.clone());

        manager.create_shim("0.3.0").unwrap();

        let shim = config.get_shim_path();
        assert!(shim.exists());

        #[cfg(unix)]
        assert_eq!(
            std::fs::read_link(&shim).unwrap(),
            config.get_version_binary("0.3.0")
        );
    }

    #[test]
    fn test_create_shim_replaces_previous() {
        let (_root, config) = installed_config("0.2.0");
        let version_dir = config.get_version_dir("0.3.0");
        std::fs::create_dir_all(&version_dir).unwrap();
        std::fs::write(config.get_version_binary("0.3.0"), b"newer").unwrap();

        let manager = ShimManager::new(config.clone());
        manager.create_shim("0.2.0").unwrap();
        manager.create_shim("0.3.0").unwrap();

        #[cfg(unix)]
        assert_eq!(
            std::fs::read_link(config.get_shim_path()).unwrap(),
            config.get_version_binary("0.3.0")
        );
    }

    #[test]
    fn test_create_shim_for_missing_version() {
        let root = tempfile::tempdir().unwrap();
        let config = Config::for_root(root.path().to_path_buf());
        let manager = ShimManager::new(config);

        let err = manager.create_shim("0.3.0").unwrap_err();
        assert!(matches!(err, GlsmError::VersionNotFound { .. }));
    }

    #[test]
    fn test_remove_shim_is_idempotent() {
        let (_root, config) = installed_config("0.3.0");
        let manager = ShimManager::new(config);

        manager.remove_shim().unwrap();
        manager.create_shim("0.3.0").unwrap();
        manager.remove_shim().unwrap();
        manager.remove_shim().unwrap();
    }
}
