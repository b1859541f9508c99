use dialoguer::Confirm;

use crate::core::config::Config;
use crate::core::shim::ShimManager;
use crate::core::version::{normalize, VersionManager};
use crate::error::{GlsmError, Result};
use crate::utils::fs;

pub fn uninstall_version(version: &str, assume_yes: bool) -> Result<()> {
    let plain_version = normalize::to_plain_version(version);
    println!("Uninstalling gls version: {plain_version}");

    let mut config = Config::load()?;
    VersionManager::new(config.clone()).validate_version(&plain_version)?;
    let version_dir = config.get_version_dir(&plain_version);

    if !version_dir.exists() {
        return Err(GlsmError::VersionNotFound {
            version: plain_version,
        });
    }

    let is_active = config.active_version.as_deref() == Some(plain_version.as_str());
    if is_active {
        println!("⚠️  Version {plain_version} is currently active.");
    }

    if !assume_yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove gls {plain_version}?"))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Uninstall cancelled.");
            return Ok(());
        }
    }

    if is_active {
        let shim_manager = ShimManager::new(config.clone());
        shim_manager.remove_shim()?;
        config.clear_active_version()?;
        println!("Cleared active version setting.");
    }

    fs::remove_dir_recursive(&version_dir)?;
    println!("✅ Uninstalled gls {plain_version}");

    // Show remaining versions if any
    let versions_dir = config.get_versions_dir();
    if versions_dir.exists() {
        let remaining: Vec<_> = std::fs::read_dir(&versions_dir)?
            .filter_map(|entry| {
                entry.ok().and_then(|e| {
                    if e.path().is_dir() {
                        e.file_name().to_str().map(|s| s.to_string())
                    } else {
                        None
                    }
                })
            })
            .collect();

        if remaining.is_empty() {
            println!("No versions remaining.");
        } else {
            println!();
            println!("Remaining installed versions:");
            for v in remaining {
                println!("  • {v}");
            }
        }
    }

    Ok(())
}
