use crate::core::config::Config;
use crate::core::shim::ShimManager;
use crate::core::version::{normalize, VersionManager};
use crate::error::{GlsmError, Result};

pub fn use_version(version: &str) -> Result<()> {
    let plain_version = normalize::to_plain_version(version);

    let mut config = Config::load()?;
    let version_manager = VersionManager::new(config.clone());

    version_manager.validate_version(&plain_version)?;

    if !version_manager.is_version_installed(&plain_version) {
        return Err(GlsmError::VersionNotFound {
            version: plain_version,
        });
    }

    config.set_active_version(plain_version.clone())?;

    let shim_manager = ShimManager::new(config);
    shim_manager.create_shim(&plain_version)?;

    println!("✅ Now using gls version {plain_version}");
    println!();
    println!("Verify with: gls --version");

    Ok(())
}
