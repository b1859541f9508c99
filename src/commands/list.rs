use crate::core::config::Config;
use crate::core::receipt::InstallReceipt;
use crate::core::version::VersionManager;
use crate::error::Result;

pub fn list_versions() -> Result<()> {
    let config = Config::load()?;
    let version_manager = VersionManager::new(config.clone());

    let versions = version_manager.list_installed_versions()?;

    if versions.is_empty() {
        println!("No gls versions installed.");
        println!();
        println!("To install a version, run:");
        println!("  glsm install <version>");
        return Ok(());
    }

    println!("Installed gls versions:");
    println!();

    for version_info in versions {
        let status = if version_info.is_active {
            "✅ (active)"
        } else if !version_info.is_valid {
            "❌ (invalid)"
        } else {
            ""
        };

        print!("  {} {}", version_info.version, status);

        let version_dir = config.get_version_dir(&version_info.version);
        if let Ok(Some(receipt)) = InstallReceipt::load(&version_dir) {
            print!(
                "  [{}  installed {}]",
                receipt.target,
                receipt.installed_at.format("%Y-%m-%d")
            );
        }
        println!();

        if !version_info.is_valid {
            println!("    Binary not found: {}", version_info.binary_path.display());
        }
    }

    println!();

    if let Some(active_version) = version_manager.get_active_version() {
        println!("Active version: {active_version}");
    } else {
        println!("No active version set. Use 'glsm use <version>' to activate a version.");
    }

    Ok(())
}
