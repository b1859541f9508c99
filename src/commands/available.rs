use crate::core::config::Config;
use crate::core::releases::ReleaseIndex;
use crate::core::version::VersionManager;
use crate::error::Result;

/// List the versions the embedded release table knows about. There is no
/// remote metadata query; the table is pinned at build time.
pub fn list_available_versions() -> Result<()> {
    let index = ReleaseIndex::load()?;
    let config = Config::load()?;
    let version_manager = VersionManager::new(config);

    let latest = index.latest()?.to_string();

    println!("Available gls versions:");

    for version in index.versions().iter().rev() {
        let latest_marker = if *version == latest { " (latest)" } else { "" };
        let installed_marker = if version_manager.is_version_installed(version) {
            " [installed]"
        } else {
            ""
        };

        println!(
            "  {}{}{} - {} targets",
            version,
            latest_marker,
            installed_marker,
            index.triples_for(version).len()
        );
    }

    println!();
    println!("Install: glsm install <version>");

    Ok(())
}
