use std::process::Command;

use crate::core::config::Config;
use crate::core::receipt::InstallReceipt;
use crate::core::shim::ShimManager;
use crate::core::version::VersionManager;
use crate::error::Result;

pub fn check_environment() -> Result<()> {
    println!("🔍 glsm - Environment Check");
    println!();

    let config = Config::load()?;
    let version_manager = VersionManager::new(config.clone());
    let shim_manager = ShimManager::new(config.clone());

    let mut issues_found = 0;

    // Check glsm directories
    println!("📁 Directory Structure:");
    let glsm_dir = &config.glsm_dir;
    println!("  glsm directory: {}", glsm_dir.display());

    if glsm_dir.exists() {
        println!("    ✅ exists");
    } else {
        println!("    ❌ missing");
        issues_found += 1;
    }

    let versions_dir = config.get_versions_dir();
    println!("  versions directory: {}", versions_dir.display());
    if versions_dir.exists() {
        println!("    ✅ exists");
    } else {
        println!("    ❌ missing");
        issues_found += 1;
    }

    let bin_dir = config.get_bin_dir();
    println!("  bin directory: {}", bin_dir.display());
    if bin_dir.exists() {
        println!("    ✅ exists");
    } else {
        println!("    ❌ missing");
        issues_found += 1;
    }

    println!();

    // Check installed versions and their receipts
    println!("📦 Installed Versions:");
    let versions = version_manager.list_installed_versions()?;
    if versions.is_empty() {
        println!("  ⚠️  No versions installed");
    } else {
        for version_info in &versions {
            println!(
                "  {} {}",
                version_info.version,
                if version_info.is_valid { "✅" } else { "❌" }
            );

            if !version_info.is_valid {
                issues_found += 1;
            }

            let version_dir = config.get_version_dir(&version_info.version);
            match InstallReceipt::load(&version_dir)? {
                Some(receipt) => {
                    println!("    receipt: {} ({})", receipt.target, receipt.sha256);
                }
                None => {
                    println!("    ⚠️  no install receipt");
                }
            }
        }
    }

    println!();

    // Check active version and shim
    println!("🔗 Active Version & Shim:");
    if let Some(active_version) = version_manager.get_active_version() {
        println!("  active version: {active_version}");

        let shim_path = config.get_shim_path();
        println!("  shim path: {}", shim_path.display());

        if shim_path.exists() {
            println!("    ✅ shim exists");

            if shim_manager.verify_shim()? {
                println!("    ✅ shim is valid");
            } else {
                println!("    ❌ shim is invalid");
                issues_found += 1;
            }
        } else {
            println!("    ❌ shim missing");
            issues_found += 1;
        }
    } else {
        println!("  ⚠️  No active version set");
    }

    println!();

    // Check PATH configuration
    println!("🛣️  PATH Configuration:");
    let bin_dir_str = bin_dir.to_string_lossy();

    if let Ok(path) = std::env::var("PATH") {
        if path.contains(&*bin_dir_str) {
            println!("  ✅ glsm bin directory is in PATH");
        } else {
            println!("  ❌ glsm bin directory NOT in PATH");
            println!("    Add this to your shell config:");
            println!("    export PATH=\"{bin_dir_str}:$PATH\"");
            issues_found += 1;
        }
    } else {
        println!("  ❌ PATH environment variable not found");
        issues_found += 1;
    }

    // Check for gls binaries that would shadow the shim
    println!();
    println!("🔎 Stray Binaries:");
    let shim_path = config.get_shim_path();
    match which::which_all("gls") {
        Ok(paths) => {
            let strays: Vec<_> = paths.filter(|p| *p != shim_path).collect();

            if strays.is_empty() {
                println!("  ✅ no gls binaries outside glsm");
            } else {
                for stray in strays {
                    println!("  ⚠️  other gls on PATH: {}", stray.display());
                }
            }
        }
        Err(_) => {
            println!("  ✅ no gls binaries outside glsm");
        }
    }

    // Try to run the gls command
    println!();
    println!("🧪 Command Test:");
    match Command::new("gls").arg("--version").output() {
        Ok(output) => {
            if output.status.success() {
                let version_output = String::from_utf8_lossy(&output.stdout);
                println!("  ✅ 'gls --version' works: {}", version_output.trim());
            } else {
                println!("  ❌ 'gls --version' failed");
                issues_found += 1;
            }
        }
        Err(_) => {
            println!("  ❌ 'gls' command not found");
            println!("    Install a version and activate it:");
            println!("    glsm install latest && glsm use latest");
            issues_found += 1;
        }
    }

    println!();
    if issues_found == 0 {
        println!("✅ Everything looks good!");
    } else {
        println!("Found {issues_found} issue(s). See suggestions above.");
    }

    Ok(())
}
