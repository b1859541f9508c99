use std::path::{Path, PathBuf};

use crate::core::checksum;
use crate::core::config::{Config, BINARY_NAME};
use crate::core::download::Downloader;
use crate::core::platform::Target;
use crate::core::receipt::InstallReceipt;
use crate::core::releases::{ReleaseEntry, ReleaseIndex};
use crate::error::{GlsmError, Result};
use crate::utils::fs;

pub fn install_version(version: &str, timeout: Option<u64>, skip_self_test: bool) -> Result<()> {
    println!("Installing gls version: {version}");

    let config = Config::load()?;
    let index = ReleaseIndex::load()?;
    let target = Target::host()?;

    let entry = match index.resolve(version, target) {
        Ok(entry) => entry,
        Err(e @ GlsmError::VersionNotFound { .. }) => {
            println!("Available versions:");
            for v in index.versions() {
                println!("  • {v}");
            }
            return Err(e);
        }
        Err(e) => return Err(e),
    };
    println!("Resolved gls {} for {}", entry.version, entry.triple);

    if config.get_version_binary(&entry.version).exists() {
        println!("Version {} is already installed, reinstalling.", entry.version);
    }

    let timeout_secs = timeout.unwrap_or(config.fetch_timeout_secs);
    let downloader = Downloader::new(timeout_secs);

    // Stage the download outside the versions tree so a failed run never
    // touches installed state.
    let staging = std::env::temp_dir().join(format!("glsm-{}", entry.version));
    fs::ensure_dir_exists(&staging)?;
    let archive_path = staging.join(format!("gls-{}.tar.gz", entry.triple));

    let result = downloader
        .download_file(&entry.url, &archive_path)
        .and_then(|()| {
            install_from_archive(
                &config,
                &downloader,
                &entry,
                &archive_path,
                &staging,
                skip_self_test,
            )
        });

    // The staging dir never outlives the run, success or not
    let _ = std::fs::remove_dir_all(&staging);

    let binary_path = result?;

    println!("Successfully installed gls {}", entry.version);
    println!("   Binary location: {}", binary_path.display());
    println!();
    println!("To use this version, run:");
    println!("   glsm use {}", entry.version);

    Ok(())
}

/// Verify, extract, and install an already-fetched archive. Split from the
/// fetch step so everything after the network call stays testable.
///
/// The checksum gate runs first; nothing is extracted from an archive whose
/// digest does not match the release table.
pub(crate) fn install_from_archive(
    config: &Config,
    downloader: &Downloader,
    entry: &ReleaseEntry,
    archive_path: &Path,
    work_dir: &Path,
    skip_self_test: bool,
) -> Result<PathBuf> {
    println!("Verifying checksum...");
    checksum::verify_file(archive_path, &entry.sha256)?;

    let extract_dir = work_dir.join("extract");
    let staged_binary = downloader.extract_single_binary(archive_path, &extract_dir, BINARY_NAME)?;

    // Replace any previous install of this version; reinstalling the same
    // version yields a bit-for-bit identical binary.
    let version_dir = config.get_version_dir(&entry.version);
    fs::remove_dir_recursive(&version_dir)?;
    fs::ensure_dir_exists(&version_dir)?;

    let binary_path = config.get_version_binary(&entry.version);
    let finish = (|| -> Result<()> {
        std::fs::copy(&staged_binary, &binary_path)?;
        fs::make_executable(&binary_path)?;
        InstallReceipt::new(entry).write(&version_dir)?;

        if !skip_self_test {
            println!("Running self-test...");
            self_test(&binary_path)?;
        }

        Ok(())
    })();

    if let Err(e) = finish {
        // A failed install leaves nothing behind
        let _ = std::fs::remove_dir_all(&version_dir);
        return Err(e);
    }

    Ok(binary_path)
}

/// Invoke the installed binary's version probe. Exit status 0 is the
/// install contract; anything else means the binary does not run here.
pub(crate) fn self_test(binary_path: &Path) -> Result<()> {
    let output = std::process::Command::new(binary_path)
        .arg("--version")
        .output()
        .map_err(|e| GlsmError::SelfTestFailed {
            path: binary_path.to_path_buf(),
            reason: format!("failed to execute: {e}"),
        })?;

    if !output.status.success() {
        return Err(GlsmError::SelfTestFailed {
            path: binary_path.to_path_buf(),
            reason: match output.status.code() {
                Some(code) => format!("exit status {code}"),
                None => "terminated by signal".to_string(),
            },
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn write_tar_gz(path: &Path, entries: &[(&str, &[u8])]) {
        let file = File::create(path).unwrap();
        let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
        let mut builder = tar::Builder::new(encoder);

        for (name, data) in entries {
            let mut header = tar::Header::new_gnu();
            header.set_size(data.len() as u64);
            header.set_mode(0o755);
            header.set_cksum();
            builder.append_data(&mut header, name, *data).unwrap();
        }

        builder.into_inner().unwrap().finish().unwrap();
    }

    struct Fixture {
        _root: tempfile::TempDir,
        config: Config,
        work_dir: PathBuf,
        archive: PathBuf,
        entry: ReleaseEntry,
    }

    fn fixture_with_payload(payload: &[u8]) -> Fixture {
        let root = tempfile::tempdir().unwrap();
        let config = Config::for_root(root.path().join("glsm"));

        let work_dir = root.path().join("staging");
        std::fs::create_dir_all(&work_dir).unwrap();

        let archive = work_dir.join("gls-x86_64-unknown-linux-gnu.tar.gz");
        write_tar_gz(&archive, &[("gls", payload)]);

        let entry = ReleaseEntry {
            version: "0.3.0".to_string(),
            triple: "x86_64-unknown-linux-gnu",
            url: "https://github.com/Finatext/gls/releases/download/v0.3.0/gls-x86_64-unknown-linux-gnu.tar.gz".to_string(),
            sha256: checksum::sha256_file(&archive).unwrap(),
        };

        Fixture {
            _root: root,
            config,
            work_dir,
            archive,
            entry,
        }
    }

    const PASSING_BINARY: &[u8] = b"#!/bin/sh\necho gls 0.3.0\nexit 0\n";
    const FAILING_BINARY: &[u8] = b"#!/bin/sh\nexit 1\n";

    #[cfg(unix)]
    #[test]
    fn test_install_from_archive_happy_path() {
        let f = fixture_with_payload(PASSING_BINARY);
        let downloader = Downloader::new(30);

        let binary = install_from_archive(
            &f.config,
            &downloader,
            &f.entry,
            &f.archive,
            &f.work_dir,
            false,
        )
        .unwrap();

        assert_eq!(binary, f.config.get_version_binary("0.3.0"));
        assert_eq!(std::fs::read(&binary).unwrap(), PASSING_BINARY);
        assert!(fs::is_executable(&binary));

        let receipt = InstallReceipt::load(&f.config.get_version_dir("0.3.0"))
            .unwrap()
            .unwrap();
        assert_eq!(receipt.version, "0.3.0");
        assert_eq!(receipt.sha256, f.entry.sha256);
    }

    #[cfg(unix)]
    #[test]
    fn test_reinstall_is_idempotent() {
        let f = fixture_with_payload(PASSING_BINARY);
        let downloader = Downloader::new(30);

        let first = install_from_archive(
            &f.config,
            &downloader,
            &f.entry,
            &f.archive,
            &f.work_dir,
            false,
        )
        .unwrap();
        let first_bytes = std::fs::read(&first).unwrap();

        let second = install_from_archive(
            &f.config,
            &downloader,
            &f.entry,
            &f.archive,
            &f.work_dir,
            false,
        )
        .unwrap();

        assert_eq!(first, second);
        assert_eq!(std::fs::read(&second).unwrap(), first_bytes);
    }

    #[test]
    fn test_checksum_mismatch_halts_before_extraction() {
        let mut f = fixture_with_payload(PASSING_BINARY);
        f.entry.sha256 = "0".repeat(64);
        let downloader = Downloader::new(30);

        let err = install_from_archive(
            &f.config,
            &downloader,
            &f.entry,
            &f.archive,
            &f.work_dir,
            true,
        )
        .unwrap_err();

        assert!(matches!(err, GlsmError::ChecksumMismatch { .. }));
        // Nothing was extracted or installed
        assert!(!f.work_dir.join("extract").exists());
        assert!(!f.config.get_version_dir("0.3.0").exists());
    }

    #[test]
    fn test_multi_entry_archive_is_rejected() {
        let f = fixture_with_payload(PASSING_BINARY);
        let archive = f.work_dir.join("gls-two-entries.tar.gz");
        write_tar_gz(&archive, &[("gls", PASSING_BINARY), ("LICENSE", b"MIT")]);

        let entry = ReleaseEntry {
            sha256: checksum::sha256_file(&archive).unwrap(),
            ..f.entry.clone()
        };
        let downloader = Downloader::new(30);

        let err = install_from_archive(&f.config, &downloader, &entry, &archive, &f.work_dir, true)
            .unwrap_err();

        assert!(matches!(err, GlsmError::ExtractionError { .. }));
        assert!(!f.config.get_version_dir("0.3.0").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_self_test_removes_install() {
        let f = fixture_with_payload(FAILING_BINARY);
        let downloader = Downloader::new(30);

        let err = install_from_archive(
            &f.config,
            &downloader,
            &f.entry,
            &f.archive,
            &f.work_dir,
            false,
        )
        .unwrap_err();

        assert!(matches!(err, GlsmError::SelfTestFailed { .. }));
        assert!(!f.config.get_version_dir("0.3.0").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_skip_self_test_installs_failing_binary() {
        let f = fixture_with_payload(FAILING_BINARY);
        let downloader = Downloader::new(30);

        let binary = install_from_archive(
            &f.config,
            &downloader,
            &f.entry,
            &f.archive,
            &f.work_dir,
            true,
        )
        .unwrap();

        assert!(binary.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_self_test_exit_codes() {
        let f = fixture_with_payload(PASSING_BINARY);
        let downloader = Downloader::new(30);
        let binary = install_from_archive(
            &f.config,
            &downloader,
            &f.entry,
            &f.archive,
            &f.work_dir,
            false,
        )
        .unwrap();

        assert!(self_test(&binary).is_ok());
        assert!(self_test(Path::new("/nonexistent/gls")).is_err());
    }
}
