use std::fs::File;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tar::Archive;
use zip::ZipArchive;

use crate::error::{GlsmError, Result};
use crate::utils::fs;

pub struct Downloader {
    timeout_secs: u64,
}

impl Downloader {
    pub fn new(timeout_secs: u64) -> Self {
        Self { timeout_secs }
    }

    /// Fetch a release archive over HTTPS. The single network call an
    /// install performs, always bounded by the configured timeout.
    pub fn download_file(&self, url: &str, destination: &Path) -> Result<()> {
        println!("Downloading from {url}...");

        if let Some(parent) = destination.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let output = std::process::Command::new("curl")
            .arg("-L") // Follow redirects
            .arg("-f") // Treat HTTP errors as failures
            .arg("-s") // Silent
            .arg("--max-time")
            .arg(self.timeout_secs.to_string())
            .arg("-H")
            .arg(format!("User-Agent: glsm/{}", env!("CARGO_PKG_VERSION")))
            .arg("-o")
            .arg(destination)
            .arg(url)
            .output()?;

        if !output.status.success() {
            // Drop whatever partial file curl left behind.
            let _ = std::fs::remove_file(destination);
            return Err(GlsmError::DownloadError {
                url: url.to_string(),
            });
        }

        Ok(())
    }

    /// Extract the one executable a release archive is required to carry
    /// and place it at `destination_dir/<binary_name>` with the executable
    /// bit set. Anything other than exactly one regular file with the
    /// expected name fails the install.
    pub fn extract_single_binary(
        &self,
        archive_path: &Path,
        destination_dir: &Path,
        binary_name: &str,
    ) -> Result<PathBuf> {
        std::fs::create_dir_all(destination_dir)?;

        let file_name = archive_path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| GlsmError::ExtractionError {
                path: archive_path.to_path_buf(),
                reason: "invalid archive file name".to_string(),
            })?;

        let binary_path = if file_name.ends_with(".tar.gz") || file_name.ends_with(".tgz") {
            self.extract_from_tar_gz(archive_path, destination_dir, binary_name)?
        } else if file_name.ends_with(".zip") {
            self.extract_from_zip(archive_path, destination_dir, binary_name)?
        } else {
            return Err(GlsmError::ExtractionError {
                path: archive_path.to_path_buf(),
                reason: format!("unsupported archive format: {file_name}"),
            });
        };

        fs::make_executable(&binary_path)?;
        Ok(binary_path)
    }

    fn extract_from_tar_gz(
        &self,
        archive_path: &Path,
        destination_dir: &Path,
        binary_name: &str,
    ) -> Result<PathBuf> {
        let file = File::open(archive_path)?;
        let decoder = GzDecoder::new(file);
        let mut archive = Archive::new(decoder);

        let mut extracted: Option<PathBuf> = None;

        for entry in archive.entries().map_err(|e| GlsmError::ExtractionError {
            path: archive_path.to_path_buf(),
            reason: e.to_string(),
        })? {
            let mut entry = entry.map_err(|e| GlsmError::ExtractionError {
                path: archive_path.to_path_buf(),
                reason: e.to_string(),
            })?;

            if !entry.header().entry_type().is_file() {
                continue;
            }

            if extracted.is_some() {
                return Err(GlsmError::ExtractionError {
                    path: archive_path.to_path_buf(),
                    reason: "archive contains more than one file".to_string(),
                });
            }

            let entry_name = entry
                .path()
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
                .unwrap_or_default();

            if entry_name != binary_name {
                return Err(GlsmError::ExtractionError {
                    path: archive_path.to_path_buf(),
                    reason: format!("unexpected entry '{entry_name}', expected '{binary_name}'"),
                });
            }

            let target = destination_dir.join(binary_name);
            entry.unpack(&target)?;
            extracted = Some(target);
        }

        extracted.ok_or_else(|| GlsmError::ExtractionError {
            path: archive_path.to_path_buf(),
            reason: "archive contains no file entry".to_string(),
        })
    }

    fn extract_from_zip(
        &self,
        archive_path: &Path,
        destination_dir: &Path,
        binary_name: &str,
    ) -> Result<PathBuf> {
        let file = File::open(archive_path)?;
        let mut archive = ZipArchive::new(file).map_err(|e| GlsmError::ExtractionError {
            path: archive_path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut extracted: Option<PathBuf> = None;

        for i in 0..archive.len() {
            let mut entry = archive.by_index(i).map_err(|e| GlsmError::ExtractionError {
                path: archive_path.to_path_buf(),
                reason: e.to_string(),
            })?;

            if entry.is_dir() {
                continue;
            }

            if extracted.is_some() {
                return Err(GlsmError::ExtractionError {
                    path: archive_path.to_path_buf(),
                    reason: "archive contains more than one file".to_string(),
                });
            }

            let entry_name = entry
                .enclosed_name()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
                .unwrap_or_default();

            if entry_name != binary_name {
                return Err(GlsmError::ExtractionError {
                    path: archive_path.to_path_buf(),
                    reason: format!("unexpected entry '{entry_name}', expected '{binary_name}'"),
                });
            }

            let target = destination_dir.join(binary_name);
            let mut outfile = File::create(&target)?;
            std::io::copy(&mut entry, &mut outfile)?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Some(mode) = entry.unix_mode() {
                    std::fs::set_permissions(&target, std::fs::Permissions::from_mode(mode))?;
                }
            }

            extracted = Some(target);
        }

        extracted.ok_or_else(|| GlsmError::ExtractionError {
            path: archive_path.to_path_buf(),
            reason: "archive contains no file entry".to_string(),
        })
    }
}
