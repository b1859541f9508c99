use std::fs::read_dir;

use crate::core::config::Config;
use crate::error::{GlsmError, Result};
use crate::utils::fs;

/// Version normalization utilities
pub mod normalize {
    /// Normalize a version string by removing the 'v' prefix if present
    /// Examples: "v0.3.0" -> "0.3.0", "0.3.0" -> "0.3.0", "latest" -> "latest"
    pub fn to_plain_version(version: &str) -> String {
        if version == "latest" {
            version.to_string()
        } else if let Some(stripped) = version.strip_prefix('v') {
            stripped.to_string()
        } else {
            version.to_string()
        }
    }

    /// Convert a plain version to release tag format by adding the 'v' prefix
    /// Examples: "0.3.0" -> "v0.3.0", "v0.3.0" -> "v0.3.0", "latest" -> "latest"
    pub fn to_tag_version(version: &str) -> String {
        if version == "latest" || version.starts_with('v') {
            version.to_string()
        } else {
            format!("v{version}")
        }
    }
}

/// Numeric-aware ordering of dotted version strings, v prefix ignored.
pub(crate) fn version_compare(a: &str, b: &str) -> std::cmp::Ordering {
    use std::cmp::Ordering;

    let a_plain = normalize::to_plain_version(a);
    let b_plain = normalize::to_plain_version(b);

    let a_parts: Vec<&str> = a_plain.split('.').collect();
    let b_parts: Vec<&str> = b_plain.split('.').collect();

    for (a_part, b_part) in a_parts.iter().zip(b_parts.iter()) {
        match (a_part.parse::<u32>(), b_part.parse::<u32>()) {
            (Ok(a_num), Ok(b_num)) => match a_num.cmp(&b_num) {
                Ordering::Equal => continue,
                other => return other,
            },
            _ => return a_part.cmp(b_part),
        }
    }

    a_parts.len().cmp(&b_parts.len())
}

#[derive(Debug, Clone)]
pub struct VersionInfo {
    pub version: String,
    pub is_active: bool,
    pub binary_path: std::path::PathBuf,
    pub is_valid: bool,
}

pub struct VersionManager {
    config: Config,
}

impl VersionManager {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn list_installed_versions(&self) -> Result<Vec<VersionInfo>> {
        let versions_dir = self.config.get_versions_dir();

        if !versions_dir.exists() {
            return Ok(vec![]);
        }

        let mut versions = Vec::new();

        for entry in read_dir(&versions_dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.is_dir() {
                if let Some(version_name) = path.file_name().and_then(|n| n.to_str()) {
                    let binary_path = self.config.get_version_binary(version_name);
                    let is_valid = binary_path.exists() && fs::is_executable(&binary_path);
                    let is_active = self
                        .config
                        .active_version
                        .as_ref()
                        .map(|v| v == version_name)
                        .unwrap_or(false);

                    versions.push(VersionInfo {
                        version: version_name.to_string(),
                        is_active,
                        binary_path,
                        is_valid,
                    });
                }
            }
        }

        versions.sort_by(|a, b| version_compare(&a.version, &b.version));

        Ok(versions)
    }

    pub fn is_version_installed(&self, version: &str) -> bool {
        let plain = normalize::to_plain_version(version);
        self.config.get_version_binary(&plain).exists()
    }

    pub fn get_active_version(&self) -> Option<&String> {
        self.config.active_version.as_ref()
    }

    pub fn validate_version(&self, version: &str) -> Result<()> {
        if version.is_empty() {
            return Err(GlsmError::InvalidVersion {
                version: version.to_string(),
            });
        }

        // Versions become directory names, so reject path-like input.
        if version.contains("..") || version.contains('/') || version.contains('\\') {
            return Err(GlsmError::InvalidVersion {
                version: version.to_string(),
            });
        }

        Ok(())
    }
}
