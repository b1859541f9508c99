use std::collections::BTreeMap;

use serde::Deserialize;

use crate::core::platform::Target;
use crate::core::version::{normalize, version_compare};
use crate::error::{GlsmError, Result};

/// The pinned release table, embedded at build time.
const RELEASES_TOML: &str = include_str!("releases.toml");

const DOWNLOAD_BASE: &str = "https://github.com/Finatext/gls/releases/download";

/// Length of a hex-encoded SHA-256 digest.
pub const CHECKSUM_LEN: usize = 64;

#[derive(Debug, Deserialize)]
struct ReleaseTable {
    release: Vec<Release>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Release {
    pub version: String,
    /// Artifact digests keyed by target triple.
    pub sha256: BTreeMap<String, String>,
}

/// One resolved (version, target) artifact: where to fetch it and what it
/// must hash to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseEntry {
    pub version: String,
    pub triple: &'static str,
    pub url: String,
    pub sha256: String,
}

pub struct ReleaseIndex {
    releases: Vec<Release>,
}

impl ReleaseIndex {
    pub fn load() -> Result<Self> {
        let table: ReleaseTable = toml::from_str(RELEASES_TOML)?;
        Ok(Self {
            releases: table.release,
        })
    }

    /// Versions in the table, oldest first.
    pub fn versions(&self) -> Vec<&str> {
        let mut versions: Vec<&str> = self.releases.iter().map(|r| r.version.as_str()).collect();
        versions.sort_by(|a, b| version_compare(a, b));
        versions
    }

    /// The highest version in the table.
    pub fn latest(&self) -> Result<&str> {
        self.releases
            .iter()
            .map(|r| r.version.as_str())
            .max_by(|a, b| version_compare(a, b))
            .ok_or_else(|| GlsmError::ConfigError {
                message: "release table is empty".to_string(),
            })
    }

    /// Target triples an individual version was published for.
    pub fn triples_for(&self, version: &str) -> Vec<&str> {
        let plain = normalize::to_plain_version(version);
        self.releases
            .iter()
            .find(|r| r.version == plain)
            .map(|r| r.sha256.keys().map(|k| k.as_str()).collect())
            .unwrap_or_default()
    }

    /// Map a requested version and target to the one artifact that serves
    /// it. `latest` picks the highest version in the table.
    pub fn resolve(&self, version: &str, target: Target) -> Result<ReleaseEntry> {
        let plain = if version == "latest" {
            self.latest()?.to_string()
        } else {
            normalize::to_plain_version(version)
        };

        let triple = target.triple().ok_or_else(|| GlsmError::UnsupportedPlatform {
            platform: target.platform.to_string(),
            arch: target.arch.to_string(),
        })?;

        let release = self
            .releases
            .iter()
            .find(|r| r.version == plain)
            .ok_or_else(|| GlsmError::VersionNotFound {
                version: plain.clone(),
            })?;

        let sha256 = release
            .sha256
            .get(triple)
            .ok_or_else(|| GlsmError::UnsupportedPlatform {
                platform: target.platform.to_string(),
                arch: target.arch.to_string(),
            })?;

        Ok(ReleaseEntry {
            version: plain.clone(),
            triple,
            url: format!("{DOWNLOAD_BASE}/v{plain}/gls-{triple}.tar.gz"),
            sha256: sha256.clone(),
        })
    }
}
