use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::releases::ReleaseEntry;
use crate::error::Result;

pub const RECEIPT_FILE: &str = "receipt.json";

/// Provenance record written next to each installed binary, recording the
/// source artifact and the digest it verified against.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct InstallReceipt {
    pub version: String,
    pub target: String,
    pub url: String,
    pub sha256: String,
    pub installed_at: DateTime<Utc>,
}

impl InstallReceipt {
    pub fn new(entry: &ReleaseEntry) -> Self {
        Self {
            version: entry.version.clone(),
            target: entry.triple.to_string(),
            url: entry.url.clone(),
            sha256: entry.sha256.clone(),
            installed_at: Utc::now(),
        }
    }

    pub fn write(&self, version_dir: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(version_dir.join(RECEIPT_FILE), content)?;
        Ok(())
    }

    pub fn load(version_dir: &Path) -> Result<Option<Self>> {
        let path = version_dir.join(RECEIPT_FILE);
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> ReleaseEntry {
        ReleaseEntry {
            version: "0.3.0".to_string(),
            triple: "x86_64-unknown-linux-gnu",
            url: "https://github.com/Finatext/gls/releases/download/v0.3.0/gls-x86_64-unknown-linux-gnu.tar.gz".to_string(),
            sha256: "53889ae7ece578203fd81569d55d45dda78768a6c7e4636dadfa43b734d3a7c7".to_string(),
        }
    }

    #[test]
    fn test_write_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let receipt = InstallReceipt::new(&sample_entry());
        receipt.write(dir.path()).unwrap();

        let loaded = InstallReceipt::load(dir.path()).unwrap().unwrap();
        assert_eq!(loaded.version, "0.3.0");
        assert_eq!(loaded.target, "x86_64-unknown-linux-gnu");
        assert_eq!(loaded.sha256, receipt.sha256);
    }

    #[test]
    fn test_load_missing_receipt() {
        let dir = tempfile::tempdir().unwrap();
        assert!(InstallReceipt::load(dir.path()).unwrap().is_none());
    }
}
