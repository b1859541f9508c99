use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GlsmError>;

#[derive(Error, Debug)]
pub enum GlsmError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Release table error: {0}")]
    ReleaseTable(#[from] toml::de::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Version '{version}' is not in the release table")]
    VersionNotFound { version: String },

    #[error("Invalid version format: '{version}'")]
    InvalidVersion { version: String },

    #[error("No gls release is published for {platform}/{arch}")]
    UnsupportedPlatform { platform: String, arch: String },

    #[error("Download failed: {url}")]
    DownloadError { url: String },

    #[error("Checksum mismatch for {}: expected {}, got {}", .path.display(), .expected, .actual)]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("Extraction failed for {}: {}", .path.display(), .reason)]
    ExtractionError { path: PathBuf, reason: String },

    #[error("Self-test failed for {}: {}", .path.display(), .reason)]
    SelfTestFailed { path: PathBuf, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Home directory not found")]
    HomeDirectoryNotFound,

    #[error("Permission denied: {}", .path.display())]
    PermissionDenied { path: PathBuf },

    #[error("Binary not found: {name}")]
    BinaryNotFound { name: String },
}
