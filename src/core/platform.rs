use std::fmt;

use crate::error::{GlsmError, Result};

/// Host operating systems glsm can identify. Only macOS and Linux have
/// published gls artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    MacOs,
    Linux,
    Windows,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    Arm64,
    X86_64,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::MacOs => "macos",
            Platform::Linux => "linux",
            Platform::Windows => "windows",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Arch::Arm64 => "aarch64",
            Arch::X86_64 => "x86_64",
        };
        write!(f, "{name}")
    }
}

/// A (platform, architecture) pair identifying one release artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Target {
    pub platform: Platform,
    pub arch: Arch,
}

impl Target {
    pub const fn new(platform: Platform, arch: Arch) -> Self {
        Self { platform, arch }
    }

    /// Detect the target for the machine this binary runs on.
    pub fn host() -> Result<Self> {
        let platform = if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            return Err(GlsmError::UnsupportedPlatform {
                platform: std::env::consts::OS.to_string(),
                arch: std::env::consts::ARCH.to_string(),
            });
        };

        let arch = if cfg!(target_arch = "aarch64") {
            Arch::Arm64
        } else if cfg!(target_arch = "x86_64") {
            Arch::X86_64
        } else {
            return Err(GlsmError::UnsupportedPlatform {
                platform: std::env::consts::OS.to_string(),
                arch: std::env::consts::ARCH.to_string(),
            });
        };

        Ok(Self { platform, arch })
    }

    /// The release artifact triple, or None when no artifact exists for
    /// this pair.
    pub fn triple(&self) -> Option<&'static str> {
        match (self.platform, self.arch) {
            (Platform::MacOs, Arch::Arm64) => Some("aarch64-apple-darwin"),
            (Platform::MacOs, Arch::X86_64) => Some("x86_64-apple-darwin"),
            (Platform::Linux, Arch::Arm64) => Some("aarch64-unknown-linux-gnu"),
            (Platform::Linux, Arch::X86_64) => Some("x86_64-unknown-linux-gnu"),
            (Platform::Windows, _) => None,
        }
    }

    /// All targets gls publishes artifacts for.
    pub const SUPPORTED: [Target; 4] = [
        Target::new(Platform::MacOs, Arch::Arm64),
        Target::new(Platform::MacOs, Arch::X86_64),
        Target::new(Platform::Linux, Arch::X86_64),
        Target::new(Platform::Linux, Arch::Arm64),
    ];
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.platform, self.arch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_triples() {
        assert_eq!(
            Target::new(Platform::MacOs, Arch::Arm64).triple(),
            Some("aarch64-apple-darwin")
        );
        assert_eq!(
            Target::new(Platform::MacOs, Arch::X86_64).triple(),
            Some("x86_64-apple-darwin")
        );
        assert_eq!(
            Target::new(Platform::Linux, Arch::Arm64).triple(),
            Some("aarch64-unknown-linux-gnu")
        );
        assert_eq!(
            Target::new(Platform::Linux, Arch::X86_64).triple(),
            Some("x86_64-unknown-linux-gnu")
        );
    }

    #[test]
    fn test_windows_has_no_artifact() {
        assert_eq!(Target::new(Platform::Windows, Arch::Arm64).triple(), None);
        assert_eq!(Target::new(Platform::Windows, Arch::X86_64).triple(), None);
    }

    #[test]
    fn test_display() {
        let target = Target::new(Platform::Linux, Arch::X86_64);
        assert_eq!(target.to_string(), "linux/x86_64");
    }

    #[test]
    fn test_every_supported_target_has_a_triple() {
        for target in Target::SUPPORTED {
            assert!(target.triple().is_some());
        }
    }
}
