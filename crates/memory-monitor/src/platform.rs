// Copyright (c) 2025 Headroom Contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Host platform identification.
//!
//! The profile engine treats most platforms identically; the exception is
//! Apple Silicon, where RAM is unified memory shared with the GPU and a
//! reserve must come off the top before profile selection. Detection is a
//! pure function of OS and CPU architecture strings so it can be tested
//! without conditional compilation.

use crate::MonitorError;
use std::fmt;
use std::str::FromStr;

/// The host targets the profile engine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    /// Linux on any architecture.
    Linux,
    /// macOS on Apple Silicon (unified memory).
    MacosAppleSilicon,
    /// macOS on Intel.
    MacosIntel,
    /// Windows on any architecture.
    Windows,
}

impl Platform {
    /// Detects the platform of the current host.
    pub fn detect() -> Self {
        Self::from_os_arch(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Maps an OS / architecture pair to a platform.
    ///
    /// Unrecognised operating systems fall back to [`Platform::Linux`],
    /// which carries no platform-specific memory adjustment.
    pub fn from_os_arch(os: &str, arch: &str) -> Self {
        match os {
            "macos" if arch == "aarch64" => Platform::MacosAppleSilicon,
            "macos" => Platform::MacosIntel,
            "windows" => Platform::Windows,
            _ => Platform::Linux,
        }
    }

    /// Returns `true` on Apple Silicon, where memory is shared with the GPU.
    pub fn is_apple_silicon(&self) -> bool {
        matches!(self, Platform::MacosAppleSilicon)
    }

    /// Canonical lowercase name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::MacosAppleSilicon => "macos-apple-silicon",
            Platform::MacosIntel => "macos-intel",
            Platform::Windows => "windows",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "linux" => Ok(Platform::Linux),
            "macos-apple-silicon" | "apple-silicon" => Ok(Platform::MacosAppleSilicon),
            "macos-intel" => Ok(Platform::MacosIntel),
            "windows" => Ok(Platform::Windows),
            _ => Err(MonitorError::UnknownPlatform {
                input: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_os_arch() {
        assert_eq!(
            Platform::from_os_arch("macos", "aarch64"),
            Platform::MacosAppleSilicon
        );
        assert_eq!(
            Platform::from_os_arch("macos", "x86_64"),
            Platform::MacosIntel
        );
        assert_eq!(Platform::from_os_arch("windows", "x86_64"), Platform::Windows);
        assert_eq!(Platform::from_os_arch("linux", "aarch64"), Platform::Linux);
        // Unknown OS falls back to the unadjusted platform.
        assert_eq!(Platform::from_os_arch("freebsd", "x86_64"), Platform::Linux);
    }

    #[test]
    fn test_detect_matches_consts() {
        let detected = Platform::detect();
        assert_eq!(
            detected,
            Platform::from_os_arch(std::env::consts::OS, std::env::consts::ARCH)
        );
    }

    #[test]
    fn test_is_apple_silicon() {
        assert!(Platform::MacosAppleSilicon.is_apple_silicon());
        assert!(!Platform::MacosIntel.is_apple_silicon());
        assert!(!Platform::Linux.is_apple_silicon());
    }

    #[test]
    fn test_parse_roundtrip() {
        for platform in [
            Platform::Linux,
            Platform::MacosAppleSilicon,
            Platform::MacosIntel,
            Platform::Windows,
        ] {
            let parsed: Platform = platform.as_str().parse().unwrap();
            assert_eq!(parsed, platform);
        }
    }

    #[test]
    fn test_parse_accepts_case_and_shorthand() {
        assert_eq!("LINUX".parse::<Platform>().unwrap(), Platform::Linux);
        assert_eq!(
            " apple-silicon ".parse::<Platform>().unwrap(),
            Platform::MacosAppleSilicon
        );
    }

    #[test]
    fn test_parse_unknown() {
        assert!("beos".parse::<Platform>().is_err());
    }

    #[test]
    fn test_serde_kebab_case() {
        let json = serde_json::to_string(&Platform::MacosAppleSilicon).unwrap();
        assert_eq!(json, "\"macos-apple-silicon\"");
        let back: Platform = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Platform::MacosAppleSilicon);
    }
}
