// Copyright (c) 2025 Headroom Contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Human-readable memory quantities.
//!
//! [`MemorySize`] is how byte counts cross the CLI boundary: sweep inputs
//! like `"16G"` parse into exact byte counts, and budget figures format
//! back out with the largest unit that divides cleanly.

use crate::MonitorError;
use std::fmt;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;
const GIB: u64 = 1024 * 1024 * 1024;

/// A quantity of memory in bytes with human-readable parsing and display.
///
/// # Parsing
/// Accepts SI-style binary suffixes, case-insensitive:
/// - `"512M"` or `"512MB"` → 512 × 1024² bytes
/// - `"2G"` or `"2GB"` → 2 × 1024³ bytes
/// - `"4096K"` or `"4096KB"` → 4096 × 1024 bytes
/// - `"1073741824"` → raw byte count
///
/// # Examples
/// ```
/// use memory_monitor::MemorySize;
///
/// let size = MemorySize::parse("2G").unwrap();
/// assert_eq!(size.as_bytes(), 2 * 1024 * 1024 * 1024);
/// assert_eq!(size.to_string(), "2 GB");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct MemorySize {
    bytes: u64,
}

impl MemorySize {
    /// Creates a size from a byte count.
    pub const fn from_bytes(bytes: u64) -> Self {
        Self { bytes }
    }

    /// Creates a size from kibibytes.
    pub const fn from_kb(kb: u64) -> Self {
        Self { bytes: kb * KIB }
    }

    /// Creates a size from mebibytes.
    pub const fn from_mb(mb: u64) -> Self {
        Self { bytes: mb * MIB }
    }

    /// Creates a size from gibibytes.
    pub const fn from_gb(gb: u64) -> Self {
        Self { bytes: gb * GIB }
    }

    /// Returns the size in bytes.
    pub const fn as_bytes(&self) -> u64 {
        self.bytes
    }

    /// Returns the size in mebibytes (truncated).
    pub const fn as_mb(&self) -> u64 {
        self.bytes / MIB
    }

    /// Returns the size in gibibytes (fractional).
    pub fn as_gib(&self) -> f64 {
        self.bytes as f64 / GIB as f64
    }

    /// Parses a human-readable size string.
    ///
    /// Accepted formats: `"512M"`, `"512MB"`, `"2G"`, `"2GB"`, `"4096K"`,
    /// `"4096KB"`, or a plain byte count. Case-insensitive. Zero is
    /// rejected.
    pub fn parse(input: &str) -> Result<Self, MonitorError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(MonitorError::InvalidSize {
                input: input.to_string(),
                detail: "empty string".to_string(),
            });
        }

        let s_upper = s.to_uppercase();

        // Split into numeric part and suffix.
        let (num_str, multiplier) = if s_upper.ends_with("GB") {
            (&s[..s.len() - 2], GIB)
        } else if s_upper.ends_with('G') {
            (&s[..s.len() - 1], GIB)
        } else if s_upper.ends_with("MB") {
            (&s[..s.len() - 2], MIB)
        } else if s_upper.ends_with('M') {
            (&s[..s.len() - 1], MIB)
        } else if s_upper.ends_with("KB") {
            (&s[..s.len() - 2], KIB)
        } else if s_upper.ends_with('K') {
            (&s[..s.len() - 1], KIB)
        } else if s_upper.ends_with('B') {
            (&s[..s.len() - 1], 1)
        } else {
            // Plain number — bytes.
            (s, 1)
        };

        let value: u64 = num_str.trim().parse().map_err(|_| MonitorError::InvalidSize {
            input: input.to_string(),
            detail: "expected a number followed by an optional suffix (K, M, G)".to_string(),
        })?;

        let bytes = value
            .checked_mul(multiplier)
            .ok_or_else(|| MonitorError::InvalidSize {
                input: input.to_string(),
                detail: "value overflows".to_string(),
            })?;

        if bytes == 0 {
            return Err(MonitorError::InvalidSize {
                input: input.to_string(),
                detail: "size must be non-zero".to_string(),
            });
        }

        Ok(Self { bytes })
    }
}

impl fmt::Display for MemorySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.bytes >= GIB && self.bytes % GIB == 0 {
            write!(f, "{} GB", self.bytes / GIB)
        } else if self.bytes >= MIB && self.bytes % MIB == 0 {
            write!(f, "{} MB", self.bytes / MIB)
        } else if self.bytes >= KIB && self.bytes % KIB == 0 {
            write!(f, "{} KB", self.bytes / KIB)
        } else {
            write!(f, "{} B", self.bytes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(MemorySize::from_kb(4).as_bytes(), 4096);
        assert_eq!(MemorySize::from_mb(512).as_bytes(), 512 * MIB);
        assert_eq!(MemorySize::from_gb(2).as_mb(), 2048);
        assert!((MemorySize::from_gb(3).as_gib() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_megabytes() {
        assert_eq!(MemorySize::parse("512M").unwrap().as_mb(), 512);
        assert_eq!(MemorySize::parse("512MB").unwrap().as_mb(), 512);
        assert_eq!(MemorySize::parse("512m").unwrap().as_mb(), 512);
    }

    #[test]
    fn test_parse_gigabytes() {
        assert_eq!(MemorySize::parse("1G").unwrap().as_mb(), 1024);
        assert_eq!(MemorySize::parse("16gb").unwrap().as_gib() as u64, 16);
    }

    #[test]
    fn test_parse_kilobytes_and_raw() {
        assert_eq!(MemorySize::parse("1024K").unwrap().as_bytes(), MIB);
        assert_eq!(MemorySize::parse("1048576").unwrap().as_mb(), 1);
    }

    #[test]
    fn test_parse_with_whitespace() {
        assert_eq!(MemorySize::parse("  8G  ").unwrap().as_gib() as u64, 8);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(MemorySize::parse("").is_err());
        assert!(MemorySize::parse("abc").is_err());
        assert!(MemorySize::parse("0M").is_err());
        assert!(MemorySize::parse("12X").is_err());
    }

    #[test]
    fn test_parse_overflow() {
        // Fits in u64 as a number, overflows once multiplied by 1024³.
        assert!(MemorySize::parse("18000000000000000000G").is_err());
    }

    #[test]
    fn test_display_picks_clean_unit() {
        assert_eq!(MemorySize::from_gb(8).to_string(), "8 GB");
        assert_eq!(MemorySize::from_mb(200).to_string(), "200 MB");
        assert_eq!(MemorySize::from_bytes(2048).to_string(), "2 KB");
        assert_eq!(MemorySize::from_bytes(100).to_string(), "100 B");
        // 8000 MiB is not a whole number of GiB; stays in MB.
        assert_eq!(MemorySize::from_mb(8000).to_string(), "8000 MB");
    }

    #[test]
    fn test_ordering() {
        assert!(MemorySize::from_mb(500) < MemorySize::from_gb(1));
    }

    #[test]
    fn test_serde_transparent() {
        let size = MemorySize::from_mb(256);
        let json = serde_json::to_string(&size).unwrap();
        assert_eq!(json, (256 * MIB).to_string());
        let back: MemorySize = serde_json::from_str(&json).unwrap();
        assert_eq!(back, size);
    }
}
