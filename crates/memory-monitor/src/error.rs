// Copyright (c) 2025 Headroom Contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for host sampling and size parsing.

/// Errors produced while sampling the host or parsing user-supplied values.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// The host returned unusable memory readings.
    #[error("failed to sample host memory: {detail}")]
    Sample { detail: String },

    /// A human-readable size string could not be parsed.
    #[error("invalid memory size '{input}': {detail}")]
    InvalidSize { input: String, detail: String },

    /// A platform name was not recognised.
    #[error(
        "unknown platform '{input}' (expected linux, macos-apple-silicon, macos-intel, or windows)"
    )]
    UnknownPlatform { input: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MonitorError::InvalidSize {
            input: "5X".to_string(),
            detail: "unknown suffix".to_string(),
        };
        assert!(err.to_string().contains("5X"));
        assert!(err.to_string().contains("unknown suffix"));
    }

    #[test]
    fn test_unknown_platform_lists_valid_names() {
        let err = MonitorError::UnknownPlatform {
            input: "freebsd".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("freebsd"));
        assert!(msg.contains("linux"));
        assert!(msg.contains("windows"));
    }
}
