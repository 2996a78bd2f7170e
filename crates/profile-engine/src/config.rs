// Copyright (c) 2025 Headroom Contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Engine configuration loaded from TOML files or constructed
//! programmatically.
//!
//! # TOML Format
//! ```toml
//! profile = "auto"             # or survival | comfort | power | beast
//! strict_context_floor = false
//! poll_interval_secs = 30
//! ```
//!
//! Missing keys take their defaults; unknown keys are rejected so a typo
//! fails loudly instead of silently running on defaults.

use crate::profile::parse_override;
use crate::{EngineError, Profile};
use std::path::Path;

/// On-disk configuration for the profile engine and its watch loop.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Profile override: `"auto"` selects from memory, a profile name
    /// pins that profile.
    #[serde(default = "default_profile")]
    pub profile: String,
    /// Fail evaluation instead of clamping when even the 2048-token floor
    /// will not fit.
    #[serde(default)]
    pub strict_context_floor: bool,
    /// Seconds between samples in the watch loop.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

fn default_profile() -> String {
    "auto".to_string()
}

fn default_poll_interval() -> u64 {
    30
}

impl EngineConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, EngineError> {
        let content = std::fs::read_to_string(path).map_err(|e| EngineError::Config {
            detail: format!("cannot read config '{}': {e}", path.display()),
        })?;
        Self::from_toml(&content)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, EngineError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| EngineError::Config {
            detail: format!("TOML parse error: {e}"),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, EngineError> {
        toml::to_string_pretty(self).map_err(|e| EngineError::Config {
            detail: format!("TOML serialise error: {e}"),
        })
    }

    /// Checks value ranges and the profile name.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.poll_interval_secs == 0 {
            return Err(EngineError::Config {
                detail: "poll_interval_secs must be at least 1".to_string(),
            });
        }
        self.resolve_override()?;
        Ok(())
    }

    /// Resolves the `profile` key to an optional override.
    pub fn resolve_override(&self) -> Result<Option<Profile>, EngineError> {
        parse_override(&self.profile)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            profile: default_profile(),
            strict_context_floor: false,
            poll_interval_secs: default_poll_interval(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let c = EngineConfig::default();
        assert_eq!(c.profile, "auto");
        assert!(!c.strict_context_floor);
        assert_eq!(c.poll_interval_secs, 30);
        assert_eq!(c.resolve_override().unwrap(), None);
    }

    #[test]
    fn test_from_toml_empty_uses_defaults() {
        let c = EngineConfig::from_toml("").unwrap();
        assert_eq!(c, EngineConfig::default());
    }

    #[test]
    fn test_from_toml_full() {
        let toml = r#"
profile = "power"
strict_context_floor = true
poll_interval_secs = 5
"#;
        let c = EngineConfig::from_toml(toml).unwrap();
        assert_eq!(c.resolve_override().unwrap(), Some(Profile::Power));
        assert!(c.strict_context_floor);
        assert_eq!(c.poll_interval_secs, 5);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = EngineConfig::from_toml("profil = \"auto\"").unwrap_err();
        assert!(err.to_string().contains("profil"));
    }

    #[test]
    fn test_unknown_profile_rejected_at_load() {
        let err = EngineConfig::from_toml("profile = \"turbo\"").unwrap_err();
        assert!(matches!(err, EngineError::UnknownProfile { .. }));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = EngineConfig::from_toml("poll_interval_secs = 0").unwrap_err();
        assert!(err.to_string().contains("poll_interval_secs"));
    }

    #[test]
    fn test_to_toml_roundtrip() {
        let c = EngineConfig {
            profile: "beast".to_string(),
            strict_context_floor: true,
            poll_interval_secs: 10,
        };
        let toml = c.to_toml().unwrap();
        let back = EngineConfig::from_toml(&toml).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("headroom.toml");
        std::fs::write(&path, "profile = \"comfort\"\n").unwrap();

        let c = EngineConfig::from_file(&path).unwrap();
        assert_eq!(c.resolve_override().unwrap(), Some(Profile::Comfort));
    }

    #[test]
    fn test_from_file_missing() {
        let err = EngineConfig::from_file(Path::new("/nonexistent/headroom.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/headroom.toml"));
    }
}
