// Copyright (c) 2025 Headroom Contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and shared CLI plumbing.

pub mod status;
pub mod sweep;
pub mod watch;

use profile_engine::{parse_override, EngineConfig, ProfileEngine};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialises the tracing subscriber from the `-v` count.
///
/// `RUST_LOG` wins when set; otherwise 0 ⇒ warn, 1 ⇒ info, 2 ⇒ debug,
/// 3+ ⇒ trace.
pub fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Loads the engine configuration, defaulting when no file is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(path) => {
            let config = EngineConfig::from_file(path)?;
            tracing::info!("loaded config from {}", path.display());
            Ok(config)
        }
        None => Ok(EngineConfig::default()),
    }
}

/// Builds an engine from the config file plus per-command flags.
///
/// A `--profile` flag replaces the config's `profile` key; `--strict`
/// only ever tightens the config's strict flag.
pub fn build_engine(
    config: &EngineConfig,
    profile_flag: Option<&str>,
    strict_flag: bool,
) -> anyhow::Result<ProfileEngine> {
    let mut engine = ProfileEngine::from_config(config)?;
    if let Some(name) = profile_flag {
        engine.set_override(parse_override(name)?);
    }
    if strict_flag {
        engine.set_strict_floor(true);
    }
    Ok(engine)
}
