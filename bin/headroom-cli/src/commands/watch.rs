// Copyright (c) 2025 Headroom Contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `headroom watch` command: periodic re-evaluation loop.
//!
//! Samples host memory on a fixed interval and feeds each snapshot to one
//! engine instance. Profile changes are printed as they happen; steady
//! states only show up at debug verbosity.

use profile_engine::{EngineConfig, ProfileTransition};
use std::time::Duration;

pub async fn execute(
    config: EngineConfig,
    interval_flag: Option<u64>,
    profile_flag: Option<String>,
    strict: bool,
) -> anyhow::Result<()> {
    let interval_secs = interval_flag.unwrap_or(config.poll_interval_secs);
    if interval_secs == 0 {
        anyhow::bail!("--interval must be at least 1 second");
    }

    let engine = super::build_engine(&config, profile_flag.as_deref(), strict)?;
    let mut sampler = memory_monitor::MemorySampler::new();

    println!("╔══════════════════════════════════════════════════════╗");
    println!("║            headroom · Profile Watch                 ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();
    println!(
        "  Sampling every {interval_secs}s on {} — Ctrl-C to stop.",
        sampler.platform(),
    );
    println!();

    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));

    loop {
        // First tick completes immediately, so the initial profile prints
        // without waiting a full interval.
        ticker.tick().await;

        let snapshot = sampler.sample()?;
        let transition = engine.evaluate(&snapshot)?;

        match transition {
            ProfileTransition::Unchanged { .. } => {
                tracing::debug!(
                    "{} with {:.1} GiB available",
                    transition.describe(),
                    snapshot.available_gib(),
                );
            }
            _ => {
                println!("  {}", transition.describe());
                println!("   {}", transition.budget().summary());
                println!();
            }
        }
    }
}
