// Copyright (c) 2025 Headroom Contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `headroom sweep` command: what-if planning across memory sizes.
//!
//! Builds a synthetic snapshot for each requested available-memory size
//! and prints a comparison table of the selected profile and budget. No
//! host sampling is involved, so the same command answers "what would a
//! 64 GiB Mac Studio get?" from any machine.

use memory_monitor::{MemorySize, MemorySnapshot, Platform};
use profile_engine::{adjusted_available_gib, derive_budget, select_profile};

pub async fn execute(
    available_list: String,
    platform_str: String,
    swap: f64,
    total: Option<String>,
) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║            headroom · Budget Sweep                  ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let platform: Platform = platform_str.parse()?;

    // Parse comma-separated memory sizes.
    let sizes: Vec<MemorySize> = available_list
        .split(',')
        .map(|s| {
            MemorySize::parse(s.trim())
                .map_err(|e| anyhow::anyhow!("invalid size '{}': {e}", s.trim()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let total_override = total
        .map(|s| {
            MemorySize::parse(s.trim())
                .map_err(|e| anyhow::anyhow!("invalid size '{}': {e}", s.trim()))
        })
        .transpose()?;

    println!("  Platform:   {platform}");
    println!("  Swap used:  {swap:.0}%");
    if let Some(total) = total_override {
        println!("  Total RAM:  {total}");
    }
    println!();

    // ── Results Table ──────────────────────────────────────────
    println!(
        "  {:<10} {:>9} {:<10} {:>8} {:>6} {:>8} {:>5} {:>4} {:>8} {:<10} {}",
        "Available", "Adjusted", "Profile", "Context", "Quant", "KV", "Batch", "Ops", "RAG",
        "Compaction", "Flags",
    );
    println!("  {}", "-".repeat(96));

    let mut any_degraded = false;

    for &size in &sizes {
        let total_bytes = total_override.map(|t| t.as_bytes()).unwrap_or(size.as_bytes());
        if total_bytes < size.as_bytes() {
            anyhow::bail!(
                "--total {} is smaller than available size {size}",
                MemorySize::from_bytes(total_bytes),
            );
        }

        let snapshot = MemorySnapshot {
            total_bytes,
            available_bytes: size.as_bytes(),
            swap_used_percent: swap,
            platform,
        };

        let adjusted = adjusted_available_gib(&snapshot)?;
        let profile = select_profile(&snapshot)?;
        let budget = derive_budget(profile, &snapshot)?;
        any_degraded = any_degraded || budget.degraded;

        println!(
            "  {:<10} {:>9} {:<10} {:>8} {:>6} {:>8} {:>5} {:>4} {:>8} {:<10} {}",
            format!("{size}"),
            format!("{adjusted:.2}G"),
            format!("{profile}"),
            budget.context_tokens,
            format!("{}", budget.quantization),
            format!("{}", MemorySize::from_bytes(budget.kv_cache_bytes)),
            budget.batch_size,
            budget.concurrent_ops,
            format!("{}", MemorySize::from_bytes(budget.rag_cache_bytes)),
            format!("{}", budget.compaction),
            if budget.degraded { "degraded" } else { "" },
        );
    }

    println!();
    if any_degraded {
        println!("  Note: degraded rows clamp the context window below the profile ceiling.");
        println!();
    }

    Ok(())
}
