// Copyright (c) 2025 Headroom Contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `headroom status` command: one-shot report of the selected profile.
//!
//! Samples host memory once, runs a single evaluation, and prints the
//! memory picture, the selection reasoning, and the full derived budget.

use memory_monitor::MemorySize;
use profile_engine::{adjusted_available_gib, EngineConfig, SWAP_PRESSURE_THRESHOLD_PERCENT};

pub async fn execute(
    config: EngineConfig,
    profile_flag: Option<String>,
    strict: bool,
) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║            headroom · Profile Status                ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    let snapshot = memory_monitor::sample()?;
    let engine = super::build_engine(&config, profile_flag.as_deref(), strict)?;
    let transition = engine.evaluate(&snapshot)?;
    let profile = transition.profile();
    let budget = transition.budget();

    // ── Memory ─────────────────────────────────────────────────
    println!("  Memory");
    println!("   Platform:     {}", snapshot.platform);
    println!("   Total:        {:.1} GiB", snapshot.total_gib());
    println!("   Available:    {:.1} GiB", snapshot.available_gib());
    let used_gib = snapshot.total_gib() - snapshot.available_gib();
    let pct = snapshot.utilisation() * 100.0;
    let bar = usage_bar(snapshot.utilisation());
    println!("   Used:         {used_gib:.1} GiB ({pct:.1}%)  {bar}");
    println!("   Swap used:    {:.1}%", snapshot.swap_used_percent);
    println!();

    // ── Selection ──────────────────────────────────────────────
    let adjusted = adjusted_available_gib(&snapshot)?;
    println!("  Selection");
    println!("   Adjusted:     {adjusted:.2} GiB usable for budgeting");
    match engine.override_profile() {
        Some(pinned) => println!("   Profile:      {pinned} (pinned by override)"),
        None => println!("   Profile:      {profile}"),
    }
    println!();

    // ── Budget ─────────────────────────────────────────────────
    println!("  Budget");
    println!("   Context:      {} tokens", budget.context_tokens);
    println!(
        "   Weights:      {} ({})",
        budget.quantization,
        budget.quantization.gguf_name(),
    );
    println!(
        "   KV cache:     {}",
        MemorySize::from_bytes(budget.kv_cache_bytes),
    );
    println!("   Batch size:   {}", budget.batch_size);
    println!("   Concurrency:  {} background ops", budget.concurrent_ops);
    println!(
        "   RAG cache:    {}",
        MemorySize::from_bytes(budget.rag_cache_bytes),
    );
    println!("   Compaction:   {}", budget.compaction);
    println!("   Embeddings:   {} tier", profile.embedding_tier());
    println!("   Loading:      {}", profile.model_loading());
    println!(
        "   Throughput:   ~{} tok/s expected",
        profile.expected_tokens_per_sec(),
    );
    println!();

    // ── Warnings ───────────────────────────────────────────────
    let swap_pressured = snapshot.swap_used_percent > SWAP_PRESSURE_THRESHOLD_PERCENT;
    if budget.degraded || swap_pressured {
        println!("  Warnings");
        if budget.degraded {
            println!("   WARNING: context window degraded below the {profile} ceiling");
        }
        if swap_pressured {
            println!(
                "   WARNING: swap pressure above {SWAP_PRESSURE_THRESHOLD_PERCENT:.0}% \
                 is discounting available memory",
            );
        }
        println!();
    }

    println!("{}", snapshot.summary());

    Ok(())
}

/// Creates a visual usage bar (0.0-1.0 scale).
fn usage_bar(ratio: f64) -> String {
    let filled = (ratio * 20.0).round() as usize;
    let filled = filled.min(20);
    let empty = 20 - filled;
    let symbol = if ratio >= 0.9 {
        "#"
    } else if ratio >= 0.7 {
        "="
    } else {
        "-"
    };
    format!("[{}{}]", symbol.repeat(filled), ".".repeat(empty))
}
