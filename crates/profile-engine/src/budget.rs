// Copyright (c) 2025 Headroom Contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Resource budget derivation.
//!
//! Most budget fields come straight from the profile's static table. The
//! context window does not: it is recomputed from the live snapshot every
//! time, so a profile pinned by an override on a machine that cannot feed
//! it still yields an honest, usable budget — clamped down and flagged
//! `degraded` rather than promising memory that is not there.
//!
//! # Context window formula
//!
//! ```text
//! kv_budget_gib  = adjusted_available − model_overhead − 0.5 (embeddings) − 1.0 (fixed)
//! raw_tokens     = floor(kv_budget_gib × 1024 / mb_per_1k_tokens) × 1024
//! context_tokens = clamp(raw_tokens, 2048, ceiling[profile])
//! ```
//!
//! `kv_cache_bytes` is then exact integer arithmetic over the final token
//! count, so consumers can size allocations without re-deriving anything.

use crate::selection::adjusted_available_gib;
use crate::{CompactionPolicy, EngineError, Profile, Quantization};
use memory_monitor::{MemorySize, MemorySnapshot};

/// Minimum viable context window, tokens.
pub const CONTEXT_FLOOR_TOKENS: u32 = 2048;
/// Embedding model resident overhead, GiB.
pub const EMBEDDING_OVERHEAD_GIB: f64 = 0.5;
/// Fixed process overhead (runtime, buffers, fragmentation), GiB.
pub const FIXED_OVERHEAD_GIB: f64 = 1.0;

const MIB: u64 = 1024 * 1024;

/// The complete resource configuration derived for one profile on one
/// snapshot.
///
/// Immutable once computed: consumers receive a value, not a view into
/// engine state. `context_tokens` is always a multiple of 1024, at least
/// [`CONTEXT_FLOOR_TOKENS`], and never above the profile's ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct ResourceBudget {
    /// Profile this budget was derived for.
    pub profile: Profile,
    /// Context window in tokens.
    pub context_tokens: u32,
    /// Weight quantization level.
    pub quantization: Quantization,
    /// Inference batch size.
    pub batch_size: u32,
    /// Maximum concurrent operations.
    pub concurrent_ops: u32,
    /// kv-cache allocation consistent with `context_tokens`.
    pub kv_cache_bytes: u64,
    /// Retrieval cache allocation.
    pub rag_cache_bytes: u64,
    /// Conversation compaction policy.
    pub compaction: CompactionPolicy,
    /// True when actual memory could not meet the profile's nominal
    /// context ceiling and the window was clamped down (or floored).
    pub degraded: bool,
}

impl ResourceBudget {
    /// One-line human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "{} budget: context {} tokens, {} weights ({}), batch {}, {} ops, \
             kv cache {}, rag cache {}, {} compaction{}",
            self.profile,
            self.context_tokens,
            self.quantization,
            self.quantization.gguf_name(),
            self.batch_size,
            self.concurrent_ops,
            MemorySize::from_bytes(self.kv_cache_bytes),
            MemorySize::from_bytes(self.rag_cache_bytes),
            self.compaction,
            if self.degraded { " [degraded]" } else { "" },
        )
    }
}

/// kv-cache bytes for a context size at a quantization level.
///
/// `context_tokens` must be a multiple of 1024, which every derived budget
/// guarantees, so the result is exact.
pub fn kv_cache_bytes_for(context_tokens: u32, quantization: Quantization) -> u64 {
    (context_tokens as u64 / 1024) * quantization.mb_per_1k_tokens() as u64 * MIB
}

/// Formula-derived context size before clamping, in tokens.
///
/// Zero when the overheads alone exceed the adjusted available memory.
fn raw_context_tokens(quantization: Quantization, adjusted_gib: f64) -> u32 {
    let kv_budget_gib = adjusted_gib
        - quantization.model_overhead_gib()
        - EMBEDDING_OVERHEAD_GIB
        - FIXED_OVERHEAD_GIB;
    if kv_budget_gib <= 0.0 {
        return 0;
    }
    let blocks = (kv_budget_gib * 1024.0 / quantization.mb_per_1k_tokens() as f64).floor();
    // One block is 1024 tokens; cap to stay clear of u32 overflow on
    // absurdly large hosts.
    let blocks = blocks.min((u32::MAX / 1024) as f64) as u32;
    blocks * 1024
}

/// Smallest adjusted-available figure that clears the floor context.
fn min_viable_gib(quantization: Quantization) -> f64 {
    quantization.model_overhead_gib()
        + EMBEDDING_OVERHEAD_GIB
        + FIXED_OVERHEAD_GIB
        + (CONTEXT_FLOOR_TOKENS as f64 / 1024.0) * quantization.mb_per_1k_tokens() as f64 / 1024.0
}

fn build_budget(profile: Profile, adjusted_gib: f64) -> ResourceBudget {
    let quantization = profile.quantization();
    let ceiling = profile.context_ceiling_tokens();
    let raw = raw_context_tokens(quantization, adjusted_gib);
    let context_tokens = raw.clamp(CONTEXT_FLOOR_TOKENS, ceiling);
    let degraded = raw < ceiling;

    if degraded {
        tracing::debug!(
            "context degraded: {:.2} GiB adjusted supports {} of the {} token ceiling",
            adjusted_gib,
            context_tokens,
            ceiling,
        );
    }

    ResourceBudget {
        profile,
        context_tokens,
        quantization,
        batch_size: profile.batch_size(),
        concurrent_ops: profile.concurrent_ops(),
        kv_cache_bytes: kv_cache_bytes_for(context_tokens, quantization),
        rag_cache_bytes: profile.rag_cache_bytes(),
        compaction: profile.compaction(),
        degraded,
    }
}

/// Derives the complete budget for `profile` on `snapshot`.
///
/// Never fails on low memory: the context window clamps to
/// [`CONTEXT_FLOOR_TOKENS`] and `degraded` is set. The only errors are
/// snapshot contract violations.
pub fn derive_budget(
    profile: Profile,
    snapshot: &MemorySnapshot,
) -> Result<ResourceBudget, EngineError> {
    let adjusted = adjusted_available_gib(snapshot)?;
    Ok(build_budget(profile, adjusted))
}

/// Derives the budget, failing when even the floor context will not fit.
///
/// Hard-stop variant for callers that prefer refusing to start over
/// limping along at 2048 tokens.
pub fn derive_budget_strict(
    profile: Profile,
    snapshot: &MemorySnapshot,
) -> Result<ResourceBudget, EngineError> {
    let adjusted = adjusted_available_gib(snapshot)?;
    let quantization = profile.quantization();
    if raw_context_tokens(quantization, adjusted) < CONTEXT_FLOOR_TOKENS {
        return Err(EngineError::InsufficientMemory {
            available_gib: adjusted,
            required_gib: min_viable_gib(quantization),
            floor: CONTEXT_FLOOR_TOKENS,
        });
    }
    Ok(build_budget(profile, adjusted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use memory_monitor::Platform;

    fn linux_snap(available_gib: f64) -> MemorySnapshot {
        MemorySnapshot::from_gib(128.0, available_gib, 0.0, Platform::Linux)
    }

    #[test]
    fn test_comfort_budget_on_16_gib() {
        let budget = derive_budget(Profile::Comfort, &linux_snap(16.0)).unwrap();
        // kv budget 16 − 1.5 − 0.5 − 1.0 = 13 GiB supports far more than
        // the 32768 ceiling, so the ceiling wins and nothing is degraded.
        assert_eq!(budget.context_tokens, 32_768);
        assert_eq!(budget.quantization, Quantization::FourBit);
        assert_eq!(budget.batch_size, 4);
        assert_eq!(budget.concurrent_ops, 2);
        assert_eq!(budget.rag_cache_bytes, 500 * MIB);
        assert_eq!(budget.compaction, CompactionPolicy::Smart);
        assert_eq!(budget.kv_cache_bytes, 32 * 250 * MIB);
        assert!(!budget.degraded);
    }

    #[test]
    fn test_beast_budget_on_8_gib_is_degraded() {
        let budget = derive_budget(Profile::Beast, &linux_snap(8.0)).unwrap();
        // kv budget 8 − 2.5 − 0.5 − 1.0 = 4 GiB; floor(4096 / 400) = 10
        // blocks = 10240 tokens, far below the 131072 ceiling.
        assert_eq!(budget.context_tokens, 10_240);
        assert!(budget.degraded);
        assert_eq!(budget.kv_cache_bytes, 10 * 400 * MIB);
    }

    #[test]
    fn test_floor_when_memory_exhausted() {
        let budget = derive_budget(Profile::Survival, &linux_snap(1.0)).unwrap();
        assert_eq!(budget.context_tokens, CONTEXT_FLOOR_TOKENS);
        assert!(budget.degraded);
        assert_eq!(budget.kv_cache_bytes, 2 * 250 * MIB);
    }

    #[test]
    fn test_strict_errors_below_floor() {
        let err = derive_budget_strict(Profile::Survival, &linux_snap(1.0)).unwrap_err();
        match err {
            EngineError::InsufficientMemory {
                available_gib,
                required_gib,
                floor,
            } => {
                assert_eq!(floor, CONTEXT_FLOOR_TOKENS);
                assert!((available_gib - 1.0).abs() < 1e-9);
                // 1.5 + 0.5 + 1.0 + 2 × 250 / 1024 GiB.
                assert!((required_gib - 3.48828125).abs() < 1e-9);
            }
            other => panic!("expected InsufficientMemory, got {other:?}"),
        }
    }

    #[test]
    fn test_strict_passes_at_exact_minimum() {
        // 3.48828125 GiB adjusted yields exactly the 2048-token floor.
        let budget = derive_budget_strict(Profile::Survival, &linux_snap(3.48828125)).unwrap();
        assert_eq!(budget.context_tokens, CONTEXT_FLOOR_TOKENS);
        assert!(budget.degraded);
    }

    #[test]
    fn test_strict_matches_lenient_when_viable() {
        let strict = derive_budget_strict(Profile::Comfort, &linux_snap(16.0)).unwrap();
        let lenient = derive_budget(Profile::Comfort, &linux_snap(16.0)).unwrap();
        assert_eq!(strict, lenient);
    }

    #[test]
    fn test_context_is_multiple_of_1024_and_capped() {
        for profile in Profile::ALL {
            for half_gib in 0..=192 {
                let snapshot = linux_snap(half_gib as f64 * 0.5);
                let budget = derive_budget(profile, &snapshot).unwrap();
                assert_eq!(budget.context_tokens % 1024, 0);
                assert!(budget.context_tokens >= CONTEXT_FLOOR_TOKENS);
                assert!(budget.context_tokens <= profile.context_ceiling_tokens());
            }
        }
    }

    #[test]
    fn test_kv_cache_consistent_with_context() {
        for profile in Profile::ALL {
            for available in [2.0, 6.0, 9.0, 16.0, 30.0, 64.0, 100.0] {
                let budget = derive_budget(profile, &linux_snap(available)).unwrap();
                let recomputed =
                    kv_cache_bytes_for(budget.context_tokens, budget.quantization);
                assert_eq!(budget.kv_cache_bytes, recomputed);
            }
        }
    }

    #[test]
    fn test_degraded_tracks_ceiling() {
        // Plenty of memory: ceiling met, not degraded.
        assert!(!derive_budget(Profile::Comfort, &linux_snap(16.0)).unwrap().degraded);
        // In range for Comfort but short of feeding the full window.
        let tight = derive_budget(Profile::Comfort, &linux_snap(9.0)).unwrap();
        assert!(tight.degraded);
        assert!(tight.context_tokens < Profile::Comfort.context_ceiling_tokens());
    }

    #[test]
    fn test_huge_host_saturates_at_ceiling() {
        let snapshot = MemorySnapshot::from_gib(2048.0, 1024.0, 0.0, Platform::Linux);
        let budget = derive_budget(Profile::Beast, &snapshot).unwrap();
        assert_eq!(budget.context_tokens, 131_072);
        assert!(!budget.degraded);
    }

    #[test]
    fn test_invalid_snapshot_propagates() {
        let bad = MemorySnapshot::from_gib(8.0, 16.0, 0.0, Platform::Linux);
        assert!(matches!(
            derive_budget(Profile::Comfort, &bad),
            Err(EngineError::InvalidSnapshot { .. })
        ));
    }

    #[test]
    fn test_summary() {
        let budget = derive_budget(Profile::Comfort, &linux_snap(16.0)).unwrap();
        let s = budget.summary();
        assert!(s.contains("Comfort"));
        assert!(s.contains("32768 tokens"));
        assert!(s.contains("Q4_K_M"));
        assert!(!s.contains("degraded"));

        let floored = derive_budget(Profile::Survival, &linux_snap(1.0)).unwrap();
        assert!(floored.summary().contains("[degraded]"));
    }

    #[test]
    fn test_serialize() {
        let budget = derive_budget(Profile::Power, &linux_snap(32.0)).unwrap();
        let value = serde_json::to_value(&budget).unwrap();
        assert_eq!(value["profile"], "power");
        assert_eq!(value["quantization"], "8bit");
        assert_eq!(value["batch_size"], 8);
    }
}
