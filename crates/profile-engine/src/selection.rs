// Copyright (c) 2025 Headroom Contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Profile selection from a memory snapshot.
//!
//! Selection is a pure function: validate the snapshot, adjust the
//! available figure for the platform and swap pressure, then pick the
//! highest profile whose floor the adjusted value clears. The corrections
//! are ordered: the Apple Silicon reserve comes off the top first, then
//! the swap penalty multiplies what remains.

use crate::{EngineError, Profile};
use memory_monitor::MemorySnapshot;

/// Unified-memory reserve subtracted on Apple Silicon, GiB.
pub const APPLE_SILICON_RESERVE_GIB: f64 = 2.0;
/// Swap utilisation above this percentage triggers the pressure penalty.
pub const SWAP_PRESSURE_THRESHOLD_PERCENT: f64 = 10.0;
/// Multiplier applied to available memory under swap pressure.
pub const SWAP_PRESSURE_PENALTY: f64 = 0.8;

const GIB: f64 = (1u64 << 30) as f64;

/// Checks a snapshot against the engine's input contract.
pub(crate) fn validate_snapshot(snapshot: &MemorySnapshot) -> Result<(), EngineError> {
    if snapshot.total_bytes == 0 {
        return Err(EngineError::InvalidSnapshot {
            detail: "total memory is zero".to_string(),
        });
    }
    if snapshot.available_bytes > snapshot.total_bytes {
        return Err(EngineError::InvalidSnapshot {
            detail: format!(
                "available ({} bytes) exceeds total ({} bytes)",
                snapshot.available_bytes, snapshot.total_bytes,
            ),
        });
    }
    if !(0.0..=100.0).contains(&snapshot.swap_used_percent) {
        return Err(EngineError::InvalidSnapshot {
            detail: format!(
                "swap utilisation {}% outside the 0–100 range",
                snapshot.swap_used_percent,
            ),
        });
    }
    Ok(())
}

/// Available memory in GiB after platform corrections.
///
/// 1. Convert `available_bytes` to GiB.
/// 2. Apple Silicon: subtract the 2 GiB unified-memory reserve.
/// 3. Swap above 10%: multiply by 0.8.
/// 4. Clamp at zero.
///
/// Fails only on snapshot contract violations.
pub fn adjusted_available_gib(snapshot: &MemorySnapshot) -> Result<f64, EngineError> {
    validate_snapshot(snapshot)?;

    let mut adjusted = snapshot.available_bytes as f64 / GIB;

    if snapshot.platform.is_apple_silicon() {
        adjusted -= APPLE_SILICON_RESERVE_GIB;
        tracing::debug!(
            "Apple Silicon unified-memory reserve applied: {:.2} GiB remain",
            adjusted,
        );
    }

    if snapshot.swap_used_percent > SWAP_PRESSURE_THRESHOLD_PERCENT {
        adjusted *= SWAP_PRESSURE_PENALTY;
        tracing::debug!(
            "swap pressure penalty applied at {:.0}% used: {:.2} GiB remain",
            snapshot.swap_used_percent,
            adjusted,
        );
    }

    Ok(adjusted.max(0.0))
}

/// Selects the operating profile for a snapshot.
///
/// Pure — no I/O, no state. Exhausted memory is not an error; it selects
/// [`Profile::Survival`]. The only failures are contract violations
/// ([`EngineError::InvalidSnapshot`]).
pub fn select_profile(snapshot: &MemorySnapshot) -> Result<Profile, EngineError> {
    let adjusted = adjusted_available_gib(snapshot)?;
    let profile = Profile::for_adjusted_gib(adjusted);
    tracing::debug!(
        "selected {} at {:.2} GiB adjusted available",
        profile,
        adjusted,
    );
    Ok(profile)
}
