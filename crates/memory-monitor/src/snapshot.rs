// Copyright (c) 2025 Headroom Contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Point-in-time memory snapshot: the input to profile selection.
//!
//! A [`MemorySnapshot`] is plain data. It makes no judgement about what the
//! numbers mean — thresholds, reserves, and penalties are the profile
//! engine's business. The helpers here only convert units and format.

use crate::Platform;

const GIB: f64 = (1u64 << 30) as f64;

/// A point-in-time reading of host memory state.
///
/// Produced by [`MemorySampler`](crate::MemorySampler) on real hosts and by
/// [`from_gib`](MemorySnapshot::from_gib) for fixtures and what-if planning.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MemorySnapshot {
    /// Total physical RAM in bytes.
    pub total_bytes: u64,
    /// Memory available to new workloads (free plus reclaimable) in bytes.
    pub available_bytes: u64,
    /// Swap utilisation as a percentage of configured swap, 0.0–100.0.
    pub swap_used_percent: f64,
    /// Host platform.
    pub platform: Platform,
}

impl MemorySnapshot {
    /// Builds a snapshot from GiB figures.
    pub fn from_gib(
        total_gib: f64,
        available_gib: f64,
        swap_used_percent: f64,
        platform: Platform,
    ) -> Self {
        Self {
            total_bytes: (total_gib * GIB) as u64,
            available_bytes: (available_gib * GIB) as u64,
            swap_used_percent,
            platform,
        }
    }

    /// Total physical RAM in GiB.
    pub fn total_gib(&self) -> f64 {
        self.total_bytes as f64 / GIB
    }

    /// Available memory in GiB, before any platform adjustment.
    pub fn available_gib(&self) -> f64 {
        self.available_bytes as f64 / GIB
    }

    /// Bytes currently in use.
    pub fn used_bytes(&self) -> u64 {
        self.total_bytes.saturating_sub(self.available_bytes)
    }

    /// Fraction of total memory in use, 0.0–1.0.
    pub fn utilisation(&self) -> f64 {
        if self.total_bytes == 0 {
            return 0.0;
        }
        self.used_bytes() as f64 / self.total_bytes as f64
    }

    /// One-line human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "{:.1} GiB available of {:.1} GiB ({:.0}% used), swap {:.0}%, {}",
            self.available_gib(),
            self.total_gib(),
            self.utilisation() * 100.0,
            self.swap_used_percent,
            self.platform,
        )
    }
}
