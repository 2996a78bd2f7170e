// Copyright (c) 2025 Headroom Contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Live memory sampling via sysinfo.
//!
//! [`MemorySampler`] reuses one [`sysinfo::System`] across samples so a
//! polling loop refreshes counters instead of re-enumerating the host each
//! tick. Every snapshot it produces satisfies the profile engine's input
//! contract: available never exceeds total and the swap percentage stays
//! within 0–100.

use crate::{MemorySnapshot, MonitorError, Platform};
use sysinfo::System;

/// Samples host memory state on demand.
pub struct MemorySampler {
    system: System,
    platform: Platform,
}

impl MemorySampler {
    /// Creates a sampler for the current host.
    pub fn new() -> Self {
        Self {
            system: System::new(),
            platform: Platform::detect(),
        }
    }

    /// Takes a fresh snapshot of RAM and swap state.
    pub fn sample(&mut self) -> Result<MemorySnapshot, MonitorError> {
        self.system.refresh_memory();

        let total_bytes = self.system.total_memory();
        if total_bytes == 0 {
            return Err(MonitorError::Sample {
                detail: "host reports zero total memory".to_string(),
            });
        }

        // Clamp: some kernels report transiently more available than total.
        let available_bytes = self.system.available_memory().min(total_bytes);

        let total_swap = self.system.total_swap();
        let swap_used_percent = if total_swap == 0 {
            0.0
        } else {
            (self.system.used_swap() as f64 / total_swap as f64) * 100.0
        };

        Ok(MemorySnapshot {
            total_bytes,
            available_bytes,
            swap_used_percent,
            platform: self.platform,
        })
    }

    /// Platform this sampler stamps on its snapshots.
    pub fn platform(&self) -> Platform {
        self.platform
    }
}

impl Default for MemorySampler {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot convenience: samples the current host once.
pub fn sample() -> Result<MemorySnapshot, MonitorError> {
    let mut sampler = MemorySampler::new();
    sampler.sample()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_real_host() {
        let snapshot = sample().unwrap();
        assert!(snapshot.total_bytes > 0);
        assert!(snapshot.available_bytes <= snapshot.total_bytes);
        assert!((0.0..=100.0).contains(&snapshot.swap_used_percent));
    }

    #[test]
    fn test_sampler_is_reusable() {
        let mut sampler = MemorySampler::new();
        let first = sampler.sample().unwrap();
        let second = sampler.sample().unwrap();
        // Totals are stable across samples on the same host.
        assert_eq!(first.total_bytes, second.total_bytes);
        assert_eq!(first.platform, second.platform);
    }

    #[test]
    fn test_platform_stamp() {
        let sampler = MemorySampler::new();
        assert_eq!(sampler.platform(), Platform::detect());
    }
}
