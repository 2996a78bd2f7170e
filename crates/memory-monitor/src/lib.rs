// Copyright (c) 2025 Headroom Contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Host memory introspection for RAM-adaptive profile selection.
//!
//! This crate answers one question: *how much memory headroom does this
//! machine have right now?* It produces [`MemorySnapshot`]s — total and
//! available physical RAM, swap utilisation, and the host platform — which
//! the profile engine maps to an operating profile and a resource budget.
//!
//! - [`Platform`]: the four supported host targets, with detection.
//! - [`MemorySnapshot`]: a point-in-time reading; plain data.
//! - [`MemorySampler`]: repeated sampling over a reused sysinfo handle.
//! - [`MemorySize`]: human-readable byte quantities (`"512M"`, `"2G"`).
//!
//! # Design
//!
//! Snapshots carry no behaviour beyond unit helpers. The sampler keeps
//! readings internally consistent (available never exceeds total, swap
//! percentage stays within 0–100); policy-level validation belongs to the
//! consumer. Fixtures for tests and what-if planning are built with
//! [`MemorySnapshot::from_gib`] — no live host required.
//!
//! # Example
//! ```no_run
//! let snapshot = memory_monitor::sample()?;
//! println!("{}", snapshot.summary());
//! # Ok::<(), memory_monitor::MonitorError>(())
//! ```

pub mod error;
pub mod platform;
pub mod sampler;
pub mod size;
pub mod snapshot;

pub use error::MonitorError;
pub use platform::Platform;
pub use sampler::{sample, MemorySampler};
pub use size::MemorySize;
pub use snapshot::MemorySnapshot;
