// Copyright (c) 2025 Headroom Contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! RAM-adaptive profile selection and resource budgeting for local LLM
//! workloads.
//!
//! Given a [`MemorySnapshot`](memory_monitor::MemorySnapshot) of the host,
//! this crate picks one of four operating profiles and derives a complete
//! [`ResourceBudget`] from it: context-window size, quantization level,
//! batch and concurrency limits, cache allocations, and a compaction
//! policy. Selection is deliberately threshold-based with no learned
//! behaviour — an operator should be able to predict the outcome from the
//! table below.
//!
//! | Profile  | Min adjusted RAM | Context ceiling | Weights | Batch | Concurrency |
//! |----------|------------------|-----------------|---------|-------|-------------|
//! | Survival | 0 GiB            | 16384 tokens    | 4-bit   | 1     | 1           |
//! | Comfort  | 8 GiB            | 32768 tokens    | 4-bit   | 4     | 2           |
//! | Power    | 24 GiB           | 65536 tokens    | 8-bit   | 8     | 4           |
//! | Beast    | 48 GiB           | 131072 tokens   | 8-bit   | 16    | 8           |
//!
//! "Adjusted" RAM is available memory after platform corrections: Apple
//! Silicon loses a 2 GiB unified-memory reserve off the top, and swap
//! utilisation above 10% applies a 0.8 pressure penalty.
//!
//! # Pipeline
//!
//! ```text
//! MemorySnapshot ──▶ select_profile ──▶ Profile ──▶ derive_budget ──▶ ResourceBudget
//!                          │                              │
//!                          └───────── ProfileEngine ──────┘
//!                                 (transition tracking)
//! ```
//!
//! The pure functions carry the semantics; [`ProfileEngine`] adds the one
//! piece of state a monitoring loop needs — the last emitted profile — so
//! consumers hear about profile changes exactly once.
//!
//! # Example
//! ```
//! use memory_monitor::{MemorySnapshot, Platform};
//! use profile_engine::{derive_budget, select_profile, Profile};
//!
//! let snapshot = MemorySnapshot::from_gib(32.0, 16.0, 2.0, Platform::Linux);
//! let profile = select_profile(&snapshot)?;
//! assert_eq!(profile, Profile::Comfort);
//!
//! let budget = derive_budget(profile, &snapshot)?;
//! assert_eq!(budget.context_tokens, 32768);
//! assert!(!budget.degraded);
//! # Ok::<(), profile_engine::EngineError>(())
//! ```

pub mod budget;
pub mod config;
pub mod engine;
pub mod error;
pub mod profile;
pub mod selection;

pub use budget::{
    derive_budget, derive_budget_strict, kv_cache_bytes_for, ResourceBudget, CONTEXT_FLOOR_TOKENS,
};
pub use config::EngineConfig;
pub use engine::{ProfileEngine, ProfileTransition};
pub use error::EngineError;
pub use profile::{
    parse_override, CompactionPolicy, EmbeddingTier, ModelLoading, Profile, Quantization,
};
pub use selection::{
    adjusted_available_gib, select_profile, APPLE_SILICON_RESERVE_GIB, SWAP_PRESSURE_PENALTY,
    SWAP_PRESSURE_THRESHOLD_PERCENT,
};
