// Copyright (c) 2025 Headroom Contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Stateful profile engine: evaluation and transition tracking.
//!
//! [`ProfileEngine`] wraps the pure selection and budgeting functions with
//! the one piece of state a monitoring loop needs — the last emitted
//! profile — so consumers hear about profile changes exactly once. The
//! override and strict-floor settings are plain fields; the last profile
//! sits behind a `Mutex` so `evaluate` works through a shared reference.

use crate::budget::{derive_budget, derive_budget_strict, ResourceBudget};
use crate::config::EngineConfig;
use crate::selection::select_profile;
use crate::{EngineError, Profile};
use memory_monitor::MemorySnapshot;
use std::sync::{Mutex, MutexGuard};

/// Outcome of one [`ProfileEngine::evaluate`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProfileTransition {
    /// First evaluation of this engine instance.
    Initial {
        profile: Profile,
        budget: ResourceBudget,
    },
    /// Profile matches the previous evaluation.
    Unchanged {
        profile: Profile,
        budget: ResourceBudget,
    },
    /// Profile differs from the previous evaluation.
    Changed {
        from: Profile,
        to: Profile,
        budget: ResourceBudget,
    },
}

impl ProfileTransition {
    /// The profile in effect after this evaluation.
    pub fn profile(&self) -> Profile {
        match self {
            ProfileTransition::Initial { profile, .. }
            | ProfileTransition::Unchanged { profile, .. } => *profile,
            ProfileTransition::Changed { to, .. } => *to,
        }
    }

    /// The budget derived by this evaluation.
    pub fn budget(&self) -> &ResourceBudget {
        match self {
            ProfileTransition::Initial { budget, .. }
            | ProfileTransition::Unchanged { budget, .. }
            | ProfileTransition::Changed { budget, .. } => budget,
        }
    }

    /// True when the profile differs from the previous evaluation.
    pub fn changed(&self) -> bool {
        matches!(self, ProfileTransition::Changed { .. })
    }

    /// Human-readable one-liner for logs and the watch loop.
    pub fn describe(&self) -> String {
        match self {
            ProfileTransition::Initial { profile, .. } => format!("entered {profile}"),
            ProfileTransition::Unchanged { profile, .. } => format!("holding {profile}"),
            ProfileTransition::Changed { from, to, .. } => format!("{from} → {to}"),
        }
    }
}

/// Stateful wrapper around profile selection and budget derivation.
///
/// Construct one engine per monitored workload and feed it snapshots; it
/// reports transitions by comparing against the last emitted profile. Two
/// engines never share state.
///
/// # Example
/// ```
/// use memory_monitor::{MemorySnapshot, Platform};
/// use profile_engine::ProfileEngine;
///
/// let engine = ProfileEngine::new();
/// let snapshot = MemorySnapshot::from_gib(32.0, 16.0, 2.0, Platform::Linux);
///
/// let first = engine.evaluate(&snapshot)?;
/// let second = engine.evaluate(&snapshot)?;
/// assert_eq!(first.profile(), second.profile());
/// assert!(!second.changed());
/// # Ok::<(), profile_engine::EngineError>(())
/// ```
pub struct ProfileEngine {
    override_profile: Option<Profile>,
    strict_floor: bool,
    last_profile: Mutex<Option<Profile>>,
}

impl ProfileEngine {
    /// Creates an engine with automatic selection and lenient flooring.
    pub fn new() -> Self {
        Self {
            override_profile: None,
            strict_floor: false,
            last_profile: Mutex::new(None),
        }
    }

    /// Builds an engine from a validated configuration.
    pub fn from_config(config: &EngineConfig) -> Result<Self, EngineError> {
        Ok(Self {
            override_profile: config.resolve_override()?,
            strict_floor: config.strict_context_floor,
            last_profile: Mutex::new(None),
        })
    }

    /// Pins a profile, bypassing automatic selection; `None` restores
    /// automatic selection.
    pub fn set_override(&mut self, profile: Option<Profile>) {
        self.override_profile = profile;
    }

    /// Enables or disables the strict context floor.
    pub fn set_strict_floor(&mut self, strict: bool) {
        self.strict_floor = strict;
    }

    /// The pinned profile, if any.
    pub fn override_profile(&self) -> Option<Profile> {
        self.override_profile
    }

    /// Whether the strict context floor is enabled.
    pub fn strict_floor(&self) -> bool {
        self.strict_floor
    }

    /// The profile emitted by the most recent evaluation.
    pub fn last_profile(&self) -> Option<Profile> {
        *lock_recover(&self.last_profile)
    }

    /// Evaluates one snapshot: selects a profile (or applies the
    /// override), derives the budget against actual memory, and reports
    /// how the result relates to the previous evaluation.
    ///
    /// An override is honoured verbatim — never downgraded — but the
    /// budget still comes from the real snapshot, so `degraded` tells the
    /// truth about what the machine can feed. Concurrent calls are
    /// serialised on the last-profile lock.
    pub fn evaluate(&self, snapshot: &MemorySnapshot) -> Result<ProfileTransition, EngineError> {
        let profile = match self.override_profile {
            Some(pinned) => pinned,
            None => select_profile(snapshot)?,
        };
        let budget = if self.strict_floor {
            derive_budget_strict(profile, snapshot)?
        } else {
            derive_budget(profile, snapshot)?
        };

        let mut last = lock_recover(&self.last_profile);
        let transition = match *last {
            None => ProfileTransition::Initial { profile, budget },
            Some(previous) if previous == profile => {
                ProfileTransition::Unchanged { profile, budget }
            }
            Some(previous) => {
                tracing::info!("profile change: {} → {}", previous, profile);
                ProfileTransition::Changed {
                    from: previous,
                    to: profile,
                    budget,
                }
            }
        };
        *last = Some(profile);
        Ok(transition)
    }
}

impl Default for ProfileEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProfileEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileEngine")
            .field("override_profile", &self.override_profile)
            .field("strict_floor", &self.strict_floor)
            .field("last_profile", &self.last_profile())
            .finish()
    }
}

/// Locks, recovering the data if a previous holder panicked.
fn lock_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
