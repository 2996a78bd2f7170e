// Copyright (c) 2025 Headroom Contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Operating profiles and their static attribute tables.
//!
//! A [`Profile`] is an identity, not a bag of settings: the four variants
//! are ordered tiers, and every tuned attribute hangs off them as a method
//! backed by a fixed table. Values that depend on the live snapshot
//! (context window, kv cache) are derived in [`crate::budget`]; everything
//! in this module is constant per profile.

use crate::EngineError;
use std::fmt;
use std::str::FromStr;

const MIB: u64 = 1024 * 1024;

// ── Profile ─────────────────────────────────────────────────────────────

/// Operating profile tiers, ordered from most to least constrained.
///
/// Ordering follows declaration order (`Survival < Comfort < Power <
/// Beast`), so comparisons express capability: `profile >= Profile::Power`
/// asks "is this at least workstation-class?".
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Below 8 GiB adjusted: minimal footprint, aggressive reclamation.
    Survival,
    /// 8–24 GiB adjusted: balanced settings for typical laptops.
    Comfort,
    /// 24–48 GiB adjusted: workstation-class settings.
    Power,
    /// 48 GiB adjusted and above: no compromises.
    Beast,
}

impl Profile {
    /// All profiles, lowest tier first.
    pub const ALL: [Profile; 4] = [
        Profile::Survival,
        Profile::Comfort,
        Profile::Power,
        Profile::Beast,
    ];

    /// Inclusive lower bound on adjusted available GiB for this tier.
    pub fn floor_gib(&self) -> f64 {
        match self {
            Profile::Survival => 0.0,
            Profile::Comfort => 8.0,
            Profile::Power => 24.0,
            Profile::Beast => 48.0,
        }
    }

    /// Hard ceiling on the context window, in tokens.
    pub fn context_ceiling_tokens(&self) -> u32 {
        match self {
            Profile::Survival => 16_384,
            Profile::Comfort => 32_768,
            Profile::Power => 65_536,
            Profile::Beast => 131_072,
        }
    }

    /// Quantization level models run at under this profile.
    pub fn quantization(&self) -> Quantization {
        match self {
            Profile::Survival | Profile::Comfort => Quantization::FourBit,
            Profile::Power | Profile::Beast => Quantization::EightBit,
        }
    }

    /// Inference batch size.
    pub fn batch_size(&self) -> u32 {
        match self {
            Profile::Survival => 1,
            Profile::Comfort => 4,
            Profile::Power => 8,
            Profile::Beast => 16,
        }
    }

    /// Maximum concurrent operations.
    pub fn concurrent_ops(&self) -> u32 {
        match self {
            Profile::Survival => 1,
            Profile::Comfort => 2,
            Profile::Power => 4,
            Profile::Beast => 8,
        }
    }

    /// Bytes reserved for the retrieval cache.
    pub fn rag_cache_bytes(&self) -> u64 {
        match self {
            Profile::Survival => 200 * MIB,
            Profile::Comfort => 500 * MIB,
            Profile::Power => 2048 * MIB,
            Profile::Beast => 8192 * MIB,
        }
    }

    /// Conversation compaction policy.
    pub fn compaction(&self) -> CompactionPolicy {
        match self {
            Profile::Survival => CompactionPolicy::Aggressive,
            Profile::Comfort => CompactionPolicy::Smart,
            Profile::Power => CompactionPolicy::Relaxed,
            Profile::Beast => CompactionPolicy::Minimal,
        }
    }

    /// Embedding model class used for retrieval.
    pub fn embedding_tier(&self) -> EmbeddingTier {
        match self {
            Profile::Survival => EmbeddingTier::Small,
            Profile::Comfort => EmbeddingTier::Base,
            Profile::Power | Profile::Beast => EmbeddingTier::Large,
        }
    }

    /// Weight-loading strategy hint for the model backend.
    pub fn model_loading(&self) -> ModelLoading {
        match self {
            Profile::Survival => ModelLoading::Lazy,
            Profile::Comfort => ModelLoading::Hybrid,
            Profile::Power => ModelLoading::Eager,
            Profile::Beast => ModelLoading::Full,
        }
    }

    /// Rough generation throughput expected under this profile, tokens/s.
    pub fn expected_tokens_per_sec(&self) -> u32 {
        match self {
            Profile::Survival => 3,
            Profile::Comfort => 5,
            Profile::Power => 8,
            Profile::Beast => 12,
        }
    }

    /// Canonical lowercase name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Survival => "survival",
            Profile::Comfort => "comfort",
            Profile::Power => "power",
            Profile::Beast => "beast",
        }
    }

    /// Highest profile whose floor is at or below `adjusted_gib`.
    ///
    /// Bounds are inclusive: exactly 8.0 GiB selects `Comfort`.
    pub fn for_adjusted_gib(adjusted_gib: f64) -> Profile {
        Profile::ALL
            .iter()
            .rev()
            .copied()
            .find(|profile| adjusted_gib >= profile.floor_gib())
            .unwrap_or(Profile::Survival)
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Profile::Survival => "Survival",
            Profile::Comfort => "Comfort",
            Profile::Power => "Power",
            Profile::Beast => "Beast",
        };
        f.write_str(name)
    }
}

impl FromStr for Profile {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "survival" => Ok(Profile::Survival),
            "comfort" => Ok(Profile::Comfort),
            "power" => Ok(Profile::Power),
            "beast" => Ok(Profile::Beast),
            _ => Err(EngineError::UnknownProfile {
                input: s.to_string(),
            }),
        }
    }
}

/// Parses a profile override string from configuration or CLI flags.
///
/// `"auto"` (any case) means no override — automatic selection. A profile
/// name pins that profile. Anything else is an
/// [`EngineError::UnknownProfile`].
pub fn parse_override(input: &str) -> Result<Option<Profile>, EngineError> {
    if input.trim().eq_ignore_ascii_case("auto") {
        return Ok(None);
    }
    input.parse().map(Some)
}

// ── Quantization ────────────────────────────────────────────────────────

/// Model weight quantization levels.
///
/// The overhead figures feed the dynamic context formula in
/// [`crate::budget`]: `model_overhead_gib` approximates resident weights
/// for a mid-size model at this level, `mb_per_1k_tokens` the kv-cache
/// growth per 1024 tokens of context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Quantization {
    /// 4-bit weights (Q4_K_M class).
    #[serde(rename = "4bit")]
    FourBit,
    /// 8-bit weights (Q8_0 class).
    #[serde(rename = "8bit")]
    EightBit,
}

impl Quantization {
    /// Bits per weight.
    pub fn bits(&self) -> u32 {
        match self {
            Quantization::FourBit => 4,
            Quantization::EightBit => 8,
        }
    }

    /// Resident model weight overhead, GiB.
    pub fn model_overhead_gib(&self) -> f64 {
        match self {
            Quantization::FourBit => 1.5,
            Quantization::EightBit => 2.5,
        }
    }

    /// kv-cache growth per 1024 tokens of context, MiB.
    pub fn mb_per_1k_tokens(&self) -> u32 {
        match self {
            Quantization::FourBit => 250,
            Quantization::EightBit => 400,
        }
    }

    /// GGUF file naming convention for this level.
    pub fn gguf_name(&self) -> &'static str {
        match self {
            Quantization::FourBit => "Q4_K_M",
            Quantization::EightBit => "Q8_0",
        }
    }
}

impl fmt::Display for Quantization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantization::FourBit => f.write_str("4-bit"),
            Quantization::EightBit => f.write_str("8-bit"),
        }
    }
}

// ── Compaction policy ───────────────────────────────────────────────────

/// How eagerly conversation history is compacted as the context fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompactionPolicy {
    /// Compact early and deeply; smallest resident history.
    Aggressive,
    /// Summarise older turns, keep recent ones verbatim.
    Smart,
    /// Compact only under pressure.
    Relaxed,
    /// Compact only when the window is nearly full.
    Minimal,
}

impl CompactionPolicy {
    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompactionPolicy::Aggressive => "aggressive",
            CompactionPolicy::Smart => "smart",
            CompactionPolicy::Relaxed => "relaxed",
            CompactionPolicy::Minimal => "minimal",
        }
    }
}

impl fmt::Display for CompactionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Supplementary per-profile hints ─────────────────────────────────────

/// Embedding model class paired with a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingTier {
    Small,
    Base,
    Large,
}

impl fmt::Display for EmbeddingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EmbeddingTier::Small => "small",
            EmbeddingTier::Base => "base",
            EmbeddingTier::Large => "large",
        };
        f.write_str(name)
    }
}

/// Weight-loading strategy hint paired with a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelLoading {
    /// Map weights on first use.
    Lazy,
    /// Preload hot layers, map the rest.
    Hybrid,
    /// Load everything at startup.
    Eager,
    /// Load and pin everything, including optional adapters.
    Full,
}

impl fmt::Display for ModelLoading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelLoading::Lazy => "lazy",
            ModelLoading::Hybrid => "hybrid",
            ModelLoading::Eager => "eager",
            ModelLoading::Full => "full",
        };
        f.write_str(name)
    }
}
