// Copyright (c) 2025 Headroom Contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Engine error types.

/// Errors surfaced by selection, budget derivation, and configuration.
///
/// Low memory on its own is never an error: exhausted machines select
/// [`Survival`](crate::Profile::Survival) and degrade the budget. Errors
/// mark contract violations and, in strict mode, the hard floor.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A snapshot violated the input contract.
    #[error("invalid memory snapshot: {detail}")]
    InvalidSnapshot { detail: String },

    /// A profile override string named no known profile.
    #[error("unknown profile '{input}' (valid options: survival, comfort, power, beast)")]
    UnknownProfile { input: String },

    /// Strict mode only: memory cannot support even the floor context.
    #[error(
        "insufficient memory: {available_gib:.2} GiB adjusted available cannot support a \
         {floor}-token context (needs at least {required_gib:.2} GiB)"
    )]
    InsufficientMemory {
        available_gib: f64,
        required_gib: f64,
        floor: u32,
    },

    /// Configuration could not be read, parsed, or validated.
    #[error("configuration error: {detail}")]
    Config { detail: String },
}
