// Copyright (c) 2025 Headroom Contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # headroom
//!
//! Command-line interface for the headroom profile engine.
//!
//! ## Usage
//! ```bash
//! # One-shot report: sample the host, pick a profile, print the budget
//! headroom status
//!
//! # Keep watching and report profile changes as memory pressure shifts
//! headroom watch --interval 10
//!
//! # What-if planning across hypothetical memory sizes
//! headroom sweep --available 4G,8G,16G,32G,64G --platform macos-apple-silicon
//! ```

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "headroom",
    about = "RAM-aware profile selection and resource budgeting for local LLM workloads",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample the host once and print the selected profile and budget.
    Status {
        /// Pin a profile instead of selecting from memory: survival,
        /// comfort, power, beast, or auto.
        #[arg(short, long)]
        profile: Option<String>,

        /// Fail instead of degrading when even a 2048-token context
        /// will not fit.
        #[arg(long)]
        strict: bool,
    },

    /// Re-evaluate periodically and report profile changes.
    Watch {
        /// Seconds between samples (overrides the config file).
        #[arg(short, long)]
        interval: Option<u64>,

        /// Pin a profile instead of selecting from memory.
        #[arg(short, long)]
        profile: Option<String>,

        /// Fail instead of degrading below the context floor.
        #[arg(long)]
        strict: bool,
    },

    /// Print profiles and budgets for hypothetical memory sizes.
    Sweep {
        /// Comma-separated available-memory sizes (e.g., "4G,8G,16G,64G").
        #[arg(short, long)]
        available: String,

        /// Platform to simulate: linux, macos-apple-silicon, macos-intel,
        /// windows.
        #[arg(long, default_value = "linux")]
        platform: String,

        /// Swap utilisation to simulate, percent.
        #[arg(long, default_value_t = 0.0)]
        swap: f64,

        /// Total physical memory to simulate (defaults to each available
        /// size, i.e. a freshly booted host).
        #[arg(long)]
        total: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging based on verbosity.
    commands::init_tracing(cli.verbose);

    let config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Status { profile, strict } => {
            commands::status::execute(config, profile, strict).await
        }
        Commands::Watch {
            interval,
            profile,
            strict,
        } => commands::watch::execute(config, interval, profile, strict).await,
        Commands::Sweep {
            available,
            platform,
            swap,
            total,
        } => commands::sweep::execute(available, platform, swap, total).await,
    }
}
