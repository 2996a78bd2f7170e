// Copyright (c) 2025 Headroom Contributors
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Benchmarks for the selection → budget → transition pipeline.
//!
//! The engine sits on the watch loop's hot path, so evaluation must stay
//! cheap enough to run every few seconds without registering.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use memory_monitor::{MemorySnapshot, Platform};
use profile_engine::{derive_budget, select_profile, Profile, ProfileEngine};

fn sample_snapshot() -> MemorySnapshot {
    MemorySnapshot::from_gib(64.0, 22.5, 4.0, Platform::Linux)
}

fn bench_select_profile(c: &mut Criterion) {
    let snapshot = sample_snapshot();
    c.bench_function("select_profile", |b| {
        b.iter(|| select_profile(black_box(&snapshot)))
    });
}

fn bench_derive_budget(c: &mut Criterion) {
    let snapshot = sample_snapshot();
    c.bench_function("derive_budget", |b| {
        b.iter(|| derive_budget(black_box(Profile::Comfort), black_box(&snapshot)))
    });
}

fn bench_engine_evaluate(c: &mut Criterion) {
    let engine = ProfileEngine::new();
    let snapshot = sample_snapshot();
    c.bench_function("engine_evaluate", |b| {
        b.iter(|| engine.evaluate(black_box(&snapshot)))
    });
}

criterion_group!(
    benches,
    bench_select_profile,
    bench_derive_budget,
    bench_engine_evaluate
);
criterion_main!(benches);
