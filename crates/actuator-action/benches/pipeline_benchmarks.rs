//! Benchmarks for calculation batches.
//!
//! Measures `calculate_current_actions` over registries of increasing size,
//! with every action sharing one calculator so the start and finish hooks
//! stay constant while calculation and materialization scale.

use std::sync::Arc;
use std::time::Duration;

use actuator_action::{calculator_fn, ActionDescriptor, ActionEngine, TARGET_EDITOR_NODE};
use actuator_core::StateValue;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Engine with `count` editor actions, every other one hidden.
fn build_engine(count: usize) -> ActionEngine {
    let engine = ActionEngine::new();
    let shared = calculator_fn(|| Ok(Some(StateValue::new(String::from("node")))));

    for i in 0..count {
        let action = ActionDescriptor::new(format!("action-{}", i), TARGET_EDITOR_NODE, |_, _| {})
            .with_category(["Bench", if i % 3 == 0 { "Three" } else { "Other" }])
            .with_calculator(Arc::clone(&shared))
            .with_visibility(move |state| state.is_some() && i % 2 == 0);
        engine.add_action(action);
    }
    engine
}

fn bench_calculate_current_actions(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.measurement_time(Duration::from_secs(5));

    for count in [10usize, 100, 1000] {
        let engine = build_engine(count);
        group.bench_with_input(BenchmarkId::new("calculate_current_actions", count), &count, |b, _| {
            b.iter(|| black_box(engine.calculate_current_actions(black_box(TARGET_EDITOR_NODE))))
        });
    }

    group.finish();
}

/// Single-id lookups walk the registry linearly before running a batch of one.
fn bench_find_action_by_id(c: &mut Criterion) {
    let engine = build_engine(1000);
    let mut group = c.benchmark_group("lookup");

    group.bench_function("find_first", |b| {
        b.iter(|| black_box(engine.find_action_by_id(black_box("action-0"))))
    });
    group.bench_function("find_last", |b| {
        b.iter(|| black_box(engine.find_action_by_id(black_box("action-998"))))
    });

    group.finish();
}

criterion_group!(benches, bench_calculate_current_actions, bench_find_action_by_id);
criterion_main!(benches);
