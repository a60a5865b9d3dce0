//! Rebuild cost benchmarks.
//!
//! Compares a single-item edit near the end of a large list (incremental
//! repack of the tail) against a width change (full repack).
//!
//! Run with: cargo bench --bench rebuild_benchmark

#![allow(missing_docs)] // criterion macros generate undocumented items

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use flowcache::flow::{FlowCache, ItemSize};

/// Build a cache with `num_items` measured items and its lines packed.
fn generate_cache(num_items: usize) -> FlowCache {
    let mut cache = FlowCache::new(0, 1_000);
    cache.add(
        0,
        (0..num_items).map(|i| ItemSize::new(40 + (i % 7) as u32 * 15, 20 + (i % 5) as u32)),
    );
    cache.line_counts();
    cache
}

/// Edit near the tail: only the last few lines are repacked.
fn benchmark_tail_edit(c: &mut Criterion) {
    let mut group = c.benchmark_group("tail_edit");

    for num_items in [1_000, 10_000, 100_000] {
        let mut cache = generate_cache(num_items);
        let target = num_items - 3;
        let mut toggle = false;

        group.bench_function(BenchmarkId::new("set_item", num_items), |b| {
            b.iter(|| {
                toggle = !toggle;
                let width = if toggle { 55 } else { 70 };
                cache.set_item(black_box(target), ItemSize::new(width, 20));
                black_box(cache.line_count())
            });
        });
    }

    group.finish();
}

/// Width change: every line is repacked.
fn benchmark_full_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_rebuild");

    for num_items in [1_000, 10_000, 100_000] {
        let mut cache = generate_cache(num_items);
        let mut toggle = false;

        group.bench_function(BenchmarkId::new("set_content_area_width", num_items), |b| {
            b.iter(|| {
                toggle = !toggle;
                let width = if toggle { 900 } else { 1_000 };
                cache.set_content_area_width(black_box(width));
                black_box(cache.line_count())
            });
        });
    }

    group.finish();
}

/// Vertical lookups through the height index on a 100k item cache.
fn benchmark_line_at_offset(c: &mut Criterion) {
    let mut cache = generate_cache(100_000);
    let total = cache.content_height();

    c.bench_function("line_at_offset_100k", |b| {
        b.iter(|| {
            for offset in [0, total / 4, total / 2, total * 3 / 4, total.saturating_sub(1)] {
                black_box(cache.line_at_offset(black_box(offset)));
            }
        });
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(std::time::Duration::from_secs(5));
    targets = benchmark_tail_edit, benchmark_full_rebuild, benchmark_line_at_offset
}
criterion_main!(benches);
