//! Interval index benchmarks

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use svfilter::regions::{Interval, IntervalIndex};

fn exome_like(count: u64) -> IntervalIndex {
    IntervalIndex::build((0..count).map(|i| {
        let start = i * 1_000;
        (
            "chr1",
            Interval::new(start, start + 150 + (i % 7) * 40, Some(Arc::from(format!("exon{i}")))),
        )
    }))
}

fn benchmark_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("interval_query");
    for count in [1_000u64, 100_000] {
        let index = exome_like(count);
        let span = count * 1_000;
        group.bench_with_input(BenchmarkId::new("point", count), &index, |b, index| {
            let mut pos = 0u64;
            b.iter(|| {
                pos = (pos + 7_919) % span;
                black_box(index.query("chr1", pos, pos));
            });
        });
        group.bench_with_input(BenchmarkId::new("span_50kb", count), &index, |b, index| {
            let mut pos = 0u64;
            b.iter(|| {
                pos = (pos + 7_919) % span;
                black_box(index.query("chr1", pos, pos + 50_000));
            });
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_queries);
criterion_main!(benches);
