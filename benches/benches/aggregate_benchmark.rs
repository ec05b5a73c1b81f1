//! Aggregation throughput for the three bar policies.
//!
//! Run with: `cargo bench --package tickbars-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use tickbars_aggregate::aggregate;
use tickbars_bench::{synthetic_ticks, ticks_csv};
use tickbars_format::TickReader;
use tickbars_types::BarSpec;

const SIZES: [usize; 3] = [10_000, 100_000, 1_000_000];

fn specs() -> Vec<BarSpec> {
    ["tick:100", "time:1min", "time:100ms", "volume:1000"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect()
}

fn aggregate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for size in SIZES {
        let ticks = synthetic_ticks(size);
        group.throughput(Throughput::Elements(size as u64));

        for spec in specs() {
            group.bench_with_input(BenchmarkId::new(spec.to_string(), size), &ticks, |b, ticks| {
                b.iter(|| aggregate(black_box(ticks), &spec));
            });
        }
    }

    group.finish();
}

fn read_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("read");
    let size = 100_000;
    let csv = ticks_csv(&synthetic_ticks(size));
    group.throughput(Throughput::Bytes(csv.len() as u64));

    group.bench_function("csv", |b| {
        b.iter(|| TickReader::new().read(black_box(csv.as_bytes())).unwrap());
    });

    group.finish();
}

criterion_group!(benches, aggregate_benchmark, read_benchmark);
criterion_main!(benches);
