use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use triad_core::sieve::{prime_counts, totients};
use triad_core::{batch_prefix, CompensatedSum, PrefixStream, SieveTables};

fn bench_totients(c: &mut Criterion) {
    let mut group = c.benchmark_group("totients");
    for n in [10_000usize, 100_000, 1_000_000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| totients(n));
        });
    }
    group.finish();
}

fn bench_prime_counts(c: &mut Criterion) {
    let mut group = c.benchmark_group("prime_counts");
    for n in [10_000usize, 100_000, 1_000_000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| prime_counts(n));
        });
    }
    group.finish();
}

fn bench_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("prefix_stream");
    group.sample_size(10);
    for n in [100_000u64, 1_000_000] {
        let tables = SieveTables::build(n as i64).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &tables, |b, t| {
            b.iter(|| PrefixStream::over(t).last());
        });
    }
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_prefix");
    group.sample_size(10);
    for n in [100_000u64, 1_000_000] {
        let tables = SieveTables::build(n as i64).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n), &tables, |b, t| {
            b.iter(|| batch_prefix(t, n));
        });
    }
    group.finish();
}

fn bench_compensated_vs_naive(c: &mut Criterion) {
    let terms: Vec<f64> = (1..=1_000_000u64).map(|i| 1.0 / (i as f64 * i as f64)).collect();
    let mut group = c.benchmark_group("summation");
    group.bench_function("compensated", |b| {
        b.iter(|| terms.iter().copied().collect::<CompensatedSum>().value());
    });
    group.bench_function("naive", |b| {
        b.iter(|| terms.iter().sum::<f64>());
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_totients,
    bench_prime_counts,
    bench_stream,
    bench_batch,
    bench_compensated_vs_naive
);
criterion_main!(benches);
