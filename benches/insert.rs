use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use streaming_quantiles::{QuantileTarget, Summary};

fn shuffled(n: u64) -> Vec<u64> {
    let mut values: Vec<u64> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(1972);
    values.shuffle(&mut rng);
    values
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for size in [1_000u64, 10_000, 65_536] {
        let values = shuffled(size);
        group.throughput(Throughput::Elements(size));

        group.bench_with_input(BenchmarkId::new("uniform", size), &values, |b, values| {
            b.iter(|| {
                let mut summary = Summary::uniform(1_000, 0.001).unwrap();
                for &v in values {
                    summary.insert(v);
                }
                summary.len()
            })
        });

        group.bench_with_input(BenchmarkId::new("targeted", size), &values, |b, values| {
            let targets = vec![
                QuantileTarget::new(0.50, 0.050).unwrap(),
                QuantileTarget::new(0.99, 0.001).unwrap(),
            ];
            b.iter(|| {
                let mut summary = Summary::targeted(100, targets.clone()).unwrap();
                for &v in values {
                    summary.insert(v);
                }
                summary.len()
            })
        });
    }
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut summary = Summary::uniform(1_000, 0.001).unwrap();
    for v in shuffled(65_536) {
        summary.insert(v);
    }
    summary.compress();

    c.bench_function("query/uniform_65536", |b| {
        b.iter(|| summary.query(0.99).unwrap())
    });
}

criterion_group!(benches, bench_insert, bench_query);
criterion_main!(benches);
