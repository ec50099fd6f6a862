/*!
 * Lock Strategy Benchmarks
 *
 * Compare the exclusive and reader-writer lists under write-heavy and read-heavy load
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use locklist::workload::{enumerate_workload, push_workload};
use locklist::{ConcurrentList, Strategy};
use std::time::Duration;

const THREADS: [usize; 3] = [1, 4, 8];

fn bench_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("push");

    for strategy in Strategy::ALL {
        for threads in THREADS {
            group.bench_with_input(
                BenchmarkId::new(strategy.to_string(), threads),
                &threads,
                |b, &threads| {
                    b.iter(|| {
                        let list = strategy.build();
                        push_workload(&list, threads, 1_000);
                        black_box(list.len())
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_enumerate(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumerate");
    group.sample_size(20);

    for strategy in Strategy::ALL {
        let list = strategy.build_from((0..10).collect::<Vec<usize>>());

        for threads in THREADS {
            group.bench_with_input(
                BenchmarkId::new(strategy.to_string(), threads),
                &threads,
                |b, &threads| {
                    b.iter(|| enumerate_workload(&list, threads, Duration::from_micros(100)));
                },
            );
        }
    }

    group.finish();
}

fn bench_single_thread_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_thread");

    for strategy in Strategy::ALL {
        let list = strategy.build_from((0..1_000).collect::<Vec<usize>>());

        group.bench_function(BenchmarkId::new("get", strategy), |b| {
            b.iter(|| list.get(black_box(500)))
        });

        group.bench_function(BenchmarkId::new("contains", strategy), |b| {
            b.iter(|| list.contains(black_box(&999)))
        });

        group.bench_function(BenchmarkId::new("iter_sum", strategy), |b| {
            b.iter(|| list.iter().sum::<usize>())
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_push,
    bench_enumerate,
    bench_single_thread_ops
);
criterion_main!(benches);
