//! Criterion comparison of the six loop orders, per storage layout.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use matmul_loops::threaded::build_pool;
use matmul_loops::{Layout, LoopOrder, Matrix, multiply_into, multiply_into_parallel};
use std::hint::black_box;

const SIZES: [usize; 2] = [64, 256];

fn bench_loop_orders(c: &mut Criterion) {
    for layout in [Layout::ColMajor, Layout::RowMajor] {
        let mut group = c.benchmark_group(format!("loop_order/{layout}"));
        group.sample_size(10);

        for size in SIZES {
            let a = Matrix::random(size, size, layout, 1);
            let b = Matrix::random(size, size, layout, 2);
            let mut out = Matrix::zeros(size, size, layout);
            group.throughput(Throughput::Elements((size * size * size) as u64));

            for order in LoopOrder::ALL {
                group.bench_with_input(BenchmarkId::new(order.as_str(), size), &size, |bench, _| {
                    bench.iter(|| {
                        out.fill_zero();
                        multiply_into(order, black_box(&a), black_box(&b), &mut out).unwrap();
                    })
                });
            }
        }
        group.finish();
    }
}

fn bench_parallel(c: &mut Criterion) {
    let size = 256;
    let layout = Layout::ColMajor;
    let order = LoopOrder::preferred(layout);
    let a = Matrix::random(size, size, layout, 1);
    let b = Matrix::random(size, size, layout, 2);
    let mut out = Matrix::zeros(size, size, layout);

    let mut group = c.benchmark_group("parallel");
    group.sample_size(10);

    for threads in [1, 2, 4] {
        let pool = build_pool(threads).unwrap();
        group.bench_with_input(BenchmarkId::new(order.as_str(), threads), &threads, |bench, _| {
            bench.iter(|| {
                out.fill_zero();
                multiply_into_parallel(order, black_box(&a), black_box(&b), &mut out, &pool).unwrap();
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_loop_orders, bench_parallel);
criterion_main!(benches);
