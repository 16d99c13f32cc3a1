use matmul_loops::alloc_counter::{AllocSnapshot, CountingAllocator};
use matmul_loops::{
    BenchConfig, BenchmarkRunner, Error, ExecutionMode, Layout, LoopOrder, benchmark, format_table,
};

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

#[test]
fn test_repeated_runs_have_ordered_statistics() {
    let config = BenchConfig::square(24).with_trials(5);

    for _ in 0..2 {
        let results = BenchmarkRunner::new(config.clone()).unwrap().run().unwrap();
        assert_eq!(results.len(), LoopOrder::ALL.len());

        for r in &results {
            let s = r.summary();
            assert_eq!(s.count, 5);
            assert!(s.min_ms() >= 0.0);
            assert!(s.min <= s.median && s.median <= s.max, "{}: {:?}", r.order(), s);
            assert!(s.min <= s.mean && s.mean <= s.max);
        }
    }
}

#[test]
fn test_every_order_computes_the_same_product() {
    let config = BenchConfig::new(17, 9, 13).with_trials(2);
    let results = BenchmarkRunner::new(config).unwrap().run().unwrap();

    let expected = results[0].checksum();
    for r in &results {
        assert_eq!(r.checksum().to_bits(), expected.to_bits(), "{}", r.order());
    }
}

#[test]
fn test_zero_trials_fails_without_allocating_matrices() {
    // One 256×256 matrix of f64 is 512 KiB.
    let before = AllocSnapshot::now();
    let err = benchmark(256, 256, 256, LoopOrder::Jki, 0).unwrap_err();
    let heap = before.elapsed();

    assert!(matches!(err, Error::InvalidConfiguration { .. }));
    assert!(heap.bytes < 4096, "allocated {} bytes", heap.bytes);
}

#[test]
fn test_mismatched_shapes_fail_before_running() {
    let err = BenchConfig::from_shapes((2, 3), (4, 2)).unwrap_err();
    assert!(matches!(err, Error::DimensionMismatch { .. }));
}

#[test]
fn test_sequential_kernel_does_not_allocate() {
    let result = benchmark(32, 32, 32, LoopOrder::Ijk, 3).unwrap();

    assert_eq!(result.warmup().allocations, 0);
    for t in result.trials() {
        assert_eq!(t.allocations, 0);
        assert_eq!(t.allocated_bytes, 0);
    }
}

#[test]
fn test_parallel_col_major_counts_block_allocations() {
    // 256³ is well over the multi-task threshold, so C is split into private blocks.
    let config = BenchConfig::square(256)
        .with_layout(Layout::ColMajor)
        .with_mode(ExecutionMode::Parallel { threads: 4 })
        .with_orders([LoopOrder::Jki])
        .with_trials(1);
    let result = BenchmarkRunner::new(config).unwrap().run_order(LoopOrder::Jki).unwrap();

    assert!(result.trials()[0].allocated_bytes >= (256 * 256 * 8) as u64);
}

#[test]
fn test_unknown_order_name_is_configuration_error() {
    let err = "ikk".parse::<LoopOrder>().unwrap_err();
    assert!(matches!(err, Error::InvalidConfiguration { .. }));
}

#[test]
fn test_table_lists_requested_orders() {
    let config = BenchConfig::square(8)
        .with_orders([LoopOrder::Kij, LoopOrder::Jik])
        .with_trials(1);
    let results = BenchmarkRunner::new(config).unwrap().run().unwrap();
    let table = format_table(&results);

    let orders: Vec<&str> = table
        .lines()
        .skip(1)
        .filter_map(|l| l.split_whitespace().next())
        .collect();
    assert_eq!(orders, ["kij", "jik"]);
}
