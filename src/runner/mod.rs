//! Benchmark harness for the loop-order kernels.
//!
//! A [`BenchmarkRunner`] validates its [`BenchConfig`] up front, then for
//! each loop order runs one warm-up call followed by the configured number
//! of timed trials. Every trial builds its own A, B and a zeroed C from the
//! seed, so every trial computes the same product; only the kernel call sits
//! inside the timed region.

pub mod config;
pub mod report;
pub mod stats;

pub use config::{BenchConfig, ExecutionMode};
pub use report::{format_summary, format_table};
pub use stats::TimingSummary;

use crate::alloc_counter::AllocSnapshot;
use crate::error::{Error, Result};
use crate::kernels::{LoopOrder, flop_count, multiply_into};
use crate::matrix::{Layout, Matrix};
use crate::threaded::{build_pool, multiply_into_parallel};
use rayon::ThreadPool;
use std::time::{Duration, Instant};

/// One kernel call: wall time plus heap traffic on the calling thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialMeasurement {
    pub elapsed: Duration,
    pub allocations: u64,
    pub allocated_bytes: u64,
}

/// Measurements for one loop order. Read-only once produced.
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    order: LoopOrder,
    layout: Layout,
    mode: ExecutionMode,
    dims: (usize, usize, usize),
    warmup: TrialMeasurement,
    trials: Vec<TrialMeasurement>,
    summary: TimingSummary,
    checksum: f64,
}

impl BenchmarkResult {
    pub fn order(&self) -> LoopOrder {
        self.order
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// (m, p, n)
    pub fn dims(&self) -> (usize, usize, usize) {
        self.dims
    }

    /// First call, kept out of the summary.
    pub fn warmup(&self) -> &TrialMeasurement {
        &self.warmup
    }

    pub fn trials(&self) -> &[TrialMeasurement] {
        &self.trials
    }

    pub fn summary(&self) -> &TimingSummary {
        &self.summary
    }

    /// Sum of the computed product's elements.
    pub fn checksum(&self) -> f64 {
        self.checksum
    }

    /// Throughput at the median trial time.
    pub fn gflops(&self) -> f64 {
        let (m, p, n) = self.dims;
        let secs = self.summary.median.as_secs_f64();
        if secs == 0.0 {
            return f64::INFINITY;
        }
        flop_count(m, p, n) / secs / 1e9
    }

    /// How many times faster than `baseline`, by median.
    pub fn speedup_over(&self, baseline: &BenchmarkResult) -> f64 {
        baseline.summary.median.as_secs_f64() / self.summary.median.as_secs_f64()
    }

    /// Mean allocations per timed trial.
    pub fn mean_allocations(&self) -> f64 {
        let total: u64 = self.trials.iter().map(|t| t.allocations).sum();
        total as f64 / self.trials.len() as f64
    }
}

/// Runs a validated [`BenchConfig`].
#[derive(Debug)]
pub struct BenchmarkRunner {
    config: BenchConfig,
    pool: Option<ThreadPool>,
}

impl BenchmarkRunner {
    /// Validates `config`; in parallel mode also builds the worker pool so
    /// that pool start-up never lands inside a timed trial.
    pub fn new(config: BenchConfig) -> Result<Self> {
        config.validate()?;
        let pool = match config.mode {
            ExecutionMode::Sequential => None,
            ExecutionMode::Parallel { threads } => Some(build_pool(threads)?),
        };
        Ok(Self { config, pool })
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// One result per configured order, in configuration order.
    pub fn run(&self) -> Result<Vec<BenchmarkResult>> {
        self.config
            .orders
            .iter()
            .map(|&order| self.run_order(order))
            .collect()
    }

    /// Warm-up plus `trials` timed calls for a single order.
    pub fn run_order(&self, order: LoopOrder) -> Result<BenchmarkResult> {
        let (warmup, expected) = self.trial(order)?;

        let mut trials = Vec::with_capacity(self.config.trials);
        for _ in 0..self.config.trials {
            let (measurement, checksum) = self.trial(order)?;
            if checksum.to_bits() != expected.to_bits() {
                return Err(Error::config(format!(
                    "{order}: trial produced checksum {checksum}, warm-up produced {expected}"
                )));
            }
            trials.push(measurement);
        }

        let elapsed: Vec<Duration> = trials.iter().map(|t| t.elapsed).collect();
        let summary = TimingSummary::from_durations(&elapsed)
            .ok_or_else(|| Error::config("trial count must be at least 1"))?;

        let cfg = &self.config;
        Ok(BenchmarkResult {
            order,
            layout: cfg.layout,
            mode: cfg.mode,
            dims: (cfg.m, cfg.p, cfg.n),
            warmup,
            trials,
            summary,
            checksum: expected,
        })
    }

    fn trial(&self, order: LoopOrder) -> Result<(TrialMeasurement, f64)> {
        let cfg = &self.config;
        let a = Matrix::random(cfg.m, cfg.p, cfg.layout, cfg.seed);
        let b = Matrix::random(cfg.p, cfg.n, cfg.layout, cfg.seed.wrapping_add(1));
        let mut c = Matrix::zeros(cfg.m, cfg.n, cfg.layout);

        let allocs = AllocSnapshot::now();
        let start = Instant::now();
        match &self.pool {
            None => multiply_into(order, &a, &b, &mut c)?,
            Some(pool) => multiply_into_parallel(order, &a, &b, &mut c, pool)?,
        }
        let elapsed = start.elapsed();
        let heap = allocs.elapsed();

        let measurement = TrialMeasurement {
            elapsed,
            allocations: heap.allocations,
            allocated_bytes: heap.bytes,
        };
        Ok((measurement, c.sum()))
    }
}

/// Sequential, column-major benchmark of one order on an `m × p` by `p × n`
/// product.
///
/// ```
/// use matmul_loops::{LoopOrder, benchmark};
///
/// let result = benchmark(32, 16, 24, LoopOrder::Jki, 3).unwrap();
/// assert_eq!(result.trials().len(), 3);
/// assert!(result.summary().min <= result.summary().median);
/// ```
pub fn benchmark(
    m: usize,
    p: usize,
    n: usize,
    order: LoopOrder,
    trials: usize,
) -> Result<BenchmarkResult> {
    let config = BenchConfig::new(m, p, n)
        .with_orders([order])
        .with_trials(trials);
    BenchmarkRunner::new(config)?.run_order(order)
}
