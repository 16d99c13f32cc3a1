//! Loop-order matrix multiplication benchmark, built from scratch.
//!
//! The textbook triple loop `C[i,j] += A[i,k] * B[k,j]` can nest its three
//! indices in six ways. They all do the same arithmetic, but they walk
//! memory very differently: with column-major storage, putting `i`
//! innermost reads A and C with unit stride, while putting `k` innermost
//! jumps a whole column of A on every step. This crate times the six orders
//! against each other so the cache effect can be measured rather than
//! assumed.
//!
//! ## Usage
//!
//! ```
//! use matmul_loops::{Layout, LoopOrder, Matrix, multiply_into};
//!
//! let a = Matrix::random(64, 32, Layout::ColMajor, 1);
//! let b = Matrix::random(32, 48, Layout::ColMajor, 2);
//! let mut c = Matrix::zeros(64, 48, Layout::ColMajor);
//!
//! multiply_into(LoopOrder::Jki, &a, &b, &mut c).unwrap();
//! ```
//!
//! Timing all six orders:
//!
//! ```
//! use matmul_loops::{BenchConfig, BenchmarkRunner, format_table};
//!
//! let runner = BenchmarkRunner::new(BenchConfig::square(32).with_trials(3)).unwrap();
//! let results = runner.run().unwrap();
//! println!("{}", format_table(&results));
//! ```
//!
//! ## What's inside
//!
//! - Six loop nests over strided row- or column-major matrices
//! - Row-partitioned parallel mode on a rayon pool
//! - Diagonal scaling without a full multiply
//! - Warm-up, min/median/mean timing and per-trial allocation counts

pub mod alloc_counter;
pub mod error;
pub mod kernels;
pub mod matrix;
pub mod runner;
pub mod threaded;

pub use error::{Error, Result};
pub use kernels::{LoopOrder, flop_count, multiply, multiply_into};
pub use matrix::scale::{scale_cols, scale_rows};
pub use matrix::{Layout, Matrix};
pub use runner::{
    BenchConfig, BenchmarkResult, BenchmarkRunner, ExecutionMode, TimingSummary,
    TrialMeasurement, benchmark, format_summary, format_table,
};
pub use threaded::{build_pool, multiply_into_parallel};
