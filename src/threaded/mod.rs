//! Multi-threaded loop-order multiply.
//!
//! Splits the rows of C into contiguous ranges, one per task, and runs the
//! same triple loop on each range. Tasks never share an output element, so
//! the result is bit-identical to the sequential kernel. Task count adapts
//! to problem size: small products stay on one task because spawning costs
//! more than it saves.

use crate::error::{Error, Result};
use crate::kernels::{LoopOrder, check_shapes, flop_count, triple_loop};
use crate::matrix::{Layout, Matrix, ViewMut};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

const SINGLE_TASK_FLOPS: f64 = 1_000_000.0;
const TWO_TASK_FLOPS: f64 = 10_000_000.0;
const MIN_ROWS_PER_TASK: usize = 32;

/// Dedicated pool with exactly `threads` workers.
pub fn build_pool(threads: usize) -> Result<ThreadPool> {
    if threads == 0 {
        return Err(Error::config("parallel mode needs at least one thread"));
    }
    ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("matmul-loops-{i}"))
        .build()
        .map_err(|e| Error::config(format!("failed to build thread pool: {e}")))
}

/// C += A * B with rows of C partitioned across `pool`.
///
/// Same contract as [`multiply_into`](crate::kernels::multiply_into).
/// Row-major C hands each task a disjoint chunk of its buffer. Column-major
/// rows are strided, so each task fills a private block that is copied back
/// once every task has finished.
pub fn multiply_into_parallel(
    order: LoopOrder,
    a: &Matrix,
    b: &Matrix,
    c: &mut Matrix,
    pool: &ThreadPool,
) -> Result<()> {
    check_shapes(a, b, c)?;
    let (m, p, n) = (a.rows(), a.cols(), b.cols());
    if m == 0 || n == 0 || p == 0 {
        return Ok(());
    }

    let tasks = choose_task_count(m, p, n, pool.current_num_threads());
    if tasks == 1 {
        triple_loop::accumulate(order, a.view(), b.view(), &mut c.view_mut());
        return Ok(());
    }

    let rows_per_task = m.div_ceil(tasks);
    let (av, bv) = (a.view(), b.view());

    match c.layout() {
        Layout::RowMajor => {
            let data = c.as_mut_slice();
            pool.install(|| {
                data.par_chunks_mut(rows_per_task * n)
                    .enumerate()
                    .for_each(|(tid, chunk)| {
                        let start = tid * rows_per_task;
                        let rows = chunk.len() / n;
                        let mut block = ViewMut {
                            data: chunk,
                            rows,
                            cols: n,
                            rs: n,
                            cs: 1,
                        };
                        triple_loop::accumulate(order, av.row_range(start, start + rows), bv, &mut block);
                    });
            });
        }
        Layout::ColMajor => {
            // Blocks start as copies of C's rows so that += keeps its meaning.
            let mut blocks: Vec<(usize, Matrix)> = (0..m)
                .step_by(rows_per_task)
                .map(|start| {
                    let rows = rows_per_task.min(m - start);
                    let block = Matrix::from_fn(rows, n, Layout::ColMajor, |i, j| c.get(start + i, j));
                    (start, block)
                })
                .collect();

            pool.install(|| {
                blocks.par_iter_mut().for_each(|(start, block)| {
                    let rows = block.rows();
                    triple_loop::accumulate(order, av.row_range(*start, *start + rows), bv, &mut block.view_mut());
                });
            });

            let out = c.as_mut_slice();
            for (start, block) in &blocks {
                let rows = block.rows();
                for (j, col) in block.as_slice().chunks_exact(rows).enumerate() {
                    let dst = j * m + start;
                    out[dst..dst + rows].copy_from_slice(col);
                }
            }
        }
    }
    Ok(())
}

fn choose_task_count(m: usize, p: usize, n: usize, max_threads: usize) -> usize {
    let flops = flop_count(m, p, n);

    let optimal_tasks = if flops < SINGLE_TASK_FLOPS {
        1
    } else if flops < TWO_TASK_FLOPS {
        2
    } else {
        max_threads
    };

    let tasks_by_rows = (m / MIN_ROWS_PER_TASK).max(1);

    optimal_tasks.min(tasks_by_rows).min(max_threads).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::multiply_into;

    #[test]
    fn test_adaptive_task_count() {
        // 64³ is ~0.5M FLOPs: one task
        assert_eq!(choose_task_count(64, 64, 64, 4), 1);

        // 128³ is ~4.2M FLOPs: two tasks
        assert_eq!(choose_task_count(128, 128, 128, 4), 2);

        // 512³ is ~268M FLOPs: every thread
        assert_eq!(choose_task_count(512, 512, 512, 4), 4);

        // 16 rows can't be split into 32-row ranges
        assert_eq!(choose_task_count(16, 1024, 1024, 4), 1);
    }

    #[test]
    fn test_parallel_matches_sequential_both_layouts() {
        let pool = build_pool(4).unwrap();
        for layout in [Layout::RowMajor, Layout::ColMajor] {
            // ~10.2M FLOPs and 250 rows: four ranges of 63, 63, 63, 61
            let a = Matrix::random(250, 160, layout, 11);
            let b = Matrix::random(160, 128, layout, 12);
            for order in [LoopOrder::Ijk, LoopOrder::Jki, LoopOrder::Kij] {
                let mut seq = Matrix::from_fn(250, 128, layout, |i, j| (i * j) as f64);
                let mut par = seq.clone();

                multiply_into(order, &a, &b, &mut seq).unwrap();
                multiply_into_parallel(order, &a, &b, &mut par, &pool).unwrap();

                assert_eq!(seq, par, "{order} {layout}");
            }
        }
    }

    #[test]
    fn test_uneven_row_split() {
        let pool = build_pool(3).unwrap();
        // two ranges of 66 and 65 rows
        let a = Matrix::random(131, 96, Layout::ColMajor, 5);
        let b = Matrix::random(96, 48, Layout::ColMajor, 6);
        let mut seq = Matrix::zeros(131, 48, Layout::ColMajor);
        let mut par = Matrix::zeros(131, 48, Layout::ColMajor);

        multiply_into(LoopOrder::Jki, &a, &b, &mut seq).unwrap();
        multiply_into_parallel(LoopOrder::Jki, &a, &b, &mut par, &pool).unwrap();

        assert_eq!(seq, par);
    }

    #[test]
    fn test_zero_threads_rejected() {
        assert!(matches!(build_pool(0), Err(Error::InvalidConfiguration { .. })));
    }
}
