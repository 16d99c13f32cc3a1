//! Loop-order matrix multiplication kernels.
//!
//! [`multiply_into`] is the checked entry point: it validates shapes, then
//! runs the triple loop in the requested [`LoopOrder`]. Nothing is written
//! to C unless the shapes line up.
//!
//! Available orders:
//! - `ijk`, `jik`: innermost k (dot products)
//! - `ikj`, `kij`: innermost j (unit stride for row-major operands)
//! - `jki`, `kji`: innermost i (unit stride for column-major operands)

pub mod loop_order;
pub(crate) mod triple_loop;

pub use loop_order::{Index, LoopOrder};

use crate::error::{Error, Result};
use crate::matrix::Matrix;

/// Matrix multiply: C += A * B, visiting (i, j, k) in `order`.
///
/// A is m×p, B is p×n, C is m×n; layouts may be mixed. C is mutated in
/// place. NaN and infinities propagate through the arithmetic untouched.
///
/// # Errors
///
/// [`Error::DimensionMismatch`] if `a.cols() != b.rows()` or C is not
/// `a.rows() × b.cols()`. C is left unchanged.
pub fn multiply_into(order: LoopOrder, a: &Matrix, b: &Matrix, c: &mut Matrix) -> Result<()> {
    check_shapes(a, b, c)?;
    triple_loop::accumulate(order, a.view(), b.view(), &mut c.view_mut());
    Ok(())
}

/// Allocating convenience: returns A * B in `a`'s layout.
pub fn multiply(order: LoopOrder, a: &Matrix, b: &Matrix) -> Result<Matrix> {
    if a.cols() != b.rows() {
        return Err(Error::mismatch("multiply", (a.cols(), b.cols()), b.shape()));
    }
    let mut c = Matrix::zeros(a.rows(), b.cols(), a.layout());
    multiply_into(order, a, b, &mut c)?;
    Ok(c)
}

pub(crate) fn check_shapes(a: &Matrix, b: &Matrix, c: &Matrix) -> Result<()> {
    if a.cols() != b.rows() {
        return Err(Error::mismatch("multiply_into: B", (a.cols(), b.cols()), b.shape()));
    }
    if c.shape() != (a.rows(), b.cols()) {
        return Err(Error::mismatch("multiply_into: C", (a.rows(), b.cols()), c.shape()));
    }
    Ok(())
}

/// Floating point operations in one m×p by p×n multiply (one mul + one add
/// per inner step).
pub fn flop_count(m: usize, p: usize, n: usize) -> f64 {
    2.0 * m as f64 * p as f64 * n as f64
}
