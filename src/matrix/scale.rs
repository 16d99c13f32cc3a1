//! Diagonal scaling without forming the diagonal matrix.
//!
//! `diag(d) · A` scales row i by `d[i]`; `A · diag(d)` scales column j by
//! `d[j]`. Both are O(mn) instead of the O(mn²) of a full multiply, and
//! both walk the buffer in storage order.

use super::{Layout, Matrix};
use crate::error::{Error, Result};

/// A ← diag(d) · A
pub fn scale_rows(d: &[f64], a: &mut Matrix) -> Result<()> {
    let (rows, cols) = a.shape();
    if d.len() != rows {
        return Err(Error::mismatch("scale_rows", (rows, rows), (d.len(), d.len())));
    }
    let layout = a.layout();
    let data = a.as_mut_slice();

    match layout {
        Layout::RowMajor => {
            for (row, &s) in data.chunks_exact_mut(cols.max(1)).zip(d) {
                row.iter_mut().for_each(|x| *x *= s);
            }
        }
        Layout::ColMajor => {
            for col in data.chunks_exact_mut(rows.max(1)) {
                col.iter_mut().zip(d).for_each(|(x, &s)| *x *= s);
            }
        }
    }
    Ok(())
}

/// A ← A · diag(d)
pub fn scale_cols(a: &mut Matrix, d: &[f64]) -> Result<()> {
    let (rows, cols) = a.shape();
    if d.len() != cols {
        return Err(Error::mismatch("scale_cols", (cols, cols), (d.len(), d.len())));
    }
    let layout = a.layout();
    let data = a.as_mut_slice();

    match layout {
        Layout::RowMajor => {
            for row in data.chunks_exact_mut(cols.max(1)) {
                row.iter_mut().zip(d).for_each(|(x, &s)| *x *= s);
            }
        }
        Layout::ColMajor => {
            for (col, &s) in data.chunks_exact_mut(rows.max(1)).zip(d) {
                col.iter_mut().for_each(|x| *x *= s);
            }
        }
    }
    Ok(())
}
